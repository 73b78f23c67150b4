//! Consumer callbacks
//!
//! Callbacks are fallible so a consumer's failure can travel back out of the
//! handler that triggered it. The engine never catches, retries, or wraps
//! those failures beyond [`crate::EngineError::Callback`], which is
//! transparent.

use std::fmt;

use crate::events::ClickEvent;

/// What a consumer callback returns
pub type CallbackResult = anyhow::Result<()>;

type ClickFn = Box<dyn FnMut(&ClickEvent) -> CallbackResult>;
type ConfirmFn = Box<dyn FnMut() -> CallbackResult>;

/// The `onClick` prop
#[derive(Default)]
pub struct ClickCallback(Option<ClickFn>);

impl ClickCallback {
    /// No callback; clicks still drive the machine
    pub fn none() -> Self {
        Self(None)
    }

    /// Wrap a callback that cannot fail
    pub fn new<F>(mut callback: F) -> Self
    where
        F: FnMut(&ClickEvent) + 'static,
    {
        Self(Some(Box::new(move |event| {
            callback(event);
            Ok(())
        })))
    }

    /// Wrap a callback whose failure should reach the caller
    pub fn fallible<F>(callback: F) -> Self
    where
        F: FnMut(&ClickEvent) -> CallbackResult + 'static,
    {
        Self(Some(Box::new(callback)))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Invoke the callback, if any
    pub fn call(&mut self, event: &ClickEvent) -> CallbackResult {
        match self.0.as_mut() {
            Some(callback) => callback(event),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ClickCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClickCallback")
            .field(&if self.is_set() { "set" } else { "none" })
            .finish()
    }
}

/// A zero-argument callback, used for the confirmation ladder's `onConfirm`
#[derive(Default)]
pub struct ConfirmCallback(Option<ConfirmFn>);

impl ConfirmCallback {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new<F>(mut callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self(Some(Box::new(move || {
            callback();
            Ok(())
        })))
    }

    pub fn fallible<F>(callback: F) -> Self
    where
        F: FnMut() -> CallbackResult + 'static,
    {
        Self(Some(Box::new(callback)))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn call(&mut self) -> CallbackResult {
        match self.0.as_mut() {
            Some(callback) => callback(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ConfirmCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfirmCallback")
            .field(&if self.is_set() { "set" } else { "none" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_missing_callback_is_ok() {
        let mut cb = ClickCallback::none();
        assert!(cb.call(&ClickEvent::default()).is_ok());
        assert!(ConfirmCallback::none().call().is_ok());
    }

    #[test]
    fn test_callback_receives_event() {
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let mut cb = ClickCallback::new(move |e| sink.set(Some(e.position.x)));

        cb.call(&ClickEvent::at(12.0, 3.0)).unwrap();
        assert_eq!(seen.get(), Some(12.0));
    }

    #[test]
    fn test_fallible_callback_error_passes_through() {
        let mut cb = ClickCallback::fallible(|_| anyhow::bail!("disk full"));
        let err = cb.call(&ClickEvent::default()).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
