//! Feels Core
//!
//! The engine under the feels widgets: a mood policy, a virtual-clock timer
//! scheduler, the click flash, and the injectable randomness every machine
//! draws from.
//!
//! # Architecture
//!
//! 1. **Mood Policy** ([`mood`]): a pure mapping from [`MoodLevel`] to the
//!    numeric knobs of each [`WidgetKind`].
//!
//! 2. **Scheduler** ([`scheduler`]): one process-wide queue of single-shot
//!    and repeating timers on a millisecond clock that only moves when the
//!    host advances it. Timers are owned by a [`WidgetId`] so teardown can
//!    sweep them.
//!
//! 3. **Machine context** ([`context`]): what a widget's state machine sees
//!    during one dispatch, plus [`TimerSlot`] for owning at most one pending
//!    timer per concern.
//!
//! # Example
//!
//! ```rust
//! use feels_core::prelude::*;
//! use slotmap::SlotMap;
//!
//! let mut widgets: SlotMap<WidgetId, ()> = SlotMap::with_key();
//! let owner = widgets.insert(());
//!
//! let mut scheduler = Scheduler::new();
//! let mut rng = SequenceRandom::new([0.5]);
//! let mut flash = ClickFlash::new();
//!
//! let mut cx = MachineCx::new(&mut scheduler, &mut rng, owner, MoodLevel::Normal);
//! flash.trigger(&mut cx);
//! assert!(flash.is_lit());
//!
//! while let Some(fired) = scheduler.pop_due(220) {
//!     flash.on_timer(&fired);
//! }
//! assert!(!flash.is_lit());
//! ```

pub mod callback;
pub mod context;
pub mod error;
pub mod events;
pub mod flash;
pub mod kind;
pub mod mood;
pub mod random;
pub mod scheduler;

pub use callback::{CallbackResult, ClickCallback, ConfirmCallback};
pub use context::{MachineCx, TimerSlot};
pub use error::{EngineError, Result};
pub use events::{ClickEvent, Point, PointerButton, Rect};
pub use flash::ClickFlash;
pub use kind::WidgetKind;
pub use mood::{resolve, MoodLevel, MoodParameters, Tone};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use scheduler::{FiredTimer, Scheduler, TimerId, TimerToken, WidgetId};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::callback::{CallbackResult, ClickCallback, ConfirmCallback};
    pub use crate::context::{MachineCx, TimerSlot};
    pub use crate::error::{EngineError, Result};
    pub use crate::events::{ClickEvent, Point, Rect};
    pub use crate::flash::ClickFlash;
    pub use crate::kind::WidgetKind;
    pub use crate::mood::MoodLevel;
    pub use crate::random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
    pub use crate::scheduler::{FiredTimer, Scheduler, TimerId, TimerToken, WidgetId};
}
