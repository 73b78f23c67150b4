//! Feels demo harness
//!
//! Mounts the whole widget catalogue on a virtual clock and drives it from a
//! line-oriented script, logging every callback that fires.

pub mod config;
pub mod harness;
pub mod script;

pub use config::{DemoConfig, WidgetOverrides};
pub use harness::{CallbackRecord, Harness};
pub use script::{parse, Command, ScriptError, Step};
