//! Feels Widget Library
//!
//! Ten buttons with feelings, each driven by its own interaction state
//! machine on top of [`feels_core`].
//!
//! # Architecture
//!
//! 1. **Machines**: each widget module defines a phase enum and a type
//!    implementing [`Machine`]. Machines react to pointer events, clicks and
//!    their own timers, and publish a [`DisplayState`].
//!
//! 2. **Context**: [`WidgetContext`] hosts every mounted widget, lights the
//!    click flash, routes timers back to their owners, and guarantees that
//!    nothing fires against a widget after it unmounts.
//!
//! 3. **Builders**: every widget has a constructor function returning a
//!    builder with the shared [`WidgetBuilder`] props plus its own options.
//!
//! # Example
//!
//! ```rust
//! use feels_widgets::prelude::*;
//!
//! let mut cx = WidgetContext::with_random(SequenceRandom::new([0.0, 0.9]));
//! let button = dissociating()
//!     .label("Process")
//!     .on_click(|_| println!("done, eventually"))
//!     .mount(&mut cx);
//!
//! cx.click(button, &ClickEvent::default()).unwrap();
//! assert!(cx.display(button).unwrap().busy);
//!
//! cx.advance(3000).unwrap();
//! assert!(!cx.display(button).unwrap().busy);
//! ```

pub mod anxious;
pub mod context;
pub mod cycle;
pub mod dissociating;
pub mod emotionally_unavailable;
pub mod gaslighting;
pub mod identity_crisis;
pub mod imposter_syndrome;
pub mod overly_eager;
pub mod overthinking;
pub mod passive_aggressive;
pub mod people_pleasing;
pub mod widget;

pub use anxious::{anxious, AnxiousBuilder, AnxiousMachine};
pub use context::{ContextStats, WidgetContext};
pub use dissociating::{
    dissociating, DissociatePhase, DissociatingBuilder, DissociatingConfig, DissociatingMachine,
};
pub use emotionally_unavailable::{emotionally_unavailable, UnavailableBuilder, UnavailableMachine};
pub use gaslighting::{
    gaslighting, GaslightPhase, GaslightingBuilder, GaslightingConfig, GaslightingMachine,
};
pub use identity_crisis::{
    identity_crisis, Era, EraStyle, IdentityCrisisBuilder, IdentityCrisisConfig,
    IdentityCrisisMachine,
};
pub use imposter_syndrome::{imposter_syndrome, ImposterBuilder, ImposterMachine, ImposterPhase};
pub use overly_eager::{overly_eager, EagerBuilder, EagerMachine};
pub use overthinking::{overthinking, OverthinkingBuilder, OverthinkingMachine};
pub use passive_aggressive::{
    passive_aggressive, PassiveAggressiveBuilder, PassiveAggressiveMachine, ReplyPhase,
};
pub use people_pleasing::{people_pleasing, LadderPhase, PleasingBuilder, PleasingMachine};
pub use widget::{
    Attributes, Content, Cursor, DisplayState, Machine, NodeRef, Visual, WidgetBuilder,
    WidgetProps,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::anxious::anxious;
    pub use crate::context::WidgetContext;
    pub use crate::dissociating::dissociating;
    pub use crate::emotionally_unavailable::emotionally_unavailable;
    pub use crate::gaslighting::gaslighting;
    pub use crate::identity_crisis::{identity_crisis, Era};
    pub use crate::imposter_syndrome::imposter_syndrome;
    pub use crate::overly_eager::overly_eager;
    pub use crate::overthinking::overthinking;
    pub use crate::passive_aggressive::passive_aggressive;
    pub use crate::people_pleasing::people_pleasing;
    pub use crate::widget::{Content, DisplayState, NodeRef, Visual, WidgetBuilder};
    pub use feels_core::prelude::*;
}
