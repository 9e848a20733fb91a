//! Ports (trait boundaries) between the learner and its surroundings.
//!
//! These traits are owned by the learning core and implemented by callers:
//! environment drivers talk to a [`Learner`], environments implement
//! [`Environment`], and instrumentation implements [`UpdateObserver`].

pub mod environment;
pub mod learner;
pub mod observer;

pub use environment::{Environment, Transition};
pub use learner::Learner;
pub use observer::{UpdateCounter, UpdateEvent, UpdateKind, UpdateObserver};
