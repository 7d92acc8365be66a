//! Fine-grained reactivity: `Signal`, `Effect`, and `Context`.
//!
//! The runtime is thread-local and synchronous. Reading a signal inside a
//! running effect records a dependency; writing a signal re-runs every
//! dependent effect before the write returns. Dependencies are re-collected
//! on every run, so an effect only stays subscribed to the signals it
//! actually read last time.

mod context;
mod effect;
mod runtime;
mod signal;

pub use context::{Context, provide_context, remove_context, use_context};
pub use effect::Effect;
pub use runtime::NodeId;
pub use signal::Signal;
