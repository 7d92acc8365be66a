//! # Nuages Core
//!
//! The rendering and reactivity substrate the nuages router builds on.
//!
//! This crate is deliberately small and target-independent:
//!
//! - [`component`]: a `View` tree (elements, text, fragments) with HTML
//!   string rendering and a `Component` trait for reusable pieces.
//! - [`reactive`]: fine-grained reactivity — `Signal` for state that
//!   changes over time, `Effect` for side effects that re-run when the
//!   signals they read change, and `Context` for providing values to an
//!   entire render tree.
//!
//! The reactive runtime is thread-local and fully synchronous: a `set` on a
//! signal re-runs dependent effects before it returns. There is no
//! scheduler and no batching; callers that need ordering get it from plain
//! program order.

pub mod component;
pub mod reactive;

pub use component::{Component, ElementView, IntoView, View};
pub use reactive::{Context, Effect, Signal, provide_context, remove_context, use_context};
