//! Component system: the `View` tree and the `Component` trait.
//!
//! Everything a route renders is a [`View`]: a tree of elements, text
//! nodes, and fragments that can be serialized to an HTML string. Views
//! are cheap to clone, which lets the router cache a parent's output and
//! re-compose it around a changing child without re-running the parent.

mod traits;
mod view;

pub use traits::Component;
pub use view::{ElementView, IntoView, View};
