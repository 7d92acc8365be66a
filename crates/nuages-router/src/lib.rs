//! # Nuages Router
//!
//! Client-side routing over the nuages view substrate.
//!
//! A location string (path plus optional query) enters through a link
//! activation, an imperative call, or a history pop; a matching pass
//! selects at most one chain of handlers from the registered route tree;
//! the chain renders root to leaf, each level grafting its child's output
//! into its outlet. Everything runs synchronously inside the triggering
//! event.
//!
//! ## Concepts
//!
//! - **Patterns** ([`pattern::RoutePattern`]): literal segments, `:param`
//!   captures, and a terminal `*` wildcard used as the not-found
//!   fallback.
//! - **Route tree** ([`Route`]): entries with ordered children; index
//!   entries match an empty residual, wildcards match last. Parameter
//!   names must be unique along any root-to-leaf chain — collisions are
//!   rejected when the router is built.
//! - **History** ([`MemoryHistory`]): an in-memory stack with push,
//!   replace, and pop semantics; the back/forward cursor is the only
//!   external re-resolution source besides direct calls.
//! - **Guards**: a predicate and a fallback location attached to a
//!   route; failing the predicate replace-navigates — never push — so
//!   the guarded location cannot become a back-navigation loop.
//! - **Query binding** ([`hooks::use_search_params`]): read the current
//!   mapping, write a complete replacement, navigating in place.
//!
//! ## Example
//!
//! ```ignore
//! use nuages_core::View;
//! use nuages_router::{Link, Outlet, Route, Router};
//!
//! fn shell() -> View {
//! 	View::element("div")
//! 		.child(Link::new("/products", "Products").render())
//! 		.child(Outlet::new().render())
//! 		.into_view()
//! }
//!
//! let router = Router::builder()
//! 	.route(Route::new("/", shell).children(vec![
//! 		Route::index(|| View::text("Home")),
//! 		Route::new("products", || View::text("Products")),
//! 	]))
//! 	.route(Route::new("*", || View::text("Not Found")))
//! 	.build()?;
//!
//! router.push("/products");
//! let html = router.render_current().render_to_string();
//! # Ok::<(), nuages_router::RouterError>(())
//! ```

pub mod auth;
pub mod components;
pub mod core;
pub mod error;
pub mod history;
pub mod hooks;
pub mod location;
pub mod params;
pub mod pattern;
pub mod query;
pub mod route;

mod matcher;

pub use auth::{AuthState, use_auth};
pub use components::{Link, Outlet};
pub use crate::core::{Router, RouterBuilder, RouterConfig};
pub use error::{ParamsError, PatternError, RouterError};
pub use history::{MemoryHistory, NavigationType};
pub use hooks::{SearchParams, use_location, use_params, use_router, use_search_params};
pub use location::Location;
pub use params::{FromParams, ParamMap, Params};
pub use pattern::RoutePattern;
pub use query::Query;
pub use route::Route;
