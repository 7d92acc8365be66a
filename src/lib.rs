//! # Nuages
//!
//! A client-side routing library for Rust frontends.
//!
//! Nuages models the navigation half of a single-page application as plain,
//! synchronous Rust: a tree of route entries is matched against immutable
//! location snapshots, matched entries render through a lightweight `View`
//! tree, and an in-memory history stack provides push/replace/pop semantics
//! that tests can assert against directly.
//!
//! ## Crates
//!
//! - [`core`](nuages_core): the `View` tree, the `Component` trait, and the
//!   fine-grained reactive system (`Signal`, `Effect`, `Context`).
//! - [`router`](nuages_router): route patterns (`:param`, terminal `*`),
//!   nested resolution with outlet composition, the memory history stack,
//!   guarded routes, and query-state binding.
//!
//! ## Example
//!
//! ```ignore
//! use nuages::router::{Route, Router};
//! use nuages::core::View;
//!
//! let router = Router::builder()
//!     .route(Route::new("/", || View::text("Home")))
//!     .route(
//!         Route::new("products", layout)
//!             .child(Route::index(product_list))
//!             .child(Route::new(":productId", product_detail)),
//!     )
//!     .route(Route::new("*", not_found))
//!     .build()?;
//!
//! router.push("/products/1");
//! let html = router.render_current().render_to_string();
//! # Ok::<(), nuages::router::RouterError>(())
//! ```

#[cfg(feature = "core")]
pub use nuages_core as core;

#[cfg(feature = "router")]
pub use nuages_router as router;
