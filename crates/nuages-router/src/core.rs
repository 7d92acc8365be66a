//! The router: registration, navigation, resolution, and rendering.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use nuages_core::{Effect, Signal, View};
use tracing::{debug, warn};

use crate::components::OUTLET_ATTR;
use crate::error::RouterError;
use crate::history::MemoryHistory;
use crate::hooks::{self, Scope};
use crate::location::Location;
use crate::matcher::{self, MatchedEntry};
use crate::params::ParamMap;
use crate::pattern::RoutePattern;
use crate::query::Query;
use crate::route::{Handler, Route, RouteNode, ViewFactory, compile};

/// Redirect hops allowed within one render before bailing out.
const MAX_REDIRECTS: usize = 8;

/// Router-wide policy knobs.
///
/// # Example
///
/// ```ignore
/// let config = RouterConfig::default()
/// 	.basename("/app")
/// 	.strict_trailing_slash(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
	/// Path prefix stripped from every location before matching and
	/// prepended to generated URLs.
	basename: Option<String>,
	/// When set, `/users/` and `/users` are distinct; a trailing slash
	/// only ever matches a wildcard entry.
	strict_trailing_slash: bool,
}

impl RouterConfig {
	/// Sets the basename prefix.
	pub fn basename(mut self, basename: impl Into<String>) -> Self {
		self.basename = Some(basename.into());
		self
	}

	/// Sets strict trailing-slash matching.
	pub fn strict_trailing_slash(mut self, strict: bool) -> Self {
		self.strict_trailing_slash = strict;
		self
	}
}

/// One mounted level of the active route chain.
///
/// The cached view is keyed by the entry's identity, the parameters
/// visible to it, and the query. A level whose key is unchanged across a
/// navigation keeps its output verbatim — its factory is not re-run — so
/// child-only navigation preserves parent output.
struct MountedLevel {
	node: Rc<RouteNode>,
	prefix: ParamMap,
	query: Query,
	view: View,
}

struct RouterInner {
	routes: Vec<Rc<RouteNode>>,
	named: HashMap<String, RoutePattern>,
	fallback: Option<ViewFactory>,
	basename_segments: Vec<String>,
	strict_trailing_slash: bool,
	history: MemoryHistory,
	location: Signal<Location>,
	params: Signal<ParamMap>,
	mounted: RefCell<Vec<MountedLevel>>,
}

/// The client-side router.
///
/// Cheap to clone; clones share the same route tree, history stack, and
/// mounted state. Everything is synchronous and single-threaded: a
/// navigation updates the active location before it returns, and the next
/// [`Router::render_current`] observes it.
///
/// # Example
///
/// ```ignore
/// let router = Router::builder()
/// 	.route(Route::new("/", home))
/// 	.route(
/// 		Route::new("products", products_layout)
/// 			.child(Route::index(product_list))
/// 			.child(Route::new(":productId", product_detail)),
/// 	)
/// 	.route(Route::new("*", not_found))
/// 	.build()?;
///
/// router.push("/products/1");
/// let html = router.render_current().render_to_string();
/// # Ok::<(), nuages_router::RouterError>(())
/// ```
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.inner.routes.len())
			.field("named", &self.inner.named.keys().collect::<Vec<_>>())
			.field("location", &self.inner.location.get_untracked())
			.finish()
	}
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::default()
	}

	/// The active location snapshot.
	pub fn current_location(&self) -> Location {
		self.inner.location.get_untracked()
	}

	/// The active location as a reactive signal.
	pub fn location_signal(&self) -> &Signal<Location> {
		&self.inner.location
	}

	/// The merged parameters of the last resolution.
	pub fn current_params(&self) -> ParamMap {
		self.inner.params.get_untracked()
	}

	/// The merged parameters as a reactive signal.
	pub fn params_signal(&self) -> &Signal<ParamMap> {
		&self.inner.params
	}

	/// The history stack.
	pub fn history(&self) -> &MemoryHistory {
		&self.inner.history
	}

	/// Navigates to `to`, appending a history entry.
	pub fn push(&self, to: &str) {
		self.push_location(Location::parse(to));
	}

	/// Navigates to `to`, overwriting the current history entry.
	pub fn replace(&self, to: &str) {
		self.replace_location(Location::parse(to));
	}

	/// Push-navigates to an already-built location.
	pub fn push_location(&self, location: Location) {
		debug!(to = %location, "push");
		self.inner.history.push(location);
	}

	/// Replace-navigates to an already-built location.
	pub fn replace_location(&self, location: Location) {
		debug!(to = %location, "replace");
		self.inner.history.replace(location);
	}

	/// Push-navigates to the current path with `query` as the entire
	/// query mapping.
	pub fn set_query(&self, query: Query) {
		let location = self.current_location().replacing_query(query);
		self.push_location(location);
	}

	/// Like [`Router::set_query`] without growing the history stack.
	pub fn replace_query(&self, query: Query) {
		let location = self.current_location().replacing_query(query);
		self.replace_location(location);
	}

	/// Moves one history entry back (a pop navigation).
	pub fn back(&self) -> bool {
		self.inner.history.back()
	}

	/// Moves one history entry forward (a pop navigation).
	pub fn forward(&self) -> bool {
		self.inner.history.forward()
	}

	/// Runs `f` now and after every location change.
	pub fn on_navigate<F>(&self, mut f: F) -> Effect
	where
		F: FnMut(Location) + 'static,
	{
		let signal = self.inner.location.clone();
		Effect::new(move || f(signal.get()))
	}

	/// Generates a URL for a named route.
	///
	/// # Errors
	///
	/// [`RouterError::UnknownRouteName`] for an unregistered name,
	/// [`RouterError::Reverse`] when a parameter value is missing.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let pattern = self
			.inner
			.named
			.get(name)
			.ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;
		let map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| ((*k).to_string(), (*v).to_string()))
			.collect();
		let path = pattern
			.reverse(&map)
			.map_err(|source| RouterError::Reverse {
				name: name.to_string(),
				source,
			})?;

		if self.inner.basename_segments.is_empty() {
			return Ok(path);
		}
		let basename = format!("/{}", self.inner.basename_segments.join("/"));
		if path == "/" {
			Ok(basename)
		} else {
			Ok(format!("{basename}{path}"))
		}
	}

	/// Resolves and renders the active location.
	///
	/// Guard failures and redirect entries replace-navigate and resolve
	/// again, bounded by a redirect budget. An unmatched location renders
	/// the configured fallback, or nothing — it is a representable
	/// outcome, not an error.
	pub fn render_current(&self) -> View {
		let mut hops = 0;
		loop {
			let location = self.inner.location.get();

			let Some(segments) = self.effective_segments(&location) else {
				self.clear_mounted();
				return self.render_fallback(&location);
			};
			let Some(chain) = matcher::resolve(&self.inner.routes, &segments) else {
				self.clear_mounted();
				return self.render_fallback(&location);
			};

			if let Some(target) = redirect_target(&chain) {
				hops += 1;
				if hops > MAX_REDIRECTS {
					warn!(
						"{}",
						RouterError::RedirectLoop(location.to_string())
					);
					self.clear_mounted();
					return View::Empty;
				}
				debug!(from = %location, to = %target, "redirecting");
				self.replace(&target);
				continue;
			}

			return match self.mount_chain(&location, &chain) {
				Ok(view) => view,
				Err(err) => {
					warn!("render failed: {err}");
					self.clear_mounted();
					self.render_fallback(&location)
				}
			};
		}
	}

	/// Mounts the chain, reusing unchanged levels, and composes the
	/// final view leaf-first through the outlet markers.
	fn mount_chain(
		&self,
		location: &Location,
		chain: &[MatchedEntry],
	) -> Result<View, RouterError> {
		let old = std::mem::take(&mut *self.inner.mounted.borrow_mut());
		let mut mounted: Vec<MountedLevel> = Vec::with_capacity(chain.len());

		let mut prefix = ParamMap::new();
		for (index, entry) in chain.iter().enumerate() {
			prefix.extend(&entry.captures);

			let reused = old.get(index).and_then(|level| {
				let unchanged = Rc::ptr_eq(&level.node, &entry.node)
					&& level.prefix == prefix
					&& level.query == *location.query();
				unchanged.then(|| level.view.clone())
			});

			let view = match reused {
				Some(view) => view,
				None => {
					let scope = Scope {
						location: location.clone(),
						params: prefix.clone(),
						router: self.clone(),
					};
					let params = prefix.clone();
					let node = Rc::clone(&entry.node);
					hooks::with_scope(scope, || node.handler.render(&params))?
				}
			};

			mounted.push(MountedLevel {
				node: Rc::clone(&entry.node),
				prefix: prefix.clone(),
				query: location.query().clone(),
				view,
			});
		}

		self.inner.params.set(prefix);

		let composed = compose(&mounted);
		*self.inner.mounted.borrow_mut() = mounted;
		Ok(composed)
	}

	fn render_fallback(&self, location: &Location) -> View {
		self.inner.params.set(ParamMap::new());
		let Some(fallback) = &self.inner.fallback else {
			return View::Empty;
		};
		let scope = Scope {
			location: location.clone(),
			params: ParamMap::new(),
			router: self.clone(),
		};
		let fallback = Rc::clone(fallback);
		hooks::with_scope(scope, || fallback())
	}

	fn clear_mounted(&self) {
		self.inner.mounted.borrow_mut().clear();
	}

	/// Applies the basename and trailing-slash policy to a location,
	/// yielding the segments to match. `None` means the location is
	/// outside this router's basename.
	fn effective_segments(&self, location: &Location) -> Option<Vec<String>> {
		let mut segments = location.segments();

		let basename = &self.inner.basename_segments;
		if !basename.is_empty() {
			if segments.len() < basename.len() || segments[..basename.len()] != basename[..] {
				debug!(location = %location, "location outside basename");
				return None;
			}
			segments.drain(..basename.len());
		}

		if self.inner.strict_trailing_slash
			&& location.has_trailing_slash()
			&& !location.is_root()
		{
			// An empty terminal segment matches no literal or parameter;
			// only a wildcard can swallow it.
			segments.push(String::new());
		}

		Some(segments)
	}
}

/// Walks the chain root → leaf for the first guard failure or redirect
/// entry.
fn redirect_target(chain: &[MatchedEntry]) -> Option<String> {
	for entry in chain {
		if let Some(guard) = &entry.node.guard {
			if !(guard.predicate)() {
				return Some(guard.redirect_to.clone());
			}
		}
		if let Handler::Redirect(to) = &entry.node.handler {
			return Some(to.clone());
		}
	}
	None
}

/// Composes mounted levels leaf-first, grafting each child view into its
/// parent's outlet marker.
fn compose(levels: &[MountedLevel]) -> View {
	let mut acc: Option<View> = None;
	for level in levels.iter().rev() {
		acc = Some(match acc {
			None => level.view.clone(),
			Some(child) => {
				let mut grafted = false;
				let composed = graft(&level.view, &child, &mut grafted);
				if !grafted {
					warn!(
						pattern = %level.node.pattern,
						"matched child output dropped: parent renders no outlet"
					);
				}
				composed
			}
		});
	}
	acc.unwrap_or(View::Empty)
}

fn graft(view: &View, child: &View, grafted: &mut bool) -> View {
	match view {
		View::Element(el) => {
			if !*grafted && el.attr_value(OUTLET_ATTR) == Some("true") {
				*grafted = true;
				return View::Element(el.clone().with_children(vec![child.clone()]));
			}
			let children = el
				.child_views()
				.iter()
				.map(|c| graft(c, child, grafted))
				.collect();
			View::Element(el.clone().with_children(children))
		}
		View::Fragment(views) => {
			View::Fragment(views.iter().map(|v| graft(v, child, grafted)).collect())
		}
		other => other.clone(),
	}
}

/// Collects routes and policy, then compiles them into a [`Router`].
///
/// [`RouterBuilder::build`] is the registration boundary: invalid
/// patterns, parameter collisions across nesting levels, duplicate route
/// names, and wildcard entries with children are all rejected here.
#[derive(Default)]
pub struct RouterBuilder {
	config: RouterConfig,
	routes: Vec<Route>,
	fallback: Option<ViewFactory>,
	initial: Option<Location>,
}

impl RouterBuilder {
	/// Applies a configuration.
	pub fn config(mut self, config: RouterConfig) -> Self {
		self.config = config;
		self
	}

	/// Registers a top-level entry. Declaration order is match order.
	pub fn route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Registers several top-level entries in order.
	pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
		self.routes.extend(routes);
		self
	}

	/// Sets the view rendered when nothing matches and no wildcard entry
	/// caught the location.
	pub fn not_found<F>(mut self, component: F) -> Self
	where
		F: Fn() -> View + 'static,
	{
		self.fallback = Some(Rc::new(component));
		self
	}

	/// Sets the initial location (defaults to `/`).
	pub fn initial(mut self, location: &str) -> Self {
		self.initial = Some(Location::parse(location));
		self
	}

	/// Validates the registration and produces the router.
	///
	/// # Errors
	///
	/// Returns [`RouterError`] for invalid patterns, duplicate parameter
	/// names across nesting levels, duplicate route names, or wildcard
	/// entries with children.
	pub fn build(self) -> Result<Router, RouterError> {
		let mut named = HashMap::new();
		let routes = compile(self.routes, &mut named)?;

		let basename_segments = self
			.config
			.basename
			.as_deref()
			.map(|b| Location::parse(b).segments())
			.unwrap_or_default();

		let initial = self.initial.unwrap_or_else(|| Location::parse("/"));
		let history = MemoryHistory::with_initial(initial.clone());

		let inner = Rc::new(RouterInner {
			routes,
			named,
			fallback: self.fallback,
			basename_segments,
			strict_trailing_slash: self.config.strict_trailing_slash,
			history: history.clone(),
			location: Signal::new(initial),
			params: Signal::new(ParamMap::new()),
			mounted: RefCell::new(Vec::new()),
		});

		// The history stack is the single source of location changes:
		// push, replace, and pop all funnel through this listener into
		// the reactive location signal.
		let weak: Weak<RouterInner> = Rc::downgrade(&inner);
		history.listen(move |location, _| {
			if let Some(inner) = weak.upgrade() {
				inner.location.set(location.clone());
			}
		});

		Ok(Router { inner })
	}
}
