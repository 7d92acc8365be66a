//! Route registration entries and the compiled route tree.

use std::collections::HashMap;
use std::rc::Rc;

use nuages_core::View;

use crate::error::{ParamsError, RouterError};
use crate::params::{FromParams, ParamMap, Params};
use crate::pattern::RoutePattern;

pub(crate) type ViewFactory = Rc<dyn Fn() -> View>;
type TypedFactory = Rc<dyn Fn(&ParamMap) -> Result<View, ParamsError>>;
type GuardPredicate = Rc<dyn Fn() -> bool>;

/// What a matched entry does when it is rendered.
pub(crate) enum Handler {
	/// Renders a view.
	View(ViewFactory),
	/// Extracts typed parameters, then renders a view.
	Typed(TypedFactory),
	/// Performs a replace-navigation to another location instead of
	/// rendering.
	Redirect(String),
}

impl Handler {
	pub(crate) fn render(&self, params: &ParamMap) -> Result<View, ParamsError> {
		match self {
			Handler::View(factory) => Ok(factory()),
			Handler::Typed(factory) => factory(params),
			Handler::Redirect(_) => Ok(View::Empty),
		}
	}
}

/// An access guard: predicate plus the location to fall back to.
///
/// A failing predicate never renders the guarded subtree; the router
/// replace-navigates to `redirect_to` instead, so the guarded location
/// does not become a back-navigable history entry.
pub(crate) struct Guard {
	pub(crate) predicate: GuardPredicate,
	pub(crate) redirect_to: String,
}

/// A route registration entry.
///
/// Entries form a tree: a parent's pattern consumes a prefix of the
/// location and its children match the residual. Sibling order is
/// declaration order, except that index entries win when the residual is
/// empty and wildcard entries are only tried after everything else.
///
/// # Example
///
/// ```ignore
/// Route::new("products", products_layout)
/// 	.child(Route::index(product_list))
/// 	.child(Route::typed(":productId", |Params(id): Params<i64>| {
/// 		product_detail(id)
/// 	}))
/// ```
pub struct Route {
	pattern: RoutePattern,
	name: Option<String>,
	handler: Handler,
	guard: Option<Guard>,
	children: Vec<Route>,
}

impl Route {
	/// Creates a route rendering `component`.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid. Use [`Route::parse`] for
	/// fallible construction.
	pub fn new<F>(pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + 'static,
	{
		Self::parse(pattern, component)
			.unwrap_or_else(|e| panic!("invalid route pattern '{pattern}': {e}"))
	}

	/// Creates a route rendering `component`, rejecting bad patterns.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern does not
	/// parse.
	pub fn parse<F>(pattern: &str, component: F) -> Result<Self, RouterError>
	where
		F: Fn() -> View + 'static,
	{
		Ok(Self {
			pattern: compile_pattern(pattern)?,
			name: None,
			handler: Handler::View(Rc::new(component)),
			guard: None,
			children: Vec::new(),
		})
	}

	/// Creates an index entry: matches only when the residual path is
	/// empty at its nesting level.
	pub fn index<F>(component: F) -> Self
	where
		F: Fn() -> View + 'static,
	{
		Self {
			pattern: RoutePattern::parse("").expect("empty pattern is valid"),
			name: None,
			handler: Handler::View(Rc::new(component)),
			guard: None,
			children: Vec::new(),
		}
	}

	/// Creates a route whose handler receives typed parameters.
	///
	/// Extraction runs at render time over the chain's merged parameters;
	/// a failed extraction renders the router's fallback.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn typed<T, F>(pattern: &str, handler: F) -> Self
	where
		T: FromParams + 'static,
		F: Fn(Params<T>) -> View + 'static,
	{
		let factory: TypedFactory = Rc::new(move |params: &ParamMap| {
			let extracted = Params::<T>::from_params(params)?;
			Ok(handler(extracted))
		});
		Self {
			pattern: compile_pattern(pattern)
				.unwrap_or_else(|e| panic!("invalid route pattern '{pattern}': {e}")),
			name: None,
			handler: Handler::Typed(factory),
			guard: None,
			children: Vec::new(),
		}
	}

	/// Creates a route that replace-navigates to `to` whenever it
	/// matches.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn redirect(pattern: &str, to: impl Into<String>) -> Self {
		Self {
			pattern: compile_pattern(pattern)
				.unwrap_or_else(|e| panic!("invalid route pattern '{pattern}': {e}")),
			name: None,
			handler: Handler::Redirect(to.into()),
			guard: None,
			children: Vec::new(),
		}
	}

	/// Names this route for reverse URL generation.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Guards this route (and its whole subtree) behind `predicate`.
	///
	/// When the predicate returns `false` at render time, the router
	/// replace-navigates to `redirect_to` and renders nothing of the
	/// guarded subtree.
	pub fn guard<P>(mut self, predicate: P, redirect_to: impl Into<String>) -> Self
	where
		P: Fn() -> bool + 'static,
	{
		self.guard = Some(Guard {
			predicate: Rc::new(predicate),
			redirect_to: redirect_to.into(),
		});
		self
	}

	/// Appends a child entry.
	pub fn child(mut self, child: Route) -> Self {
		self.children.push(child);
		self
	}

	/// Appends several child entries in order.
	pub fn children(mut self, children: impl IntoIterator<Item = Route>) -> Self {
		self.children.extend(children);
		self
	}

	/// The route's name, if any.
	pub fn route_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// The route's pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.field("has_guard", &self.guard.is_some())
			.field("children", &self.children)
			.finish()
	}
}

fn compile_pattern(pattern: &str) -> Result<RoutePattern, RouterError> {
	RoutePattern::parse(pattern).map_err(|source| RouterError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

/// A compiled entry in the route tree.
///
/// Produced from [`Route`] at registration time, after validation. Nodes
/// are reference-counted so the mounted-level cache can test identity
/// cheaply.
pub(crate) struct RouteNode {
	pub(crate) pattern: RoutePattern,
	pub(crate) name: Option<String>,
	pub(crate) handler: Handler,
	pub(crate) guard: Option<Guard>,
	pub(crate) children: Vec<Rc<RouteNode>>,
}

impl std::fmt::Debug for RouteNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteNode")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.field("has_guard", &self.guard.is_some())
			.field("children", &self.children.len())
			.finish()
	}
}

/// Compiles a forest of registration entries, enforcing the
/// registration-time invariants:
///
/// - a child must not re-declare a parameter name any ancestor captures
/// - a wildcard entry cannot have children
/// - route names are unique; each named route records its absolute
///   pattern for reverse URL generation
pub(crate) fn compile(
	routes: Vec<Route>,
	named: &mut HashMap<String, RoutePattern>,
) -> Result<Vec<Rc<RouteNode>>, RouterError> {
	let root = RoutePattern::parse("").expect("empty pattern is valid");
	compile_level(routes, &[], &root, named)
}

fn compile_level(
	routes: Vec<Route>,
	ancestor_params: &[String],
	prefix: &RoutePattern,
	named: &mut HashMap<String, RoutePattern>,
) -> Result<Vec<Rc<RouteNode>>, RouterError> {
	let mut nodes = Vec::with_capacity(routes.len());
	for route in routes {
		let Route {
			pattern,
			name,
			handler,
			guard,
			children,
		} = route;

		for param in pattern.param_names() {
			if ancestor_params.iter().any(|p| p == param) {
				return Err(RouterError::DuplicateParam {
					name: param.to_string(),
					pattern: pattern.raw().to_string(),
				});
			}
		}

		if pattern.has_wildcard() && !children.is_empty() {
			return Err(RouterError::WildcardWithChildren(
				pattern.raw().to_string(),
			));
		}

		let full_pattern = prefix.join(&pattern);
		if let Some(route_name) = &name {
			if named
				.insert(route_name.clone(), full_pattern.clone())
				.is_some()
			{
				return Err(RouterError::DuplicateRouteName(route_name.clone()));
			}
		}

		let mut params: Vec<String> = ancestor_params.to_vec();
		params.extend(pattern.param_names().iter().map(|s| s.to_string()));
		let children = compile_level(children, &params, &full_pattern, named)?;

		nodes.push(Rc::new(RouteNode {
			pattern,
			name,
			handler,
			guard,
			children,
		}));
	}
	Ok(nodes)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn view() -> View {
		View::Empty
	}

	#[test]
	fn test_route_new() {
		let route = Route::new("products", view);
		assert!(route.route_name().is_none());
		assert_eq!(route.pattern().raw(), "products");
	}

	#[test]
	fn test_route_parse_rejects_bad_pattern() {
		let result = Route::parse("a/*/b", view);
		assert!(matches!(
			result,
			Err(RouterError::InvalidPattern { .. })
		));
	}

	#[test]
	#[should_panic(expected = "invalid route pattern")]
	fn test_route_new_panics_on_bad_pattern() {
		let _ = Route::new("a/*/b", view);
	}

	#[test]
	fn test_index_route_has_index_pattern() {
		let route = Route::index(view);
		assert!(route.pattern().is_index());
	}

	#[test]
	fn test_with_name() {
		let route = Route::new("products", view).with_name("products");
		assert_eq!(route.route_name(), Some("products"));
	}

	#[test]
	fn test_compile_assigns_absolute_named_patterns() {
		let routes = vec![
			Route::new("products", view).child(
				Route::new(":productId", view).with_name("product_detail"),
			),
		];
		let mut named = HashMap::new();
		compile(routes, &mut named).expect("compiles");

		let full = named.get("product_detail").expect("registered");
		let params = HashMap::from([("productId".to_string(), "5".to_string())]);
		assert_eq!(full.reverse(&params).expect("reverses"), "/products/5");
	}

	#[test]
	fn test_compile_rejects_duplicate_params_across_levels() {
		let routes = vec![
			Route::new("users/:id", view).child(Route::new("posts/:id", view)),
		];
		let mut named = HashMap::new();
		let err = compile(routes, &mut named).expect_err("rejected");
		assert_eq!(
			err,
			RouterError::DuplicateParam {
				name: "id".to_string(),
				pattern: "posts/:id".to_string(),
			}
		);
	}

	#[test]
	fn test_compile_allows_same_param_in_sibling_branches() {
		let routes = vec![
			Route::new("users/:id", view),
			Route::new("posts/:id", view),
		];
		let mut named = HashMap::new();
		assert!(compile(routes, &mut named).is_ok());
	}

	#[test]
	fn test_compile_rejects_wildcard_with_children() {
		let routes = vec![Route::new("files/*", view).child(Route::index(view))];
		let mut named = HashMap::new();
		let err = compile(routes, &mut named).expect_err("rejected");
		assert!(matches!(err, RouterError::WildcardWithChildren(_)));
	}

	#[test]
	fn test_compile_rejects_duplicate_names() {
		let routes = vec![
			Route::new("a", view).with_name("dup"),
			Route::new("b", view).with_name("dup"),
		];
		let mut named = HashMap::new();
		let err = compile(routes, &mut named).expect_err("rejected");
		assert_eq!(err, RouterError::DuplicateRouteName("dup".to_string()));
	}
}
