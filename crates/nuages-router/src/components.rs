//! Navigation components: `Link` and `Outlet`.

use nuages_core::{Component, View};

use crate::core::Router;

/// Attribute marking the element the router grafts child output into.
pub(crate) const OUTLET_ATTR: &str = "data-router-outlet";

/// Attribute marking an anchor as router-handled.
///
/// A host-environment binding intercepts activation of anchors carrying
/// this marker and routes them through the history stack instead of
/// letting the environment perform its default full-reload navigation.
pub(crate) const NAV_ATTR: &str = "data-nav";

/// A declarative navigation trigger.
///
/// Renders an anchor whose default full-reload behavior is suppressed via
/// the [`NAV_ATTR`] marker; activation goes through the router's history
/// stack. In a headless environment, [`Link::activate`] is the activation.
///
/// # Example
///
/// ```ignore
/// let link = Link::new("/products?sort=asc", "Products").class("nav-item");
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	/// Destination location string (path plus optional query).
	to: String,
	/// The link text.
	content: String,
	/// Additional CSS class.
	class: Option<String>,
	/// Whether activation replaces the current history entry.
	replace: bool,
	/// External links opt out of router handling entirely.
	external: bool,
	/// Extra attributes.
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a link to `to` with the given text.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			content: content.into(),
			class: None,
			replace: false,
			external: false,
			attrs: Vec::new(),
		}
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Makes activation replace the current history entry instead of
	/// pushing a new one.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Marks the destination as external: rendered with
	/// `target="_blank"` and excluded from router handling.
	pub fn external(mut self, external: bool) -> Self {
		self.external = external;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// The destination.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Whether activation replaces instead of pushing.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Activates the link: the programmatic equivalent of a click on the
	/// rendered anchor. External links are left to the host environment.
	pub fn activate(&self, router: &Router) {
		if self.external {
			return;
		}
		if self.replace {
			router.replace(&self.to);
		} else {
			router.push(&self.to);
		}
	}
}

impl Component for Link {
	fn render(&self) -> View {
		let mut el = View::element("a").attr("href", self.to.clone());

		if let Some(class) = &self.class {
			el = el.attr("class", class.clone());
		}

		if self.external {
			el = el.attr("target", "_blank");
			el = el.attr("rel", "noopener noreferrer");
		} else {
			el = el.attr(NAV_ATTR, "true");
			if self.replace {
				el = el.attr("data-replace", "true");
			}
		}

		for (name, value) in &self.attrs {
			el = el.attr(name.clone(), value.clone());
		}

		View::Element(el.child(self.content.clone()))
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// The insertion point for a child entry's output.
///
/// A parent entry with children renders an `Outlet` where the next
/// entry's output belongs; the router fills it during composition. A
/// parent that matched with a child but rendered no outlet silently
/// drops the child output (a warning is logged).
#[derive(Debug, Clone, Default)]
pub struct Outlet {
	/// Optional id attribute.
	id: Option<String>,
	/// Optional CSS class.
	class: Option<String>,
}

impl Outlet {
	/// Creates an outlet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the id attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
}

impl Component for Outlet {
	fn render(&self) -> View {
		let mut el = View::element("div").attr(OUTLET_ATTR, "true");

		if let Some(id) = &self.id {
			el = el.attr("id", id.clone());
		}

		if let Some(class) = &self.class {
			el = el.attr("class", class.clone());
		}

		View::Element(el)
	}

	fn name() -> &'static str {
		"Outlet"
	}
}
