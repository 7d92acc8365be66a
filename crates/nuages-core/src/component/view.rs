//! `View` and `ElementView`: the renderable tree.

use std::borrow::Cow;

/// A unified representation of renderable content.
///
/// `View` is the value every component and route handler produces. It can
/// be serialized to HTML with [`View::render_to_string`]; text content and
/// attribute values are escaped during serialization, never on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// An element node.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// Multiple views without a wrapper element.
	Fragment(Vec<View>),
	/// Renders nothing.
	Empty,
}

/// An element node in the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
	/// The tag name (e.g. "div", "a").
	tag: Cow<'static, str>,
	/// Attributes in declaration order.
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	/// Child views.
	children: Vec<View>,
	/// Void elements render without a closing tag.
	is_void: bool,
}

impl ElementView {
	/// Creates an element with the given tag.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoView::into_view));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes in declaration order.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Looks up an attribute value by name.
	pub fn attr_value(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Replaces the children wholesale, returning the rebuilt element.
	///
	/// Used by tree-rewriting passes (the router grafts a child route's
	/// output into its parent's outlet this way).
	pub fn with_children(mut self, children: Vec<View>) -> Self {
		self.children = children;
		self
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl View {
	/// Creates an element view builder.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(IntoView::into_view).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Serializes the view tree to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.write_html(&mut output);
		output
	}

	fn write_html(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					escape_into(value, output);
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
					return;
				}

				output.push('>');
				for child in el.child_views() {
					child.write_html(output);
				}
				output.push_str("</");
				output.push_str(el.tag_name());
				output.push('>');
			}
			View::Text(text) => escape_into(text, output),
			View::Fragment(children) => {
				for child in children {
					child.write_html(output);
				}
			}
			View::Empty => {}
		}
	}
}

/// Escapes HTML-significant characters into `output`.
fn escape_into(input: &str, output: &mut String) {
	for c in input.chars() {
		match c {
			'&' => output.push_str("&amp;"),
			'<' => output.push_str("&lt;"),
			'>' => output.push_str("&gt;"),
			'"' => output.push_str("&quot;"),
			'\'' => output.push_str("&#x27;"),
			_ => output.push(c),
		}
	}
}

/// Conversion into a [`View`].
pub trait IntoView {
	/// Converts `self` into a view.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(self.into())
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(self.into())
	}
}

impl IntoView for Cow<'static, str> {
	fn into_view(self) -> View {
		View::Text(self)
	}
}

impl<V: IntoView> IntoView for Option<V> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<V: IntoView> IntoView for Vec<V> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(IntoView::into_view).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_text_rendering() {
		let view = View::text("Hello");
		assert_eq!(view.render_to_string(), "Hello");
	}

	#[test]
	fn test_text_is_escaped() {
		let view = View::text("<script>alert('x')</script>");
		assert_eq!(
			view.render_to_string(),
			"&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
		);
	}

	#[test]
	fn test_element_with_attrs_and_children() {
		let view = View::element("a")
			.attr("href", "/users/42")
			.child("Profile")
			.into_view();
		assert_eq!(view.render_to_string(), "<a href=\"/users/42\">Profile</a>");
	}

	#[test]
	fn test_attr_values_escaped() {
		let view = View::element("div")
			.attr("title", "a \"quoted\" value")
			.into_view();
		assert_eq!(
			view.render_to_string(),
			"<div title=\"a &quot;quoted&quot; value\"></div>"
		);
	}

	#[test]
	fn test_void_element_has_no_closing_tag() {
		let view = View::element("br").into_view();
		assert_eq!(view.render_to_string(), "<br />");
	}

	#[test]
	fn test_fragment_renders_without_wrapper() {
		let view = View::fragment(vec![View::text("a"), View::text("b")]);
		assert_eq!(view.render_to_string(), "ab");
	}

	#[test]
	fn test_empty_renders_nothing() {
		assert_eq!(View::empty().render_to_string(), "");
	}

	#[test]
	fn test_option_into_view() {
		assert_eq!(None::<View>.into_view(), View::Empty);
		assert_eq!(Some("x").into_view(), View::text("x"));
	}

	#[test]
	fn test_attr_value_lookup() {
		let el = ElementView::new("div").attr("id", "main").attr("class", "wide");
		assert_eq!(el.attr_value("id"), Some("main"));
		assert_eq!(el.attr_value("class"), Some("wide"));
		assert_eq!(el.attr_value("missing"), None);
	}

	#[test]
	fn test_with_children_replaces() {
		let el = ElementView::new("div").child("old");
		let el = el.with_children(vec![View::text("new")]);
		assert_eq!(el.child_views(), &[View::text("new")]);
	}

	#[test]
	fn test_nested_rendering() {
		let view = View::element("ul")
			.children(vec![
				View::element("li").child("one").into_view(),
				View::element("li").child("two").into_view(),
			])
			.into_view();
		assert_eq!(
			view.render_to_string(),
			"<ul><li>one</li><li>two</li></ul>"
		);
	}
}
