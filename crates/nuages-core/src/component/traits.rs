//! The `Component` trait.

use super::view::View;

/// A reusable piece of UI.
///
/// Components are plain values configured through builder methods and
/// rendered on demand. Rendering is pure: a component may be rendered any
/// number of times.
///
/// # Example
///
/// ```ignore
/// struct Badge {
/// 	label: String,
/// }
///
/// impl Component for Badge {
/// 	fn render(&self) -> View {
/// 		View::element("span")
/// 			.attr("class", "badge")
/// 			.child(self.label.clone())
/// 			.into_view()
/// 	}
///
/// 	fn name() -> &'static str {
/// 		"Badge"
/// 	}
/// }
/// ```
pub trait Component {
	/// Renders this component to a view.
	fn render(&self) -> View;

	/// Returns the component's name, for diagnostics.
	fn name() -> &'static str
	where
		Self: Sized;
}
