//! Child content accepted by the builders
//!
//! A [`Fragment`] is either untrusted text or trusted [`SafeHtml`]. Builders
//! only ever see fragments, so the escape decision is made in one place:
//! text is escaped, markup is copied through.

use std::borrow::Cow;

use crate::escape::{escape_html, escape_html_preserving_entities};
use crate::safe::SafeHtml;

/// A piece of child content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
	/// Untrusted text, escaped on output
	Text(String),
	/// Trusted markup, emitted verbatim
	Html(SafeHtml),
}

impl Fragment {
	pub fn text(text: impl Into<String>) -> Self {
		Fragment::Text(text.into())
	}

	pub fn is_html(&self) -> bool {
		matches!(self, Fragment::Html(_))
	}

	/// The unescaped string form
	pub fn as_str(&self) -> &str {
		match self {
			Fragment::Text(text) => text,
			Fragment::Html(html) => html.as_str(),
		}
	}

	/// Escaped form, keeping entity references already present in text
	pub fn escaped(&self) -> Cow<'_, str> {
		self.escaped_with(false)
	}

	/// Escaped form
	///
	/// With `double_encode` off, entity references already present in text
	/// fragments are kept as they are.
	pub fn escaped_with(&self, double_encode: bool) -> Cow<'_, str> {
		match self {
			Fragment::Html(html) => Cow::Borrowed(html.as_str()),
			Fragment::Text(text) if double_encode => Cow::Owned(escape_html(text)),
			Fragment::Text(text) => Cow::Owned(escape_html_preserving_entities(text)),
		}
	}

	/// Owned [`escaped`](Self::escaped)
	pub fn into_escaped(self) -> String {
		match self {
			Fragment::Html(html) => html.into_string(),
			Fragment::Text(text) => escape_html_preserving_entities(&text),
		}
	}
}

impl From<SafeHtml> for Fragment {
	fn from(html: SafeHtml) -> Self {
		Fragment::Html(html)
	}
}

impl From<&SafeHtml> for Fragment {
	fn from(html: &SafeHtml) -> Self {
		Fragment::Html(html.clone())
	}
}

impl From<&Fragment> for Fragment {
	fn from(fragment: &Fragment) -> Self {
		fragment.clone()
	}
}

impl From<String> for Fragment {
	fn from(text: String) -> Self {
		Fragment::Text(text)
	}
}

impl From<&String> for Fragment {
	fn from(text: &String) -> Self {
		Fragment::Text(text.clone())
	}
}

impl From<&str> for Fragment {
	fn from(text: &str) -> Self {
		Fragment::Text(text.to_string())
	}
}

impl From<Cow<'_, str>> for Fragment {
	fn from(text: Cow<'_, str>) -> Self {
		Fragment::Text(text.into_owned())
	}
}

macro_rules! fragment_from_display {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Fragment {
				fn from(value: $ty) -> Self {
					Fragment::Text(value.to_string())
				}
			}
		)*
	};
}

fragment_from_display!(
	char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Conversion into a list of child fragments
///
/// A single value becomes a one-element list, `()` means no children, and
/// vectors, arrays and slices keep their order.
pub trait IntoChildren {
	fn into_children(self) -> Vec<Fragment>;
}

impl IntoChildren for () {
	fn into_children(self) -> Vec<Fragment> {
		Vec::new()
	}
}

macro_rules! single_child {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoChildren for $ty {
				fn into_children(self) -> Vec<Fragment> {
					vec![Fragment::from(self)]
				}
			}
		)*
	};
}

single_child!(
	Fragment, &Fragment, SafeHtml, &SafeHtml, String, &String, &str, Cow<'_, str>, char, bool, i8,
	i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: Into<Fragment>> IntoChildren for Vec<T> {
	fn into_children(self) -> Vec<Fragment> {
		self.into_iter().map(Into::into).collect()
	}
}

impl<T: Into<Fragment>, const N: usize> IntoChildren for [T; N] {
	fn into_children(self) -> Vec<Fragment> {
		self.into_iter().map(Into::into).collect()
	}
}

impl<T> IntoChildren for &[T]
where
	for<'a> &'a T: Into<Fragment>,
{
	fn into_children(self) -> Vec<Fragment> {
		self.iter().map(Into::into).collect()
	}
}

impl<T: Into<Fragment>> IntoChildren for Option<T> {
	fn into_children(self) -> Vec<Fragment> {
		self.into_iter().map(Into::into).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_text_is_escaped() {
		assert_eq!(Fragment::from("<b>").escaped(), "&lt;b&gt;");
		assert_eq!(Fragment::from("<b>").into_escaped(), "&lt;b&gt;");
	}

	#[test]
	fn test_html_is_not_escaped() {
		let fragment = Fragment::from(SafeHtml::new("<b>"));
		assert!(fragment.is_html());
		assert_eq!(fragment.escaped(), "<b>");
		assert_eq!(fragment.escaped_with(false), "<b>");
	}

	#[test]
	fn test_escaped_without_double_encoding() {
		let fragment = Fragment::from("Fish &amp; Chips & Peas");
		assert_eq!(fragment.escaped_with(false), "Fish &amp; Chips &amp; Peas");
		assert_eq!(fragment.escaped_with(true), "Fish &amp;amp; Chips &amp; Peas");
	}

	#[test]
	fn test_default_escaping_keeps_entities() {
		let fragment = Fragment::from("&lt;ok&gt; & more");
		assert_eq!(fragment.escaped(), fragment.escaped_with(false));
		assert_eq!(fragment.clone().into_escaped(), "&lt;ok&gt; &amp; more");
	}

	#[test]
	fn test_single_value_becomes_one_child() {
		assert_eq!("hi".into_children(), vec![Fragment::text("hi")]);
		assert_eq!(3_u32.into_children(), vec![Fragment::text("3")]);
		assert!(().into_children().is_empty());
	}

	#[test]
	fn test_collections_keep_order() {
		let children = vec!["a".to_string(), "b".to_string()].into_children();
		assert_eq!(children, vec![Fragment::text("a"), Fragment::text("b")]);

		let owned = ["x".to_string(), "y".to_string()];
		let borrowed = owned.as_slice().into_children();
		assert_eq!(borrowed[1].as_str(), "y");
	}

	#[test]
	fn test_mixed_children() {
		let children = [Fragment::from("<a>"), Fragment::from(SafeHtml::new("<b>"))].into_children();
		let rendered: String = children.iter().map(|c| c.escaped()).collect();
		assert_eq!(rendered, "&lt;a&gt;<b>");
	}
}
