//! Trusted HTML values
//!
//! [`SafeHtml`] marks a string as already-escaped markup. Anything wrapped in
//! it is emitted verbatim by every builder; everything else is escaped.
//! [`mark_raw`] is the single way in, and it is idempotent.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

use crate::fragment::Fragment;

/// HTML content that must not be escaped again
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::{SafeHtml, escape};
///
/// let bold = SafeHtml::new("<b>Bold</b>");
/// assert_eq!(bold.as_str(), "<b>Bold</b>");
/// assert_eq!(escape(&bold), "<b>Bold</b>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SafeHtml(String);

impl SafeHtml {
	/// Wrap already-escaped markup
	pub fn new(content: impl Into<String>) -> Self {
		Self(content.into())
	}

	/// An empty fragment
	pub fn empty() -> Self {
		Self(String::new())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Append trusted markup, keeping the result trusted
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_core::SafeHtml;
	///
	/// let mut html = SafeHtml::new("<li>a</li>");
	/// html.push(&SafeHtml::new("<li>b</li>"));
	/// assert_eq!(html.as_str(), "<li>a</li><li>b</li>");
	/// ```
	pub fn push(&mut self, other: &SafeHtml) {
		self.0.push_str(&other.0);
	}
}

impl AsRef<str> for SafeHtml {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SafeHtml {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<SafeHtml> for String {
	fn from(html: SafeHtml) -> Self {
		html.0
	}
}

impl Serialize for SafeHtml {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl FromIterator<SafeHtml> for SafeHtml {
	fn from_iter<I: IntoIterator<Item = SafeHtml>>(iter: I) -> Self {
		let mut html = SafeHtml::empty();
		for part in iter {
			html.push(&part);
		}
		html
	}
}

/// Values that can be flagged as trusted markup
///
/// Scalars become a single [`SafeHtml`]; containers are mapped elementwise
/// and keep their shape, so a whole list of fragments can be marked in one
/// call.
pub trait MarkRaw {
	type Output;

	fn mark_raw(self) -> Self::Output;
}

impl MarkRaw for SafeHtml {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		self
	}
}

impl MarkRaw for &SafeHtml {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		self.clone()
	}
}

impl MarkRaw for Fragment {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		match self {
			Fragment::Text(text) => SafeHtml(text),
			Fragment::Html(html) => html,
		}
	}
}

impl MarkRaw for String {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		SafeHtml(self)
	}
}

impl MarkRaw for &String {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		SafeHtml(self.clone())
	}
}

impl MarkRaw for &str {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		SafeHtml(self.to_string())
	}
}

impl MarkRaw for Cow<'_, str> {
	type Output = SafeHtml;

	fn mark_raw(self) -> SafeHtml {
		SafeHtml(self.into_owned())
	}
}

macro_rules! mark_raw_via_to_string {
	($($ty:ty),* $(,)?) => {
		$(
			impl MarkRaw for $ty {
				type Output = SafeHtml;

				fn mark_raw(self) -> SafeHtml {
					SafeHtml(self.to_string())
				}
			}
		)*
	};
}

mark_raw_via_to_string!(
	char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: MarkRaw> MarkRaw for Vec<T> {
	type Output = Vec<T::Output>;

	fn mark_raw(self) -> Self::Output {
		self.into_iter().map(MarkRaw::mark_raw).collect()
	}
}

impl<T: MarkRaw, const N: usize> MarkRaw for [T; N] {
	type Output = [T::Output; N];

	fn mark_raw(self) -> Self::Output {
		self.map(MarkRaw::mark_raw)
	}
}

impl<K: Hash + Eq, T: MarkRaw> MarkRaw for IndexMap<K, T> {
	type Output = IndexMap<K, T::Output>;

	fn mark_raw(self) -> Self::Output {
		self.into_iter()
			.map(|(key, value)| (key, value.mark_raw()))
			.collect()
	}
}

/// Flag a value (or every value of a collection) as trusted markup
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::{SafeHtml, mark_raw};
///
/// let html = mark_raw("<b>");
/// assert_eq!(html, SafeHtml::new("<b>"));
/// assert_eq!(mark_raw(html.clone()), html);
///
/// let list = mark_raw(vec!["<a>", "<b>"]);
/// assert_eq!(list, vec![SafeHtml::new("<a>"), SafeHtml::new("<b>")]);
/// ```
pub fn mark_raw<T: MarkRaw>(value: T) -> T::Output {
	value.mark_raw()
}

/// Escape a value unless it is already trusted
///
/// Entity references already present in text are kept, matching the
/// builders' default (`double_encode = false`).
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::{escape, mark_raw};
///
/// assert_eq!(escape("<b>"), "&lt;b&gt;");
/// assert_eq!(escape(mark_raw("<b>")), "<b>");
/// assert_eq!(escape(42_i64), "42");
/// assert_eq!(escape("Tom &amp; Jerry"), "Tom &amp; Jerry");
/// ```
pub fn escape(value: impl Into<Fragment>) -> String {
	value.into().into_escaped()
}
