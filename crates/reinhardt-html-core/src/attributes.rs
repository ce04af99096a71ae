//! Ordered HTML attribute maps and their serialization

use indexmap::IndexMap;

use crate::error::{HtmlError, HtmlResult};
use crate::escape::is_valid_attribute_name;
use crate::fragment::Fragment;

/// Insertion-ordered attribute map
///
/// Assigning an existing name replaces its value in place, so the attribute
/// keeps its original position. Names bound to `None` are kept for ordering
/// but skipped when rendering.
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::Attributes;
///
/// let attrs = Attributes::new()
///     .with("id", "main")
///     .with("class", "container")
///     .flag("hidden");
/// assert_eq!(attrs.render().unwrap(), r#" id="main" class="container" hidden="hidden""#);
/// assert_eq!(Attributes::new().render().unwrap(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
	entries: IndexMap<String, Option<Fragment>>,
}

impl Attributes {
	pub fn new() -> Self {
		Self {
			entries: IndexMap::new(),
		}
	}

	/// Builder-style [`set`](Self::set)
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Fragment>) -> Self {
		self.set(name, value);
		self
	}

	/// Builder-style [`set_flag`](Self::set_flag)
	pub fn flag(mut self, name: impl Into<String>) -> Self {
		self.set_flag(name);
		self
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<Fragment>) {
		self.entries.insert(name.into(), Some(value.into()));
	}

	/// Assign a value that may be absent
	///
	/// An absent value keeps (or reserves) the name's position but is not
	/// rendered.
	pub fn set_optional(&mut self, name: impl Into<String>, value: Option<Fragment>) {
		self.entries.insert(name.into(), value);
	}

	/// Add a boolean attribute rendered as `name="name"`
	pub fn set_flag(&mut self, name: impl Into<String>) {
		let name = name.into();
		let value = Fragment::Text(name.clone());
		self.entries.insert(name, Some(value));
	}

	pub fn get(&self, name: &str) -> Option<&Fragment> {
		self.entries.get(name).and_then(Option::as_ref)
	}

	pub fn contains_key(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Remove an attribute, keeping the order of the others
	pub fn remove(&mut self, name: &str) -> Option<Fragment> {
		self.entries.shift_remove(name).flatten()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Fragment>)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_ref()))
	}

	/// Append every default whose name is not present yet
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_core::Attributes;
	///
	/// let mut attrs = Attributes::new().with("media", "print");
	/// attrs.merge_defaults(&Attributes::new().with("media", "all").with("rel", "stylesheet"));
	/// assert_eq!(attrs.render().unwrap(), r#" media="print" rel="stylesheet""#);
	/// ```
	pub fn merge_defaults(&mut self, defaults: &Attributes) {
		for (name, value) in &defaults.entries {
			if !self.entries.contains_key(name) {
				self.entries.insert(name.clone(), value.clone());
			}
		}
	}

	/// Assign every entry of `other`, replacing existing values
	pub fn overlay(&mut self, other: Attributes) {
		for (name, value) in other.entries {
			self.entries.insert(name, value);
		}
	}

	/// Serialize as ` key="value"` pairs
	///
	/// Values are escaped unless they are trusted markup; entity references
	/// already present in text values are kept. The result is empty when
	/// nothing is rendered, otherwise it starts with a single space.
	pub fn render(&self) -> HtmlResult<String> {
		self.render_with(false)
	}

	/// Serialize, choosing whether existing entities in text values are
	/// encoded again
	pub fn render_with(&self, double_encode: bool) -> HtmlResult<String> {
		let mut html = String::new();
		for (name, value) in &self.entries {
			let Some(value) = value else {
				continue;
			};
			if !is_valid_attribute_name(name) {
				return Err(HtmlError::InvalidAttributeName(name.clone()));
			}
			html.push(' ');
			html.push_str(name);
			html.push_str("=\"");
			html.push_str(&value.escaped_with(double_encode));
			html.push('"');
		}
		Ok(html)
	}
}

impl From<()> for Attributes {
	fn from(_: ()) -> Self {
		Self::new()
	}
}

impl From<&Attributes> for Attributes {
	fn from(attrs: &Attributes) -> Self {
		attrs.clone()
	}
}

impl<K: Into<String>, V: Into<Fragment>, const N: usize> From<[(K, V); N]> for Attributes {
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

impl<K: Into<String>, V: Into<Fragment>> From<Vec<(K, V)>> for Attributes {
	fn from(pairs: Vec<(K, V)>) -> Self {
		pairs.into_iter().collect()
	}
}

impl<K: Into<String>, V: Into<Fragment>> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut attrs = Attributes::new();
		for (name, value) in iter {
			attrs.set(name, value);
		}
		attrs
	}
}
