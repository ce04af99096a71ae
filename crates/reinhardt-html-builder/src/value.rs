//! Dynamic arguments for name-based calls

use reinhardt_html_core::{Attributes, Fragment, HtmlError, HtmlResult, SafeHtml};

/// An argument passed to [`HtmlBuilder::call`](crate::HtmlBuilder::call)
/// or to a macro handler
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
	#[default]
	Null,
	Fragment(Fragment),
	List(Vec<Value>),
	Attributes(Attributes),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_fragment(&self) -> Option<&Fragment> {
		match self {
			Value::Fragment(fragment) => Some(fragment),
			_ => None,
		}
	}

	/// The unescaped string form of a fragment argument
	pub fn as_str(&self) -> Option<&str> {
		self.as_fragment().map(Fragment::as_str)
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_attributes(&self) -> Option<&Attributes> {
		match self {
			Value::Attributes(attrs) => Some(attrs),
			_ => None,
		}
	}

	/// Read the value as child content
	///
	/// `Null` means no children, a fragment is a single child, and a list must
	/// hold fragments only.
	pub fn to_children(&self, operation: &str) -> HtmlResult<Vec<Fragment>> {
		match self {
			Value::Null => Ok(Vec::new()),
			Value::Fragment(fragment) => Ok(vec![fragment.clone()]),
			Value::List(items) => items
				.iter()
				.enumerate()
				.map(|(index, item)| {
					item.as_fragment().cloned().ok_or_else(|| {
						HtmlError::invalid_argument(
							operation,
							format!("child #{} must be text or HTML, got {}", index, item.kind()),
						)
					})
				})
				.collect(),
			Value::Attributes(_) => Err(HtmlError::invalid_argument(
				operation,
				"children must be text, HTML or a list of them, got attributes",
			)),
		}
	}

	/// Read the value as an attribute map; `Null` means none
	pub fn to_attributes(&self, operation: &str) -> HtmlResult<Attributes> {
		match self {
			Value::Null => Ok(Attributes::new()),
			Value::Attributes(attrs) => Ok(attrs.clone()),
			other => Err(HtmlError::invalid_argument(
				operation,
				format!("expected attributes, got {}", other.kind()),
			)),
		}
	}

	/// Short name of the variant, used in error messages
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Fragment(Fragment::Text(_)) => "text",
			Value::Fragment(Fragment::Html(_)) => "html",
			Value::List(_) => "list",
			Value::Attributes(_) => "attributes",
		}
	}
}

impl From<Fragment> for Value {
	fn from(fragment: Fragment) -> Self {
		Value::Fragment(fragment)
	}
}

impl From<SafeHtml> for Value {
	fn from(html: SafeHtml) -> Self {
		Value::Fragment(Fragment::Html(html))
	}
}

impl From<&str> for Value {
	fn from(text: &str) -> Self {
		Value::Fragment(Fragment::from(text))
	}
}

impl From<String> for Value {
	fn from(text: String) -> Self {
		Value::Fragment(Fragment::Text(text))
	}
}

impl From<Attributes> for Value {
	fn from(attrs: Attributes) -> Self {
		Value::Attributes(attrs)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Value::List(items.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// Convert template-engine arguments
///
/// Objects become attributes (nested values rendered as JSON text), arrays
/// become lists, scalars become text and `null` stays `Null`.
///
/// # Examples
///
/// ```
/// use reinhardt_html_builder::Value;
/// use serde_json::json;
///
/// let value = Value::from(json!({"class": "lead", "data-id": 7}));
/// let attrs = value.as_attributes().unwrap();
/// assert_eq!(attrs.render().unwrap(), r#" class="lead" data-id="7""#);
///
/// assert_eq!(Value::from(json!(["a", 1])).as_list().unwrap().len(), 2);
/// ```
impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::String(text) => Value::Fragment(Fragment::Text(text)),
			serde_json::Value::Bool(flag) => Value::Fragment(Fragment::from(flag)),
			serde_json::Value::Number(number) => Value::Fragment(Fragment::Text(number.to_string())),
			serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
			serde_json::Value::Object(map) => {
				let mut attrs = Attributes::new();
				for (name, value) in map {
					match value {
						serde_json::Value::Null => attrs.set_optional(name, None),
						serde_json::Value::String(text) => attrs.set(name, text),
						other => attrs.set(name, other.to_string()),
					}
				}
				Value::Attributes(attrs)
			}
		}
	}
}
