//! Name-based dispatch
//!
//! A call by name is resolved in a fixed order: catalog tag, then raw macro,
//! then the base builder's own macros.

use reinhardt_html_core::{Fragment, HtmlError, HtmlResult, SafeHtml, mark_raw};
use std::fmt;
use std::sync::Arc;

use crate::builder::HtmlBuilder;
use crate::catalog::{catalog_tag, is_catalog_tag};
use crate::macros::RawMacro;
use crate::value::Value;

/// How a name is handled by [`HtmlBuilder::call`]
#[derive(Clone)]
pub enum Resolution {
	/// Built with [`HtmlBuilder::tag`]
	CatalogTag(&'static str),
	/// Handled by a registered raw macro
	RawMacro(RawMacro),
	/// Handed to the base builder
	Base,
}

impl Resolution {
	pub fn is_catalog_tag(&self) -> bool {
		matches!(self, Resolution::CatalogTag(_))
	}

	pub fn is_raw_macro(&self) -> bool {
		matches!(self, Resolution::RawMacro(_))
	}

	pub fn is_base(&self) -> bool {
		matches!(self, Resolution::Base)
	}
}

impl fmt::Debug for Resolution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Resolution::CatalogTag(name) => f.debug_tuple("CatalogTag").field(name).finish(),
			Resolution::RawMacro(_) => f.write_str("RawMacro"),
			Resolution::Base => f.write_str("Base"),
		}
	}
}

impl HtmlBuilder {
	/// Register a macro whose output is trusted markup
	///
	/// An existing macro with the same name is replaced. Names from the tag
	/// catalog are accepted but never reached through [`call`](Self::call).
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::{HtmlBuilder, Value};
	/// use reinhardt_html_core::Fragment;
	///
	/// let html = HtmlBuilder::default();
	/// html.register_macro("badge", |html, args| {
	///     let label = args.first().cloned().unwrap_or_default();
	///     let children = label.to_children("badge")?;
	///     Ok(html.tag("span", children, [("class", "badge")])?.into())
	/// });
	///
	/// let badge = html.call("badge", &[Value::from("new")]).unwrap();
	/// assert_eq!(badge.as_str(), r#"<span class="badge">new</span>"#);
	/// ```
	pub fn register_macro<F>(&self, name: impl Into<String>, handler: F)
	where
		F: Fn(&HtmlBuilder, &[Value]) -> HtmlResult<Fragment> + Send + Sync + 'static,
	{
		let name = name.into();
		if is_catalog_tag(&name) {
			tracing::warn!(
				name = %name,
				"raw macro is shadowed by the tag catalog and will not be dispatched"
			);
		}
		let replaced = self.raw_macros.register(name.clone(), Arc::new(handler));
		tracing::debug!(name = %name, replaced, "registered raw macro");
	}

	pub fn has_macro(&self, name: &str) -> bool {
		self.raw_macros.contains(name)
	}

	/// Registered raw macro names, sorted
	pub fn macro_names(&self) -> Vec<String> {
		self.raw_macros.names()
	}

	/// Decide how `name` would be handled, without calling anything
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::HtmlBuilder;
	///
	/// let html = HtmlBuilder::default();
	/// assert!(html.resolve("article").is_catalog_tag());
	/// assert!(html.resolve("anything").is_base());
	/// ```
	pub fn resolve(&self, name: &str) -> Resolution {
		if let Some(tag) = catalog_tag(name) {
			return Resolution::CatalogTag(tag);
		}
		match self.raw_macros.get(name) {
			Some(handler) => Resolution::RawMacro(handler),
			None => Resolution::Base,
		}
	}

	/// Call a catalog tag or macro by name
	///
	/// Catalog tags read `args` as `(children, attributes)`. Raw macro output
	/// and base macro output are both returned as trusted markup. Names that
	/// resolve nowhere fail with [`HtmlError::UndefinedOperation`].
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::{HtmlBuilder, Value};
	/// use reinhardt_html_core::Attributes;
	///
	/// let html = HtmlBuilder::default();
	/// let args = [Value::from(vec!["text"]), Value::from(Attributes::new())];
	/// assert_eq!(html.call("h1", &args).unwrap(), html.tag("h1", ["text"], ()).unwrap());
	/// assert!(html.call("nope", &[]).is_err());
	/// ```
	pub fn call(&self, name: &str, args: &[Value]) -> HtmlResult<SafeHtml> {
		let resolution = self.resolve(name);
		tracing::trace!(name, resolution = ?resolution, "dispatching");
		match resolution {
			Resolution::CatalogTag(tag) => self.call_catalog_tag(tag, args),
			Resolution::RawMacro(handler) => handler(self, args).map(mark_raw),
			Resolution::Base => self.base.call(name, args).map(mark_raw),
		}
	}

	fn call_catalog_tag(&self, tag: &str, args: &[Value]) -> HtmlResult<SafeHtml> {
		if args.len() > 2 {
			return Err(HtmlError::invalid_argument(
				tag,
				format!("expected at most 2 arguments, got {}", args.len()),
			));
		}
		let null = Value::Null;
		let children = args.first().unwrap_or(&null).to_children(tag)?;
		let attributes = args.get(1).unwrap_or(&null).to_attributes(tag)?;
		self.build_tag(tag, &children, &attributes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_html_core::Attributes;

	#[test]
	fn test_resolution_order() {
		let html = HtmlBuilder::default();
		html.register_macro("div", |_, _| Ok(Fragment::text("macro")));
		html.register_macro("card", |_, _| Ok(Fragment::text("card")));

		assert!(html.resolve("div").is_catalog_tag());
		assert!(html.resolve("card").is_raw_macro());
		assert!(html.resolve("unknown").is_base());
		assert_eq!(format!("{:?}", html.resolve("div")), r#"CatalogTag("div")"#);
	}

	#[test]
	fn test_catalog_wins_over_raw_macro() {
		let html = HtmlBuilder::default();
		html.register_macro("span", |_, _| Ok(Fragment::text("macro")));
		assert!(html.has_macro("span"));
		assert_eq!(html.call("span", &[]).unwrap().as_str(), "<span></span>");
	}

	#[test]
	fn test_raw_macro_output_is_trusted() {
		let html = HtmlBuilder::default();
		html.register_macro("hr", |_, _| Ok(Fragment::text("<hr>")));
		let out = html.call("hr", &[]).unwrap();
		assert_eq!(out.as_str(), "<hr>");
		assert_eq!(html.entities(&out), "<hr>");
	}

	#[test]
	fn test_base_fallback_output_is_trusted() {
		let html = HtmlBuilder::default();
		html.base_builder()
			.register_macro("divider", |_| Ok("<hr class=\"divider\">".to_string()));
		assert_eq!(
			html.call("divider", &[]).unwrap().as_str(),
			r#"<hr class="divider">"#
		);
	}

	#[test]
	fn test_undefined_operation() {
		let html = HtmlBuilder::default();
		assert_eq!(
			html.call("table", &[]),
			Err(HtmlError::UndefinedOperation("table".to_string()))
		);
	}

	#[test]
	fn test_catalog_argument_shapes() {
		let html = HtmlBuilder::default();
		let attrs = Value::from(Attributes::from([("id", "x")]));

		assert_eq!(
			html.call("p", &[Value::Null, attrs.clone()]).unwrap().as_str(),
			r#"<p id="x"></p>"#
		);
		assert!(matches!(
			html.call("p", &[attrs.clone()]),
			Err(HtmlError::InvalidArgument { .. })
		));
		assert!(matches!(
			html.call("p", &[Value::from("a"), Value::from("b")]),
			Err(HtmlError::InvalidArgument { .. })
		));
		assert!(matches!(
			html.call("p", &[Value::Null, Value::Null, Value::Null]),
			Err(HtmlError::InvalidArgument { .. })
		));
	}

	#[test]
	fn test_macro_can_call_back_into_builder() {
		let html = HtmlBuilder::default();
		html.register_macro("inner", |html, _| Ok(html.em("x", ())?.into()));
		html.register_macro("outer", |html, _| {
			html.register_macro("late", |_, _| Ok(Fragment::text("late")));
			Ok(html.call("inner", &[])?.into())
		});
		assert_eq!(html.call("outer", &[]).unwrap().as_str(), "<em>x</em>");
		assert!(html.has_macro("late"));
		assert_eq!(html.macro_names(), vec!["inner", "late", "outer"]);
	}
}
