//! Static catalog of plain tag names
//!
//! Every name listed here is callable by name through
//! [`HtmlBuilder::call`] and as a typed method such as [`HtmlBuilder::h1`].

use once_cell::sync::Lazy;
use reinhardt_html_core::{Attributes, HtmlResult, IntoChildren, SafeHtml};
use std::collections::HashSet;

use crate::builder::HtmlBuilder;

macro_rules! catalog_tags {
	($($name:ident),* $(,)?) => {
		/// Tag names built generically from children and attributes
		pub const CATALOG_TAGS: &[&str] = &[$(stringify!($name)),*];

		impl HtmlBuilder {
			$(
				#[doc = concat!("`<", stringify!($name), ">` element")]
				pub fn $name(
					&self,
					children: impl IntoChildren,
					attributes: impl Into<Attributes>,
				) -> HtmlResult<SafeHtml> {
					self.tag(stringify!($name), children, attributes)
				}
			)*
		}
	};
}

catalog_tags!(
	noscript, template, section, nav, article, aside, h1, h2, h3, h4, h5, h6, header, footer,
	address, main, p, pre, blockquote, canvas, figure, figcaption, div, em, strong, small, s, cite,
	q, dfn, abbr, data, time, code, samp, kbd, sub, sup, i, b, u, mark, ruby, rt, rp, bdi, bdo,
	span, ins, del, details, summary, menuitem, menu,
);

static CATALOG: Lazy<HashSet<&'static str>> = Lazy::new(|| CATALOG_TAGS.iter().copied().collect());

/// The catalog entry for `name`, if any
pub(crate) fn catalog_tag(name: &str) -> Option<&'static str> {
	CATALOG.get(name).copied()
}

/// Returns `true` when `name` is a catalog tag
///
/// # Examples
///
/// ```
/// use reinhardt_html_builder::is_catalog_tag;
///
/// assert!(is_catalog_tag("figcaption"));
/// assert!(!is_catalog_tag("table"));
/// assert!(!is_catalog_tag("H1"));
/// ```
pub fn is_catalog_tag(name: &str) -> bool {
	CATALOG.contains(name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_catalog_has_no_duplicates() {
		assert_eq!(CATALOG.len(), CATALOG_TAGS.len());
		assert_eq!(CATALOG_TAGS.len(), 54);
	}

	#[test]
	fn test_catalog_excludes_dedicated_builders() {
		for name in ["script", "style", "img", "a", "iframe", "meta", "link", "base", "ol", "ul"] {
			assert!(!is_catalog_tag(name), "{name} should not be a catalog tag");
		}
	}

	#[test]
	fn test_typed_methods_match_tag() {
		let html = HtmlBuilder::default();
		assert_eq!(
			html.section("x", [("id", "s")]).unwrap(),
			html.tag("section", "x", [("id", "s")]).unwrap()
		);
		assert_eq!(html.b("<", ()).unwrap().as_str(), "<b>&lt;</b>");
		assert_eq!(html.main((), ()).unwrap().as_str(), "<main></main>");
	}
}
