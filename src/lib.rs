//! # Reinhardt HTML
//!
//! HTML helpers for Reinhardt templates that keep track of which markup is
//! already trusted.
//!
//! Everything the builders produce is [`SafeHtml`]: it can be passed back
//! into another builder, or printed through [`e`], without being escaped a
//! second time. Any other text is escaped on output.
//!
//! ## Feature Flags
//!
//! - `builder` (default) - [`HtmlBuilder`], the tag catalog, macros, settings
//!   and the process-wide accessor
//!
//! Without `builder` only the [`core`] trust model is available.
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "builder")]
//! # {
//! use reinhardt_html::prelude::*;
//!
//! let html = HtmlBuilder::default();
//! html.register_macro("icon", |html, args| {
//!     let name = args.first().and_then(Value::as_str).unwrap_or("dot");
//!     Ok(html.i((), [("class", format!("icon icon-{name}"))])?.into())
//! });
//!
//! let icon = html.call("icon", &[Value::from("star")]).unwrap();
//! let heading = html
//!     .h1([Fragment::from(icon), Fragment::from(" Top & new")], ())
//!     .unwrap();
//! assert_eq!(
//!     heading.as_str(),
//!     r#"<h1><i class="icon icon-star"></i> Top &amp; new</h1>"#
//! );
//! # }
//! ```

pub mod builder;
pub mod core;

pub use reinhardt_html_core::{Attributes, Fragment, HtmlError, HtmlResult, SafeHtml, escape, mark_raw};

#[cfg(feature = "builder")]
pub use reinhardt_html_builder::{
	BaseHtmlBuilder, HtmlBuilder, HtmlSettings, ListItem, Resolution, SettingsError,
	StaticUrlGenerator, UrlGenerator, Value, e, html, install,
};

/// Prelude module for convenient imports
///
/// Import everything commonly needed with:
/// ```rust
/// use reinhardt_html::prelude::*;
/// ```
pub mod prelude {
	pub use crate::{Attributes, Fragment, HtmlError, HtmlResult, SafeHtml, escape, mark_raw};

	pub use reinhardt_html_core::{IntoChildren, MarkRaw};

	#[cfg(feature = "builder")]
	pub use crate::{HtmlBuilder, HtmlSettings, ListItem, Value, e, html, install};
}
