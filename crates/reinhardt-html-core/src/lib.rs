//! # Reinhardt HTML Core
//!
//! The trust model shared by the Reinhardt HTML helpers.
//!
//! - [`SafeHtml`]: markup that is never escaped again
//! - [`mark_raw`] / [`MarkRaw`]: flag values (or whole collections) as trusted
//! - [`escape`]: escape a value unless it is already trusted
//! - [`Fragment`]: the child content every builder accepts
//! - [`Attributes`]: ordered attribute maps and their serialization
//!
//! ## Example
//!
//! ```
//! use reinhardt_html_core::{Attributes, escape, mark_raw};
//!
//! let user_input = "<script>alert('x')</script>";
//! assert_eq!(escape(user_input), "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;");
//!
//! let trusted = mark_raw("<em>hi</em>");
//! assert_eq!(escape(&trusted), "<em>hi</em>");
//!
//! let attrs = Attributes::from([("class", "note")]);
//! assert_eq!(attrs.render().unwrap(), r#" class="note""#);
//! ```

pub mod attributes;
pub mod error;
pub mod escape;
pub mod fragment;
pub mod safe;

pub use attributes::Attributes;
pub use error::{HtmlError, HtmlResult};
pub use escape::{
	decode, escape_html, escape_html_preserving_entities, is_valid_attribute_name,
	is_valid_tag_name, needs_escaping,
};
pub use fragment::{Fragment, IntoChildren};
pub use safe::{MarkRaw, SafeHtml, escape, mark_raw};
