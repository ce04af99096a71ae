//! Trust model shared by every HTML helper.
//!
//! This module re-exports [`SafeHtml`], the escaping functions and the
//! attribute map.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_html::core::{Attributes, SafeHtml, escape};
//!
//! assert_eq!(escape(SafeHtml::new("<br>")), "<br>");
//! assert_eq!(Attributes::from([("id", "a")]).render().unwrap(), r#" id="a""#);
//! ```

pub use reinhardt_html_core::*;
