//! HTML builders module.
//!
//! This module provides the raw-aware builder, the tag catalog, macros,
//! settings and the process-wide accessor.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "builder")]
//! # {
//! use reinhardt_html::builder::HtmlBuilder;
//!
//! let html = HtmlBuilder::default();
//! assert_eq!(html.nav("menu", ()).unwrap().as_str(), "<nav>menu</nav>");
//! # }
//! ```

#[cfg(feature = "builder")]
pub use reinhardt_html_builder::*;
