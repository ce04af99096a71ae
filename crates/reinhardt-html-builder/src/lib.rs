//! # Reinhardt HTML Builder
//!
//! HTML helpers that understand trusted markup.
//!
//! ## Features
//!
//! - [`BaseHtmlBuilder`]: string-producing helpers for scripts, stylesheets,
//!   images, links, obfuscated email addresses and lists
//! - [`HtmlBuilder`]: the same helpers returning [`SafeHtml`], plus generic
//!   `tag`/`wrap` builders and `<head>` elements
//! - A catalog of plain tags (`h1`, `section`, `span`, ...) available as
//!   typed methods and by name
//! - Raw macros and name-based dispatch with [`HtmlBuilder::call`]
//! - A process-wide builder with [`install`], [`html`] and [`e`]
//!
//! ## Example
//!
//! ```
//! use reinhardt_html_builder::HtmlBuilder;
//!
//! let html = HtmlBuilder::default();
//! let title = html.h2("Fish & Chips", ()).unwrap();
//! let card = html.article([title, html.raw("<hr>")], [("class", "card")]).unwrap();
//! assert_eq!(
//!     card.as_str(),
//!     r#"<article class="card"><h2>Fish &amp; Chips</h2><hr></article>"#
//! );
//! ```
//!
//! [`SafeHtml`]: reinhardt_html_core::SafeHtml

pub mod base;
pub mod builder;
pub mod catalog;
pub mod dispatch;
pub mod global;
pub mod macros;
pub mod settings;
pub mod url;
pub mod value;

pub use base::{BaseHtmlBuilder, ListItem};
pub use builder::HtmlBuilder;
pub use catalog::{CATALOG_TAGS, is_catalog_tag};
pub use dispatch::Resolution;
pub use global::{e, html, install};
pub use macros::{BaseMacro, MacroRegistry, RawMacro};
pub use settings::{HtmlSettings, SettingsError, UrlSettings};
pub use self::url::{RouteParameters, StaticUrlGenerator, UrlGenerator};
pub use value::Value;
