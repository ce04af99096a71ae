//! Process-wide builder
//!
//! [`install`] may be called once, typically during application startup.
//! [`html`] falls back to a default builder when nothing was installed.

use once_cell::sync::OnceCell;
use reinhardt_html_core::{Fragment, HtmlError, HtmlResult};

use crate::builder::HtmlBuilder;

static HTML: OnceCell<HtmlBuilder> = OnceCell::new();

/// Install the process-wide builder
///
/// Fails with [`HtmlError::AlreadyInstalled`] when a builder was installed
/// before, or when [`html`] already created the default one.
pub fn install(builder: HtmlBuilder) -> HtmlResult<&'static HtmlBuilder> {
	HTML.set(builder).map_err(|_| HtmlError::AlreadyInstalled)?;
	tracing::debug!("installed process-wide HTML builder");
	HTML.get().ok_or(HtmlError::AlreadyInstalled)
}

/// The process-wide builder
pub fn html() -> &'static HtmlBuilder {
	HTML.get_or_init(|| {
		tracing::debug!("no HTML builder installed, using defaults");
		HtmlBuilder::default()
	})
}

/// Escape `value` with the process-wide builder
///
/// # Examples
///
/// ```
/// use reinhardt_html_builder::e;
/// use reinhardt_html_core::mark_raw;
///
/// assert_eq!(e("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
/// assert_eq!(e(mark_raw("<br>")), "<br>");
/// ```
pub fn e(value: impl Into<Fragment>) -> String {
	html().entities(value)
}
