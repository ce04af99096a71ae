use reinhardt_html_builder::{HtmlBuilder, html, install};
use reinhardt_html_core::HtmlError;

/// **Category**: Global accessor
#[test]
fn test_install_after_default_builder_is_created_fails() {
	let default_builder = html();
	assert!(default_builder.macro_names().is_empty());

	let result = install(HtmlBuilder::default());
	assert_eq!(result.unwrap_err(), HtmlError::AlreadyInstalled);
	assert!(std::ptr::eq(default_builder, html()));
}
