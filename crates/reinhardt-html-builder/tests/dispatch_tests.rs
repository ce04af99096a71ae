use reinhardt_html_builder::{CATALOG_TAGS, HtmlBuilder, Value};
use reinhardt_html_core::{Attributes, Fragment, HtmlError};
use rstest::*;
use serde_json::json;

#[fixture]
fn html() -> HtmlBuilder {
	let html = HtmlBuilder::default();
	html.register_macro("alert", |html, args| {
		let message = args.first().cloned().unwrap_or_default().to_children("alert")?;
		let level = args
			.get(1)
			.and_then(Value::as_str)
			.unwrap_or("info")
			.to_string();
		Ok(html
			.div(message, [("class", format!("alert alert-{level}"))])?
			.into())
	});
	html
}

/// **Category**: Dispatch
#[rstest]
fn test_every_catalog_tag_dispatches_to_tag(html: HtmlBuilder) {
	for name in CATALOG_TAGS {
		let args = [Value::from(vec!["text"]), Value::from(Attributes::new())];
		assert_eq!(
			html.call(name, &args).unwrap(),
			html.tag(name, ["text"], ()).unwrap(),
			"{name}"
		);
	}
}

/// **Category**: Dispatch
#[rstest]
fn test_raw_macro_call(html: HtmlBuilder) {
	let out = html
		.call("alert", &[Value::from("Saved & done"), Value::from("success")])
		.unwrap();
	assert_eq!(
		out.as_str(),
		r#"<div class="alert alert-success">Saved &amp; done</div>"#
	);
}

/// **Category**: Dispatch
#[rstest]
fn test_raw_macro_errors_propagate(html: HtmlBuilder) {
	let result = html.call("alert", &[Value::from(Attributes::new())]);
	assert!(matches!(result, Err(HtmlError::InvalidArgument { .. })));

	html.register_macro("broken", |_, _| {
		Err(HtmlError::macro_failed("broken", "always fails"))
	});
	assert!(matches!(
		html.call("broken", &[]),
		Err(HtmlError::Macro { .. })
	));
}

/// **Category**: Dispatch
#[rstest]
fn test_register_overwrites_silently(html: HtmlBuilder) {
	html.register_macro("alert", |_, _| Ok(Fragment::text("replaced")));
	assert_eq!(html.call("alert", &[]).unwrap().as_str(), "replaced");
	assert_eq!(html.macro_names(), vec!["alert"]);
}

/// **Category**: Dispatch
#[rstest]
#[case("nav")]
#[case("summary")]
fn test_catalog_name_shadows_macro(html: HtmlBuilder, #[case] name: &str) {
	html.register_macro(name, |_, _| Ok(Fragment::text("macro")));
	assert!(html.has_macro(name));
	assert!(html.resolve(name).is_catalog_tag());
	assert_eq!(
		html.call(name, &[]).unwrap().as_str(),
		format!("<{name}></{name}>")
	);
}

/// **Category**: Dispatch
#[rstest]
fn test_json_arguments(html: HtmlBuilder) {
	let args: Vec<Value> = vec![json!(["a", 1, true]).into(), json!({"data-x": 1, "hidden": null}).into()];
	assert_eq!(
		html.call("code", &args).unwrap().as_str(),
		r#"<code data-x="1">a1true</code>"#
	);
}

/// **Category**: Dispatch
#[rstest]
fn test_base_fallback(html: HtmlBuilder) {
	assert!(html.resolve("counter").is_base());
	assert_eq!(
		html.call("counter", &[]),
		Err(HtmlError::UndefinedOperation("counter".to_string()))
	);

	html.base_builder().register_macro("counter", |args| Ok(format!("<i>{}</i>", args.len())));
	assert!(html.base_builder().has_macro("counter"));
	assert_eq!(
		html.call("counter", &[Value::Null, Value::Null]).unwrap().as_str(),
		"<i>2</i>"
	);
}
