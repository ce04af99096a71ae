//! Base HTML builder
//!
//! String-producing primitives for links, assets, lists and obfuscated email
//! addresses. [`HtmlBuilder`](crate::HtmlBuilder) wraps every one of them and
//! marks the output raw; use this type directly only when plain strings are
//! wanted.
//!
//! Every piece of caller-provided content goes through [`Fragment`], so
//! trusted markup is copied through and everything else is escaped.

use rand::Rng;
use reinhardt_html_core::{
	Attributes, Fragment, HtmlError, HtmlResult, SafeHtml, decode, escape_html, needs_escaping,
};
use std::fmt;
use std::sync::Arc;

use crate::macros::{BaseMacro, MacroRegistry};
use crate::settings::HtmlSettings;
use crate::url::{RouteParameters, UrlGenerator};
use crate::value::Value;

/// One entry of an `ol`/`ul` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
	/// Rendered as `<li>ITEM</li>`
	Item(Fragment),
	/// A list of the same type, emitted in place without an `<li>`
	Nested(Vec<ListItem>),
	/// Rendered as `<li>LABEL<ul>...</ul></li>`
	Labeled(Fragment, Vec<ListItem>),
}

impl ListItem {
	pub fn item(content: impl Into<Fragment>) -> Self {
		ListItem::Item(content.into())
	}

	pub fn nested(items: impl IntoIterator<Item = ListItem>) -> Self {
		ListItem::Nested(items.into_iter().collect())
	}

	pub fn labeled(label: impl Into<Fragment>, items: impl IntoIterator<Item = ListItem>) -> Self {
		ListItem::Labeled(label.into(), items.into_iter().collect())
	}
}

macro_rules! list_item_from {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for ListItem {
				fn from(content: $ty) -> Self {
					ListItem::Item(Fragment::from(content))
				}
			}
		)*
	};
}

list_item_from!(Fragment, SafeHtml, &SafeHtml, String, &String, &str);

/// String-producing HTML builder
pub struct BaseHtmlBuilder {
	urls: Arc<dyn UrlGenerator>,
	settings: HtmlSettings,
	macros: MacroRegistry<BaseMacro>,
}

impl BaseHtmlBuilder {
	pub fn new(urls: Arc<dyn UrlGenerator>, settings: HtmlSettings) -> Self {
		Self {
			urls,
			settings,
			macros: MacroRegistry::new(),
		}
	}

	pub fn settings(&self) -> &HtmlSettings {
		&self.settings
	}

	pub fn url_generator(&self) -> &Arc<dyn UrlGenerator> {
		&self.urls
	}

	/// Escape a value unless it is trusted markup
	///
	/// Honors the `double_encode` setting.
	pub fn entities(&self, value: impl Into<Fragment>) -> String {
		value
			.into()
			.escaped_with(self.settings.double_encode)
			.into_owned()
	}

	/// Decode entity references
	pub fn decode(&self, value: &str) -> String {
		decode(value)
	}

	/// Serialize attributes as ` key="value"` pairs
	pub fn attributes(&self, attributes: &Attributes) -> HtmlResult<String> {
		attributes.render_with(self.settings.double_encode)
	}

	/// `<script src="...">` for an asset
	pub fn script(
		&self,
		url: &str,
		attributes: Attributes,
		secure: Option<bool>,
	) -> HtmlResult<String> {
		let mut attributes = attributes;
		attributes.set("src", self.urls.asset(url, secure)?);
		Ok(format!(
			"<script{}></script>{}",
			self.attributes(&attributes)?,
			self.settings.asset_line_ending
		))
	}

	/// Stylesheet `<link>` for an asset
	///
	/// `media="all"`, `type="text/css"` and `rel="stylesheet"` are added
	/// unless the caller set them.
	pub fn style(&self, url: &str, attributes: Attributes, secure: Option<bool>) -> HtmlResult<String> {
		let mut attributes = attributes;
		attributes.merge_defaults(&Attributes::from([
			("media", "all"),
			("type", "text/css"),
			("rel", "stylesheet"),
		]));
		attributes.set("href", self.urls.asset(url, secure)?);
		Ok(format!(
			"<link{}>{}",
			self.attributes(&attributes)?,
			self.settings.asset_line_ending
		))
	}

	/// `<img>` for an asset
	pub fn image(
		&self,
		url: &str,
		alt: Option<Fragment>,
		attributes: Attributes,
		secure: Option<bool>,
	) -> HtmlResult<String> {
		let mut attributes = attributes;
		attributes.set_optional("alt", alt);
		let src = self.urls.asset(url, secure)?;
		Ok(format!(
			"<img src=\"{}\"{}>",
			self.entities(src),
			self.attributes(&attributes)?
		))
	}

	/// `<a>` to an application path or absolute URL
	///
	/// Without a title the resolved URL is used as the link text.
	pub fn link(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: Attributes,
		secure: Option<bool>,
	) -> HtmlResult<String> {
		let url = self.urls.to(url, secure)?;
		let title = title.unwrap_or_else(|| Fragment::Text(url.clone()));
		Ok(format!(
			"<a href=\"{}\"{}>{}</a>",
			self.entities(url),
			self.attributes(&attributes)?,
			self.entities(title)
		))
	}

	pub fn secure_link(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: Attributes,
	) -> HtmlResult<String> {
		self.link(url, title, attributes, Some(true))
	}

	/// `<a>` to an asset
	pub fn link_asset(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: Attributes,
		secure: Option<bool>,
	) -> HtmlResult<String> {
		let url = self.urls.asset(url, secure)?;
		self.link(&url, title, attributes, secure)
	}

	pub fn link_secure_asset(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: Attributes,
	) -> HtmlResult<String> {
		self.link_asset(url, title, attributes, Some(true))
	}

	/// `<a>` to a named route
	pub fn link_route(
		&self,
		name: &str,
		title: Option<Fragment>,
		parameters: &RouteParameters,
		attributes: Attributes,
	) -> HtmlResult<String> {
		let url = self.urls.route(name, parameters)?;
		self.link(&url, title, attributes, None)
	}

	/// `<a>` to a controller action
	pub fn link_action(
		&self,
		action: &str,
		title: Option<Fragment>,
		parameters: &RouteParameters,
		attributes: Attributes,
	) -> HtmlResult<String> {
		let url = self.urls.action(action, parameters)?;
		self.link(&url, title, attributes, None)
	}

	/// `mailto:` link
	///
	/// Without a title the (obfuscated) address is used as the link text.
	pub fn mailto(
		&self,
		email: &str,
		title: Option<Fragment>,
		attributes: Attributes,
	) -> HtmlResult<String> {
		let email = self.email(email);
		let title = title.unwrap_or_else(|| Fragment::Html(SafeHtml::new(email.clone())));
		let scheme = if self.settings.obfuscate_emails {
			self.obfuscate("mailto:")
		} else {
			"mailto:".to_string()
		};
		Ok(format!(
			"<a href=\"{}{}\"{}>{}</a>",
			scheme,
			email,
			self.attributes(&attributes)?,
			self.entities(title)
		))
	}

	/// Entity-encode an email address, hiding the `@`
	pub fn email(&self, email: &str) -> String {
		let encoded = if self.settings.obfuscate_emails {
			self.obfuscate(email)
		} else {
			escape_html(email)
		};
		encoded.replace('@', "&#64;")
	}

	/// Randomly entity-encode ASCII characters
	pub fn obfuscate(&self, value: &str) -> String {
		obfuscate_with(value, &mut rand::thread_rng())
	}

	pub fn ol(&self, list: &[ListItem], attributes: Attributes) -> HtmlResult<String> {
		self.listing("ol", list, &attributes)
	}

	pub fn ul(&self, list: &[ListItem], attributes: Attributes) -> HtmlResult<String> {
		self.listing("ul", list, &attributes)
	}

	fn listing(&self, kind: &str, list: &[ListItem], attributes: &Attributes) -> HtmlResult<String> {
		if list.is_empty() {
			return Ok(String::new());
		}

		let mut html = String::new();
		for item in list {
			html.push_str(&self.listing_element(kind, item)?);
		}
		Ok(format!(
			"<{kind}{}>{html}</{kind}>",
			self.attributes(attributes)?
		))
	}

	fn listing_element(&self, kind: &str, item: &ListItem) -> HtmlResult<String> {
		match item {
			ListItem::Item(content) => Ok(format!("<li>{}</li>", self.entities(content))),
			ListItem::Nested(items) => self.listing(kind, items, &Attributes::new()),
			ListItem::Labeled(label, items) => Ok(format!(
				"<li>{}{}</li>",
				self.entities(label),
				self.listing(kind, items, &Attributes::new())?
			)),
		}
	}

	/// Register a base macro, replacing any earlier one with the same name
	pub fn register_macro<F>(&self, name: impl Into<String>, handler: F)
	where
		F: Fn(&[Value]) -> HtmlResult<String> + Send + Sync + 'static,
	{
		let name = name.into();
		let replaced = self.macros.register(name.clone(), Arc::new(handler));
		tracing::debug!(macro_name = %name, replaced, "Registered base HTML macro");
	}

	pub fn has_macro(&self, name: &str) -> bool {
		self.macros.contains(name)
	}

	pub fn macro_names(&self) -> Vec<String> {
		self.macros.names()
	}

	/// Name-based fallback: run the base macro registered under `name`
	pub fn call(&self, name: &str, args: &[Value]) -> HtmlResult<String> {
		let handler = self
			.macros
			.get(name)
			.ok_or_else(|| HtmlError::UndefinedOperation(name.to_string()))?;
		handler(args)
	}
}

impl fmt::Debug for BaseHtmlBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BaseHtmlBuilder")
			.field("settings", &self.settings)
			.field("macros", &self.macros)
			.finish_non_exhaustive()
	}
}

/// Randomly entity-encode ASCII characters using `rng`
///
/// Each character becomes a decimal reference, a hexadecimal reference or
/// itself. Characters with a meaning in HTML are never emitted as
/// themselves and non-ASCII characters are kept unchanged.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use reinhardt_html_builder::base::obfuscate_with;
/// use reinhardt_html_core::decode;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let hidden = obfuscate_with("team@example.com", &mut rng);
/// assert_eq!(decode(&hidden), "team@example.com");
/// ```
pub fn obfuscate_with<R: Rng + ?Sized>(value: &str, rng: &mut R) -> String {
	let mut safe = String::with_capacity(value.len() * 4);
	for ch in value.chars() {
		if !ch.is_ascii() {
			safe.push(ch);
			continue;
		}
		match rng.gen_range(0..3) {
			0 => safe.push_str(&format!("&#{};", ch as u32)),
			1 => safe.push_str(&format!("&#x{:x};", ch as u32)),
			_ if needs_escaping(ch) => safe.push_str(&format!("&#{};", ch as u32)),
			_ => safe.push(ch),
		}
	}
	safe
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::url::StaticUrlGenerator;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn builder() -> BaseHtmlBuilder {
		let urls = StaticUrlGenerator::new("http://example.com")
			.unwrap()
			.with_route("users.show", "/users/{id}");
		BaseHtmlBuilder::new(Arc::new(urls), HtmlSettings::default())
	}

	#[test]
	fn test_script() {
		assert_eq!(
			builder().script("js/app.js", Attributes::new(), None).unwrap(),
			"<script src=\"http://example.com/js/app.js\"></script>\n"
		);
	}

	#[test]
	fn test_style_defaults_after_user_attributes() {
		let html = builder()
			.style("css/app.css", Attributes::from([("media", "print")]), Some(true))
			.unwrap();
		assert_eq!(
			html,
			"<link media=\"print\" type=\"text/css\" rel=\"stylesheet\" href=\"https://example.com/css/app.css\">\n"
		);
	}

	#[test]
	fn test_image() {
		let html = builder()
			.image("logo.png", Some("Logo".into()), Attributes::from([("class", "brand")]), None)
			.unwrap();
		assert_eq!(
			html,
			"<img src=\"http://example.com/logo.png\" class=\"brand\" alt=\"Logo\">"
		);
		let html = builder()
			.image("logo.png", None, Attributes::new(), None)
			.unwrap();
		assert_eq!(html, "<img src=\"http://example.com/logo.png\">");
	}

	#[test]
	fn test_link_title_defaults_to_url() {
		assert_eq!(
			builder().link("about", None, Attributes::new(), None).unwrap(),
			"<a href=\"http://example.com/about\">http://example.com/about</a>"
		);
	}

	#[test]
	fn test_link_escapes_title_unless_trusted() {
		let base = builder();
		assert_eq!(
			base.link("a", Some("<b>".into()), Attributes::new(), None).unwrap(),
			"<a href=\"http://example.com/a\">&lt;b&gt;</a>"
		);
		assert_eq!(
			base.link("a", Some(SafeHtml::new("<b>").into()), Attributes::new(), None)
				.unwrap(),
			"<a href=\"http://example.com/a\"><b></a>"
		);
	}

	#[test]
	fn test_link_route() {
		let mut params = RouteParameters::new();
		params.insert("id".to_string(), "5".to_string());
		assert_eq!(
			builder()
				.link_route("users.show", Some("Profile".into()), &params, Attributes::new())
				.unwrap(),
			"<a href=\"http://example.com/users/5\">Profile</a>"
		);
		assert_eq!(
			builder().link_route("nope", None, &params, Attributes::new()),
			Err(HtmlError::RouteNotFound("nope".to_string()))
		);
	}

	#[test]
	fn test_mailto_without_obfuscation() {
		let settings = HtmlSettings {
			obfuscate_emails: false,
			..HtmlSettings::default()
		};
		let base = BaseHtmlBuilder::new(Arc::new(StaticUrlGenerator::default()), settings);
		assert_eq!(
			base.mailto("a@b.io", None, Attributes::new()).unwrap(),
			"<a href=\"mailto:a&#64;b.io\">a&#64;b.io</a>"
		);
	}

	#[test]
	fn test_mailto_obfuscated_round_trips() {
		let html = builder().mailto("a@b.io", Some("Write".into()), Attributes::new()).unwrap();
		assert!(!html.contains('@'));
		assert_eq!(decode(&html), "<a href=\"mailto:a@b.io\">Write</a>");
	}

	#[test]
	fn test_obfuscate_never_emits_special_characters() {
		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..20 {
			let hidden = obfuscate_with("<\"'>&", &mut rng);
			assert!(!hidden.contains(['<', '>', '"', '\'']));
			assert_eq!(decode(&hidden), "<\"'>&");
		}
	}

	#[test]
	fn test_obfuscate_keeps_non_ascii() {
		let mut rng = StdRng::seed_from_u64(1);
		let hidden = obfuscate_with("é", &mut rng);
		assert_eq!(hidden, "é");
	}

	#[test]
	fn test_lists() {
		let base = builder();
		let list = [
			ListItem::from("one"),
			ListItem::labeled("Group", [ListItem::from("<two>")]),
			ListItem::nested([ListItem::from(SafeHtml::new("<em>3</em>"))]),
		];
		assert_eq!(
			base.ul(&list, Attributes::from([("class", "menu")])).unwrap(),
			"<ul class=\"menu\"><li>one</li><li>Group<ul><li>&lt;two&gt;</li></ul></li><ul><li><em>3</em></li></ul></ul>"
		);
		assert_eq!(base.ol(&[], Attributes::new()).unwrap(), "");
	}

	#[test]
	fn test_call_falls_back_to_base_macros() {
		let base = builder();
		assert_eq!(
			base.call("badge", &[]),
			Err(HtmlError::UndefinedOperation("badge".to_string()))
		);
		base.register_macro("badge", |args| {
			let label = args.first().and_then(Value::as_str).unwrap_or("new");
			Ok(format!("<span class=\"badge\">{}</span>", escape_html(label)))
		});
		assert!(base.has_macro("badge"));
		assert_eq!(
			base.call("badge", &[Value::from("hot")]).unwrap(),
			"<span class=\"badge\">hot</span>"
		);
	}
}
