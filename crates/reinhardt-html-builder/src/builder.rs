//! The raw-aware HTML builder
//!
//! [`HtmlBuilder`] wraps [`BaseHtmlBuilder`] and returns [`SafeHtml`] from
//! every operation, so its output can be nested into other builders (or a
//! template) without being escaped a second time.
//!
//! ## Example
//!
//! ```
//! use reinhardt_html_builder::HtmlBuilder;
//!
//! let html = HtmlBuilder::default();
//! let title = html.h1("Hello & welcome", ()).unwrap();
//! let header = html.header(title, [("class", "hero")]).unwrap();
//! assert_eq!(
//!     header.as_str(),
//!     r#"<header class="hero"><h1>Hello &amp; welcome</h1></header>"#
//! );
//! ```

use reinhardt_html_core::{
	Attributes, Fragment, HtmlError, HtmlResult, IntoChildren, MarkRaw, SafeHtml,
	is_valid_tag_name, mark_raw,
};
use std::fmt;
use std::sync::Arc;

use crate::base::{BaseHtmlBuilder, ListItem};
use crate::macros::{MacroRegistry, RawMacro};
use crate::settings::{HtmlSettings, SettingsError};
use crate::url::{RouteParameters, StaticUrlGenerator, UrlGenerator};

/// HTML builder whose output is always [`SafeHtml`]
pub struct HtmlBuilder {
	pub(crate) base: BaseHtmlBuilder,
	pub(crate) raw_macros: MacroRegistry<RawMacro>,
}

impl HtmlBuilder {
	/// Create a builder with default settings
	pub fn new(urls: impl UrlGenerator + 'static) -> Self {
		Self::with_settings(Arc::new(urls), HtmlSettings::default())
	}

	pub fn with_settings(urls: Arc<dyn UrlGenerator>, settings: HtmlSettings) -> Self {
		Self {
			base: BaseHtmlBuilder::new(urls, settings),
			raw_macros: MacroRegistry::new(),
		}
	}

	/// Create a builder resolving URLs with a [`StaticUrlGenerator`]
	/// configured from `settings.url`
	pub fn from_settings(settings: HtmlSettings) -> Result<Self, SettingsError> {
		let urls = StaticUrlGenerator::from_settings(&settings.url)?;
		Ok(Self::with_settings(Arc::new(urls), settings))
	}

	/// The wrapped string-producing builder
	pub fn base_builder(&self) -> &BaseHtmlBuilder {
		&self.base
	}

	pub fn settings(&self) -> &HtmlSettings {
		self.base.settings()
	}

	/// Flag a value, or every value of a collection, as trusted markup
	pub fn raw<T: MarkRaw>(&self, value: T) -> T::Output {
		mark_raw(value)
	}

	/// Escape a value unless it is already trusted
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::HtmlBuilder;
	///
	/// let html = HtmlBuilder::default();
	/// assert_eq!(html.entities("<b>"), "&lt;b&gt;");
	/// assert_eq!(html.entities(html.raw("<b>")), "<b>");
	/// ```
	pub fn entities(&self, value: impl Into<Fragment>) -> String {
		self.base.entities(value)
	}

	pub fn decode(&self, value: &str) -> String {
		self.base.decode(value)
	}

	/// Serialize attributes as ` key="value"` pairs
	pub fn attributes(&self, attributes: impl Into<Attributes>) -> HtmlResult<String> {
		self.base.attributes(&attributes.into())
	}

	pub fn script(
		&self,
		url: &str,
		attributes: impl Into<Attributes>,
		secure: Option<bool>,
	) -> HtmlResult<SafeHtml> {
		self.base.script(url, attributes.into(), secure).map(mark_raw)
	}

	pub fn style(
		&self,
		url: &str,
		attributes: impl Into<Attributes>,
		secure: Option<bool>,
	) -> HtmlResult<SafeHtml> {
		self.base.style(url, attributes.into(), secure).map(mark_raw)
	}

	pub fn image(
		&self,
		url: &str,
		alt: Option<Fragment>,
		attributes: impl Into<Attributes>,
		secure: Option<bool>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.image(url, alt, attributes.into(), secure)
			.map(mark_raw)
	}

	pub fn link(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: impl Into<Attributes>,
		secure: Option<bool>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.link(url, title, attributes.into(), secure)
			.map(mark_raw)
	}

	pub fn secure_link(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.secure_link(url, title, attributes.into())
			.map(mark_raw)
	}

	pub fn link_asset(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: impl Into<Attributes>,
		secure: Option<bool>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.link_asset(url, title, attributes.into(), secure)
			.map(mark_raw)
	}

	pub fn link_secure_asset(
		&self,
		url: &str,
		title: Option<Fragment>,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.link_secure_asset(url, title, attributes.into())
			.map(mark_raw)
	}

	pub fn link_route(
		&self,
		name: &str,
		title: Option<Fragment>,
		parameters: &RouteParameters,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.link_route(name, title, parameters, attributes.into())
			.map(mark_raw)
	}

	pub fn link_action(
		&self,
		action: &str,
		title: Option<Fragment>,
		parameters: &RouteParameters,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.link_action(action, title, parameters, attributes.into())
			.map(mark_raw)
	}

	pub fn mailto(
		&self,
		email: &str,
		title: Option<Fragment>,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		self.base
			.mailto(email, title, attributes.into())
			.map(mark_raw)
	}

	/// Entity-encoded email address, safe to embed as is
	pub fn email(&self, email: &str) -> SafeHtml {
		mark_raw(self.base.email(email))
	}

	pub fn ol(&self, list: &[ListItem], attributes: impl Into<Attributes>) -> HtmlResult<SafeHtml> {
		self.base.ol(list, attributes.into()).map(mark_raw)
	}

	pub fn ul(&self, list: &[ListItem], attributes: impl Into<Attributes>) -> HtmlResult<SafeHtml> {
		self.base.ul(list, attributes.into()).map(mark_raw)
	}

	/// `<iframe>` with `src` assigned after the given attributes
	pub fn iframe(&self, src: &str, attributes: impl Into<Attributes>) -> HtmlResult<SafeHtml> {
		let mut attributes = attributes.into();
		attributes.set("src", src);
		Ok(mark_raw(format!(
			"<iframe{}></iframe>",
			self.base.attributes(&attributes)?
		)))
	}

	/// `<meta>` with `name` and `content` assigned after the given attributes
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::HtmlBuilder;
	///
	/// let html = HtmlBuilder::default();
	/// let meta = html.meta("viewport", "width=device-width", [("id", "vp")]).unwrap();
	/// assert_eq!(
	///     meta.as_str(),
	///     r#"<meta id="vp" name="viewport" content="width=device-width">"#
	/// );
	/// ```
	pub fn meta(
		&self,
		name: &str,
		content: impl Into<Fragment>,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		let mut attributes = attributes.into();
		attributes.set("name", name);
		attributes.set("content", content);
		self.void_element("meta", &attributes)
	}

	/// `<meta name="description">`
	pub fn description(&self, description: impl Into<Fragment>) -> HtmlResult<SafeHtml> {
		self.meta("description", description, ())
	}

	/// Head `<link>` with `rel` and `href` assigned after the given attributes
	pub fn head_link(
		&self,
		rel: &str,
		href: &str,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		let mut attributes = attributes.into();
		attributes.set("rel", rel);
		attributes.set("href", href);
		self.void_element("link", &attributes)
	}

	/// `<base>` element
	pub fn base(&self, href: &str, target: Option<&str>) -> HtmlResult<SafeHtml> {
		let mut attributes = Attributes::new().with("href", href);
		if let Some(target) = target {
			attributes.set("target", target);
		}
		self.void_element("base", &attributes)
	}

	fn void_element(&self, name: &str, attributes: &Attributes) -> HtmlResult<SafeHtml> {
		Ok(mark_raw(format!(
			"<{name}{}>",
			self.base.attributes(attributes)?
		)))
	}

	/// Build an arbitrary element
	///
	/// Children are escaped unless they are trusted markup. An element without
	/// children still gets a closing tag.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::HtmlBuilder;
	///
	/// let html = HtmlBuilder::default();
	/// let div = html.tag("div", ["hi"], [("class", "x")]).unwrap();
	/// assert_eq!(div.as_str(), r#"<div class="x">hi</div>"#);
	/// assert_eq!(html.entities(&div), div.as_str());
	/// ```
	pub fn tag(
		&self,
		name: &str,
		children: impl IntoChildren,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		self.build_tag(name, &children.into_children(), &attributes.into())
	}

	/// Wrap every element in its own `name` tag
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::HtmlBuilder;
	///
	/// let html = HtmlBuilder::default();
	/// assert_eq!(html.wrap("li", ["a", "b"], ()).unwrap().as_str(), "<li>a</li><li>b</li>");
	/// ```
	pub fn wrap(
		&self,
		name: &str,
		elements: impl IntoChildren,
		attributes: impl Into<Attributes>,
	) -> HtmlResult<SafeHtml> {
		check_tag_name(name)?;
		let attributes = attributes.into();
		elements
			.into_children()
			.iter()
			.map(|element| self.build_tag(name, std::slice::from_ref(element), &attributes))
			.collect()
	}

	pub(crate) fn build_tag(
		&self,
		name: &str,
		children: &[Fragment],
		attributes: &Attributes,
	) -> HtmlResult<SafeHtml> {
		check_tag_name(name)?;
		let double_encode = self.settings().double_encode;
		let mut html = String::new();
		for child in children {
			html.push_str(&child.escaped_with(double_encode));
		}
		Ok(mark_raw(format!(
			"<{name}{}>{html}</{name}>",
			self.base.attributes(attributes)?
		)))
	}
}

fn check_tag_name(name: &str) -> HtmlResult<()> {
	if is_valid_tag_name(name) {
		Ok(())
	} else {
		Err(HtmlError::InvalidTagName(name.to_string()))
	}
}

impl Default for HtmlBuilder {
	fn default() -> Self {
		Self::new(StaticUrlGenerator::default())
	}
}

impl fmt::Debug for HtmlBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HtmlBuilder")
			.field("base", &self.base)
			.field("raw_macros", &self.raw_macros)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tag_without_children_keeps_closing_tag() {
		let html = HtmlBuilder::default();
		assert_eq!(html.tag("div", (), ()).unwrap().as_str(), "<div></div>");
		assert_eq!(html.tag("br", (), ()).unwrap().as_str(), "<br></br>");
	}

	#[test]
	fn test_tag_escapes_untrusted_children() {
		let html = HtmlBuilder::default();
		let tag = html
			.tag("p", [Fragment::from("<i>"), html.raw("<b>").into()], ())
			.unwrap();
		assert_eq!(tag.as_str(), "<p>&lt;i&gt;<b></p>");
	}

	#[test]
	fn test_nested_tags_are_not_escaped_twice() {
		let html = HtmlBuilder::default();
		let inner = html.tag("span", "a & b", ()).unwrap();
		let outer = html.tag("div", inner, ()).unwrap();
		assert_eq!(outer.as_str(), "<div><span>a &amp; b</span></div>");
	}

	#[test]
	fn test_invalid_tag_name() {
		let html = HtmlBuilder::default();
		assert_eq!(
			html.tag("script><img", (), ()),
			Err(HtmlError::InvalidTagName("script><img".to_string()))
		);
		assert!(html.wrap("", ["a"], ()).is_err());
	}

	#[test]
	fn test_wrap_shares_attributes() {
		let html = HtmlBuilder::default();
		let items = html.wrap("span", vec!["x", "<y>"], [("class", "tag")]).unwrap();
		assert_eq!(
			items.as_str(),
			r#"<span class="tag">x</span><span class="tag">&lt;y&gt;</span>"#
		);
		assert!(html.wrap("span", Vec::<String>::new(), ()).unwrap().is_empty());
	}

	#[test]
	fn test_void_head_elements() {
		let html = HtmlBuilder::default();
		assert_eq!(
			html.head_link("icon", "/favicon.ico", [("type", "image/x-icon")])
				.unwrap()
				.as_str(),
			r#"<link type="image/x-icon" rel="icon" href="/favicon.ico">"#
		);
		assert_eq!(
			html.base("https://example.com/", Some("_blank")).unwrap().as_str(),
			r#"<base href="https://example.com/" target="_blank">"#
		);
		assert_eq!(
			html.base("/", None).unwrap().as_str(),
			r#"<base href="/">"#
		);
		assert_eq!(
			html.description("Tips & tricks").unwrap().as_str(),
			r#"<meta name="description" content="Tips &amp; tricks">"#
		);
	}

	#[test]
	fn test_named_parameter_overrides_overlay_in_place() {
		let html = HtmlBuilder::default();
		let frame = html
			.iframe("/embed", [("src", "ignored"), ("width", "300")])
			.unwrap();
		assert_eq!(frame.as_str(), r#"<iframe src="/embed" width="300"></iframe>"#);
	}

	#[test]
	fn test_double_encode_setting() {
		let settings = HtmlSettings {
			double_encode: true,
			..HtmlSettings::default()
		};
		let html = HtmlBuilder::with_settings(Arc::new(StaticUrlGenerator::default()), settings);
		assert_eq!(html.entities("&amp;"), "&amp;amp;");
		assert_eq!(HtmlBuilder::default().entities("&amp;"), "&amp;");
	}
}
