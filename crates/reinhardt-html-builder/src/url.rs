//! URL resolution used by link, script, style and image builders

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reinhardt_html_core::{HtmlError, HtmlResult};
use url::Url;
use url::form_urlencoded;

use crate::settings::{SettingsError, UrlSettings, parse_root};

/// Named parameters for route and action URLs, in insertion order
pub type RouteParameters = IndexMap<String, String>;

/// Characters encoded inside a substituted path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// Prefixes of URLs that are used as given
const ABSOLUTE_PREFIXES: &[&str] = &["#", "//", "mailto:", "tel:"];

/// Resolves application paths, assets, routes and actions to URLs
///
/// `secure` selects the scheme: `Some(true)` for https, `Some(false)` for
/// http, `None` for the generator's default.
pub trait UrlGenerator: Send + Sync {
	fn to(&self, path: &str, secure: Option<bool>) -> HtmlResult<String>;

	fn asset(&self, path: &str, secure: Option<bool>) -> HtmlResult<String>;

	fn route(&self, name: &str, parameters: &RouteParameters) -> HtmlResult<String>;

	fn action(&self, action: &str, parameters: &RouteParameters) -> HtmlResult<String>;
}

/// Returns `true` when `path` needs no root prefix
///
/// Fragments, protocol-relative paths, `mailto:`/`tel:` and URLs with a host
/// are absolute. Anything else, including `javascript:` URLs, is treated as a
/// path below the root.
///
/// # Examples
///
/// ```
/// use reinhardt_html_builder::url::is_absolute_url;
///
/// assert!(is_absolute_url("https://example.com/a"));
/// assert!(is_absolute_url("//cdn.example.com/app.js"));
/// assert!(is_absolute_url("#top"));
/// assert!(is_absolute_url("mailto:team@example.com"));
/// assert!(!is_absolute_url("users/1"));
/// assert!(!is_absolute_url("/users/1"));
/// assert!(!is_absolute_url("javascript:alert(1)"));
/// ```
pub fn is_absolute_url(path: &str) -> bool {
	ABSOLUTE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
		|| Url::parse(path).map(|url| url.has_host()).unwrap_or(false)
}

/// Substitute `{param}` placeholders and append leftovers as a query string
///
/// # Examples
///
/// ```
/// use reinhardt_html_builder::url::{RouteParameters, substitute};
///
/// let mut params = RouteParameters::new();
/// params.insert("id".to_string(), "42".to_string());
/// params.insert("tab".to_string(), "posts".to_string());
///
/// let path = substitute("users.show", "/users/{id}", &params).unwrap();
/// assert_eq!(path, "/users/42?tab=posts");
/// ```
pub fn substitute(name: &str, pattern: &str, parameters: &RouteParameters) -> HtmlResult<String> {
	let mut path = String::with_capacity(pattern.len());
	let mut used: Vec<&str> = Vec::new();
	let mut rest = pattern;

	while let Some(open) = rest.find('{') {
		path.push_str(&rest[..open]);
		let after = &rest[open + 1..];
		let close = after.find('}').ok_or_else(|| {
			HtmlError::invalid_argument(name, format!("unclosed `{{` in pattern {}", pattern))
		})?;
		let param = &after[..close];
		let value = parameters
			.get(param)
			.ok_or_else(|| HtmlError::MissingParameter {
				route: name.to_string(),
				parameter: param.to_string(),
			})?;
		path.extend(utf8_percent_encode(value, PATH_SEGMENT));
		used.push(param);
		rest = &after[close + 1..];
	}
	path.push_str(rest);

	let mut query = form_urlencoded::Serializer::new(String::new());
	let mut has_query = false;
	for (key, value) in parameters {
		if !used.contains(&key.as_str()) {
			query.append_pair(key, value);
			has_query = true;
		}
	}
	if has_query {
		path.push('?');
		path.push_str(&query.finish());
	}

	Ok(path)
}

/// Check that a route or action pattern is absolute and its placeholders
/// are balanced and named
pub(crate) fn check_pattern(pattern: &str) -> Result<(), &'static str> {
	if !pattern.starts_with('/') {
		return Err("must start with '/'");
	}
	let mut placeholder: Option<usize> = None;
	for ch in pattern.chars() {
		placeholder = match (ch, placeholder) {
			('{', Some(_)) => return Err("has a nested `{`"),
			('{', None) => Some(0),
			('}', None) => return Err("has an unmatched `}`"),
			('}', Some(0)) => return Err("has an empty placeholder"),
			('}', Some(_)) => None,
			(_, Some(len)) => Some(len + 1),
			(_, None) => None,
		};
	}
	match placeholder {
		Some(_) => Err("has an unclosed `{`"),
		None => Ok(()),
	}
}

/// [`UrlGenerator`] backed by fixed roots and route tables
#[derive(Debug, Clone)]
pub struct StaticUrlGenerator {
	root: Url,
	asset_root: Option<Url>,
	force_https: bool,
	routes: IndexMap<String, String>,
	actions: IndexMap<String, String>,
}

impl StaticUrlGenerator {
	/// Create a generator for `root` with no routes
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::{StaticUrlGenerator, UrlGenerator};
	///
	/// let urls = StaticUrlGenerator::new("https://example.com").unwrap();
	/// assert_eq!(urls.to("about", None).unwrap(), "https://example.com/about");
	/// ```
	pub fn new(root: &str) -> Result<Self, SettingsError> {
		Ok(Self {
			root: parse_root("root", root)?,
			asset_root: None,
			force_https: false,
			routes: IndexMap::new(),
			actions: IndexMap::new(),
		})
	}

	pub fn from_settings(settings: &UrlSettings) -> Result<Self, SettingsError> {
		settings.validate()?;
		let asset_root = settings
			.asset_root
			.as_deref()
			.map(|root| parse_root("asset_root", root))
			.transpose()?;
		Ok(Self {
			root: parse_root("root", &settings.root)?,
			asset_root,
			force_https: settings.force_https,
			routes: settings.routes.clone(),
			actions: settings.actions.clone(),
		})
	}

	pub fn with_asset_root(mut self, asset_root: &str) -> Result<Self, SettingsError> {
		self.asset_root = Some(parse_root("asset_root", asset_root)?);
		Ok(self)
	}

	pub fn with_force_https(mut self, force_https: bool) -> Self {
		self.force_https = force_https;
		self
	}

	pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.routes.insert(name.into(), pattern.into());
		self
	}

	pub fn with_action(mut self, action: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.actions.insert(action.into(), pattern.into());
		self
	}

	fn scheme(&self, root: &Url, secure: Option<bool>) -> String {
		match secure {
			Some(true) => "https".to_string(),
			Some(false) => "http".to_string(),
			None if self.force_https => "https".to_string(),
			None => root.scheme().to_string(),
		}
	}

	fn join(&self, root: &Url, path: &str, secure: Option<bool>) -> HtmlResult<String> {
		let mut root = root.clone();
		let scheme = self.scheme(&root, secure);
		if root.scheme() != scheme && root.set_scheme(&scheme).is_err() {
			return Err(HtmlError::invalid_argument(
				"url",
				format!("cannot switch {} to {}", root, scheme),
			));
		}

		let base = root.as_str().trim_end_matches('/');
		let path = path.trim_matches('/');
		if path.is_empty() {
			Ok(base.to_string())
		} else {
			Ok(format!("{}/{}", base, path))
		}
	}
}

impl UrlGenerator for StaticUrlGenerator {
	fn to(&self, path: &str, secure: Option<bool>) -> HtmlResult<String> {
		if is_absolute_url(path) {
			return Ok(path.to_string());
		}
		self.join(&self.root, path, secure)
	}

	fn asset(&self, path: &str, secure: Option<bool>) -> HtmlResult<String> {
		if is_absolute_url(path) {
			return Ok(path.to_string());
		}
		let root = self.asset_root.as_ref().unwrap_or(&self.root);
		self.join(root, path, secure)
	}

	fn route(&self, name: &str, parameters: &RouteParameters) -> HtmlResult<String> {
		let pattern = self
			.routes
			.get(name)
			.ok_or_else(|| HtmlError::RouteNotFound(name.to_string()))?;
		let path = substitute(name, pattern, parameters)?;
		self.join(&self.root, &path, None)
	}

	fn action(&self, action: &str, parameters: &RouteParameters) -> HtmlResult<String> {
		let pattern = self
			.actions
			.get(action)
			.ok_or_else(|| HtmlError::ActionNotFound(action.to_string()))?;
		let path = substitute(action, pattern, parameters)?;
		self.join(&self.root, &path, None)
	}
}

impl Default for StaticUrlGenerator {
	fn default() -> Self {
		Self {
			root: Url::parse("http://localhost").expect("static URL is valid"),
			asset_root: None,
			force_https: false,
			routes: IndexMap::new(),
			actions: IndexMap::new(),
		}
	}
}
