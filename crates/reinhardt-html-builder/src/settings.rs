//! Builder configuration
//!
//! Settings are plain serde structs so they can live in the application's
//! TOML configuration:
//!
//! ```toml
//! double_encode = false
//! obfuscate_emails = true
//!
//! [url]
//! root = "https://example.com"
//! asset_root = "https://cdn.example.com"
//!
//! [url.routes]
//! "users.show" = "/users/{id}"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use crate::url::check_pattern;

/// Error type for loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting: {0}")]
	Invalid(String),
}

/// Settings for [`HtmlBuilder`](crate::HtmlBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlSettings {
	/// Encode entity references already present in escaped text
	pub double_encode: bool,
	/// Randomize the entity encoding of `mailto` links and addresses
	pub obfuscate_emails: bool,
	/// Appended after `<script>` and stylesheet `<link>` elements
	pub asset_line_ending: String,
	pub url: UrlSettings,
}

impl Default for HtmlSettings {
	fn default() -> Self {
		Self {
			double_encode: false,
			obfuscate_emails: true,
			asset_line_ending: "\n".to_string(),
			url: UrlSettings::default(),
		}
	}
}

/// Settings for [`StaticUrlGenerator`](crate::StaticUrlGenerator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSettings {
	/// Application root, e.g. `https://example.com`
	pub root: String,
	/// Root for assets; `root` is used when unset
	pub asset_root: Option<String>,
	/// Generate https URLs unless a caller explicitly asks otherwise
	pub force_https: bool,
	/// Route name to path pattern with `{param}` placeholders
	pub routes: IndexMap<String, String>,
	/// Controller action to path pattern with `{param}` placeholders
	pub actions: IndexMap<String, String>,
}

impl Default for UrlSettings {
	fn default() -> Self {
		Self {
			root: "http://localhost".to_string(),
			asset_root: None,
			force_https: false,
			routes: IndexMap::new(),
			actions: IndexMap::new(),
		}
	}
}

impl HtmlSettings {
	/// Parse and validate settings from TOML
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_html_builder::HtmlSettings;
	///
	/// let settings = HtmlSettings::from_toml_str(r#"
	/// double_encode = true
	///
	/// [url]
	/// root = "https://example.com"
	/// "#).unwrap();
	/// assert!(settings.double_encode);
	/// assert!(settings.obfuscate_emails);
	/// assert_eq!(settings.url.root, "https://example.com");
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read, parse and validate a TOML settings file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), "Loaded HTML settings");
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		self.url.validate()
	}
}

impl UrlSettings {
	pub fn validate(&self) -> Result<(), SettingsError> {
		parse_root("url.root", &self.root)?;
		if let Some(asset_root) = &self.asset_root {
			parse_root("url.asset_root", asset_root)?;
		}
		for (name, pattern) in self.routes.iter().chain(&self.actions) {
			if let Err(reason) = check_pattern(pattern) {
				return Err(SettingsError::Invalid(format!(
					"pattern for `{}` {}: {}",
					name, reason, pattern
				)));
			}
		}
		Ok(())
	}
}

/// Parse an absolute root URL
pub(crate) fn parse_root(key: &str, value: &str) -> Result<Url, SettingsError> {
	let url = Url::parse(value)
		.map_err(|e| SettingsError::Invalid(format!("{} is not a valid URL ({}): {}", key, e, value)))?;
	if !url.has_host() {
		return Err(SettingsError::Invalid(format!(
			"{} must be an absolute URL with a host: {}",
			key, value
		)));
	}
	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let settings = HtmlSettings::default();
		assert!(!settings.double_encode);
		assert!(settings.obfuscate_emails);
		assert_eq!(settings.asset_line_ending, "\n");
		assert_eq!(settings.url.root, "http://localhost");
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_empty_document_uses_defaults() {
		assert_eq!(HtmlSettings::from_toml_str("").unwrap(), HtmlSettings::default());
	}

	#[test]
	fn test_routes_keep_order() {
		let settings = HtmlSettings::from_toml_str(
			r#"
[url.routes]
home = "/"
"users.show" = "/users/{id}"
"#,
		)
		.unwrap();
		let names: Vec<_> = settings.url.routes.keys().cloned().collect();
		assert_eq!(names, vec!["home", "users.show"]);
	}

	#[test]
	fn test_invalid_root_is_rejected() {
		let error = HtmlSettings::from_toml_str("[url]\nroot = \"not a url\"").unwrap_err();
		assert!(matches!(error, SettingsError::Invalid(_)));
	}

	#[test]
	fn test_relative_pattern_is_rejected() {
		let error = HtmlSettings::from_toml_str("[url.actions]\n\"Home@index\" = \"home\"").unwrap_err();
		assert!(error.to_string().contains("Home@index"));
	}

	#[test]
	fn test_unbalanced_placeholders_are_rejected() {
		for pattern in ["/users/{id", "/users/id}", "/users/{}", "/users/{{id}}"] {
			let document = format!("[url.routes]\n\"users.show\" = \"{}\"", pattern);
			let error = HtmlSettings::from_toml_str(&document).unwrap_err();
			assert!(matches!(error, SettingsError::Invalid(_)), "{pattern}");
			assert!(error.to_string().contains("users.show"));
		}
	}

	#[test]
	fn test_malformed_toml() {
		let error = HtmlSettings::from_toml_str("double_encode = ").unwrap_err();
		assert!(matches!(error, SettingsError::Toml(_)));
	}
}
