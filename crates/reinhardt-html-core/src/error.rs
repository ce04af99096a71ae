//! Error types shared by the HTML helper crates

use thiserror::Error;

/// Errors raised while building HTML
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HtmlError {
	/// A name-based call matched no catalog tag, raw macro or base macro
	#[error("Undefined operation: {0}")]
	UndefinedOperation(String),

	#[error("Invalid tag name: {0:?}")]
	InvalidTagName(String),

	#[error("Invalid attribute name: {0:?}")]
	InvalidAttributeName(String),

	/// A dynamic argument had the wrong shape for the called operation
	#[error("Invalid argument for `{operation}`: {message}")]
	InvalidArgument { operation: String, message: String },

	#[error("Route not defined: {0}")]
	RouteNotFound(String),

	#[error("Action not defined: {0}")]
	ActionNotFound(String),

	#[error("Missing parameter `{parameter}` for {route}")]
	MissingParameter { route: String, parameter: String },

	/// Raised by user-registered macro handlers
	#[error("Macro `{name}` failed: {message}")]
	Macro { name: String, message: String },

	#[error("A process-wide HTML builder is already installed")]
	AlreadyInstalled,
}

impl HtmlError {
	/// Shorthand for [`HtmlError::InvalidArgument`]
	pub fn invalid_argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidArgument {
			operation: operation.into(),
			message: message.into(),
		}
	}

	/// Shorthand for [`HtmlError::Macro`]
	pub fn macro_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Macro {
			name: name.into(),
			message: message.into(),
		}
	}
}

pub type HtmlResult<T> = std::result::Result<T, HtmlError>;
