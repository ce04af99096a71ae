//! Named macro registries
//!
//! Handlers are stored behind `Arc` and cloned out of the lock before they
//! run, so a macro may call back into the builder (including registering
//! other macros) without deadlocking.

use parking_lot::RwLock;
use reinhardt_html_core::{Fragment, HtmlResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::builder::HtmlBuilder;
use crate::value::Value;

/// Handler of a raw macro; its output is marked raw by the dispatcher
pub type RawMacro = Arc<dyn Fn(&HtmlBuilder, &[Value]) -> HtmlResult<Fragment> + Send + Sync>;

/// Handler of a base macro, producing markup as a plain string
pub type BaseMacro = Arc<dyn Fn(&[Value]) -> HtmlResult<String> + Send + Sync>;

/// Thread-safe map from macro name to handler
pub struct MacroRegistry<H> {
	macros: RwLock<HashMap<String, H>>,
}

impl<H: Clone> MacroRegistry<H> {
	pub fn new() -> Self {
		Self {
			macros: RwLock::new(HashMap::new()),
		}
	}

	/// Register `handler` under `name`
	///
	/// Returns `true` when an earlier handler was replaced.
	pub fn register(&self, name: impl Into<String>, handler: H) -> bool {
		self.macros.write().insert(name.into(), handler).is_some()
	}

	/// A clone of the handler registered under `name`
	pub fn get(&self, name: &str) -> Option<H> {
		self.macros.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.macros.read().contains_key(name)
	}

	pub fn remove(&self, name: &str) -> Option<H> {
		self.macros.write().remove(name)
	}

	/// Registered names in sorted order
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.macros.read().keys().cloned().collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.macros.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.macros.read().is_empty()
	}
}

impl<H: Clone> Default for MacroRegistry<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H> fmt::Debug for MacroRegistry<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let macros = self.macros.read();
		let mut names: Vec<&String> = macros.keys().collect();
		names.sort();
		f.debug_struct("MacroRegistry").field("names", &names).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_register_and_get() {
		let registry: MacroRegistry<Arc<str>> = MacroRegistry::new();
		assert!(registry.is_empty());
		assert!(!registry.register("a", Arc::from("first")));
		assert!(registry.contains("a"));
		assert_eq!(registry.get("a").as_deref(), Some("first"));
		assert!(registry.get("b").is_none());
	}

	#[test]
	fn test_register_overwrites() {
		let registry: MacroRegistry<Arc<str>> = MacroRegistry::new();
		registry.register("a", Arc::from("first"));
		assert!(registry.register("a", Arc::from("second")));
		assert_eq!(registry.get("a").as_deref(), Some("second"));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_names_are_sorted() {
		let registry: MacroRegistry<u8> = MacroRegistry::new();
		registry.register("zeta", 1);
		registry.register("alpha", 2);
		assert_eq!(registry.names(), vec!["alpha", "zeta"]);
		assert_eq!(format!("{:?}", registry), r#"MacroRegistry { names: ["alpha", "zeta"] }"#);
		assert_eq!(registry.remove("zeta"), Some(1));
		assert_eq!(registry.names(), vec!["alpha"]);
	}
}
