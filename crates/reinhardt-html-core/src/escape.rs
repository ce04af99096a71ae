//! HTML entity escaping primitives
//!
//! Escaped characters:
//! - `&` → `&amp;`
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`
//!
//! These functions know nothing about [`SafeHtml`](crate::SafeHtml); use
//! [`escape`](crate::escape) when the value may already be trusted.

fn push_escaped(out: &mut String, ch: char) {
	match ch {
		'&' => out.push_str("&amp;"),
		'<' => out.push_str("&lt;"),
		'>' => out.push_str("&gt;"),
		'"' => out.push_str("&quot;"),
		'\'' => out.push_str("&#x27;"),
		_ => out.push(ch),
	}
}

/// Returns `true` for characters that [`escape_html`] rewrites
pub fn needs_escaping(ch: char) -> bool {
	matches!(ch, '&' | '<' | '>' | '"' | '\'')
}

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::escape_html;
///
/// assert_eq!(escape_html("Hello, World!"), "Hello, World!");
/// assert_eq!(escape_html("<b>"), "&lt;b&gt;");
/// assert_eq!(escape_html("5 < 10 & 10 > 5"), "5 &lt; 10 &amp; 10 &gt; 5");
/// assert_eq!(escape_html("&amp;"), "&amp;amp;");
/// ```
pub fn escape_html(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		push_escaped(&mut result, ch);
	}
	result
}

/// Escape HTML special characters, leaving existing entity references intact
///
/// A bare `&` is still encoded; only well-formed references such as `&amp;`,
/// `&#39;` or `&#x27;` pass through untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::escape_html_preserving_entities;
///
/// assert_eq!(escape_html_preserving_entities("Tom &amp; Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape_html_preserving_entities("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape_html_preserving_entities("&#60;b&#x3E;"), "&#60;b&#x3E;");
/// assert_eq!(escape_html_preserving_entities("<&nope"), "&lt;&amp;nope");
/// ```
pub fn escape_html_preserving_entities(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	let mut rest = text;

	while let Some(ch) = rest.chars().next() {
		if ch == '&'
			&& let Some(len) = entity_len(rest)
		{
			result.push_str(&rest[..len]);
			rest = &rest[len..];
			continue;
		}
		push_escaped(&mut result, ch);
		rest = &rest[ch.len_utf8()..];
	}
	result
}

/// Length in bytes of the entity reference at the start of `text`, if any.
///
/// `text` must start with `&`.
fn entity_len(text: &str) -> Option<usize> {
	let bytes = text.as_bytes();
	let mut i = 1;

	if bytes.get(i) == Some(&b'#') {
		i += 1;
		let hex = matches!(bytes.get(i), Some(b'x') | Some(b'X'));
		if hex {
			i += 1;
		}
		let start = i;
		while i < bytes.len()
			&& (if hex {
				bytes[i].is_ascii_hexdigit()
			} else {
				bytes[i].is_ascii_digit()
			}) {
			i += 1;
		}
		if i == start {
			return None;
		}
	} else {
		let start = i;
		while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
			i += 1;
		}
		if i == start || !bytes[start].is_ascii_alphabetic() {
			return None;
		}
	}

	(bytes.get(i) == Some(&b';')).then_some(i + 1)
}

fn decode_reference(reference: &str) -> Option<char> {
	match reference {
		"amp" => Some('&'),
		"lt" => Some('<'),
		"gt" => Some('>'),
		"quot" => Some('"'),
		"apos" => Some('\''),
		"nbsp" => Some('\u{a0}'),
		_ => {
			let number = reference.strip_prefix('#')?;
			let code = match number.strip_prefix(['x', 'X']) {
				Some(hex) => u32::from_str_radix(hex, 16).ok()?,
				None => number.parse::<u32>().ok()?,
			};
			char::from_u32(code)
		}
	}
}

/// Decode HTML entity references
///
/// Handles the named references produced by [`escape_html`] plus `&apos;`
/// and `&nbsp;`, and any decimal or hexadecimal character reference.
/// Unknown references are kept verbatim.
///
/// # Examples
///
/// ```
/// use reinhardt_html_core::decode;
///
/// assert_eq!(decode("&lt;div&gt;"), "<div>");
/// assert_eq!(decode("&#x27;&#39;"), "''");
/// assert_eq!(decode("&#109;ail&#x40;example.com"), "mail@example.com");
/// assert_eq!(decode("&copy; & more"), "&copy; & more");
/// ```
pub fn decode(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut rest = text;

	while let Some(ch) = rest.chars().next() {
		if ch == '&'
			&& let Some(len) = entity_len(rest)
			&& let Some(decoded) = decode_reference(&rest[1..len - 1])
		{
			result.push(decoded);
			rest = &rest[len..];
			continue;
		}
		result.push(ch);
		rest = &rest[ch.len_utf8()..];
	}
	result
}

/// Check that `name` can be emitted as an element name
///
/// Accepts an ASCII letter followed by ASCII letters, digits, `-`, `_`, `:`
/// or `.`, which covers standard and custom elements.
pub fn is_valid_tag_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Check that `name` can be emitted as an attribute name
pub fn is_valid_attribute_name(name: &str) -> bool {
	!name.is_empty()
		&& name.chars().all(|c| {
			!c.is_whitespace()
				&& !c.is_control()
				&& !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
		})
}
