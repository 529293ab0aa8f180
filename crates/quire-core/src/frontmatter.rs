//! YAML frontmatter splitting and decoding.
//!
//! Handles the `---` delimited YAML frontmatter at the top of a post.
//! Format:
//! ```markdown
//! ---
//! title: "Hello"
//! subtitle: "A first post"
//! date: 2020-03-14
//! tags: [rust, blog]
//! ---
//!
//! ## Body content here
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::QuireError;

/// Untyped key/value metadata decoded from a post's frontmatter block.
///
/// Nothing is checked at this stage; see [`crate::FrontmatterGate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrontmatter(Mapping);

impl RawFrontmatter {
    /// Decode the YAML text between the `---` delimiters.
    ///
    /// An empty block decodes to an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Serialization`] if the YAML is malformed, and
    /// [`QuireError::Parse`] if it is not a mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuireError> {
        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| QuireError::Serialization(e.to_string()))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(map) => Ok(Self(map)),
            other => Err(QuireError::Parse(format!(
                "frontmatter must be a mapping of keys to values, got {}",
                describe_value(&other)
            ))),
        }
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a top-level key, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(Value::String(key.into()), value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}

impl From<Mapping> for RawFrontmatter {
    fn from(map: Mapping) -> Self {
        Self(map)
    }
}

/// Render a YAML value compactly for diagnostics, e.g. `"abc"`, `-1`, `[1,2]`.
#[must_use]
pub fn describe_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| {
        serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{value:?}"))
    })
}

/// Split a markdown file into frontmatter YAML and body content.
///
/// Returns `(Some(yaml), body)` when the file opens with a `---` block and
/// `(None, content)` when it has no frontmatter at all.
///
/// # Errors
///
/// Returns [`QuireError::Parse`] if the opening `---` is never closed.
pub fn split_frontmatter(content: &str) -> Result<(Option<&str>, &str), QuireError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, content));
    }

    let after_first = trimmed[3..].trim_start_matches(['\r', '\n']);

    // Empty block: the closing delimiter directly follows the opener.
    let (yaml, rest) = if let Some(rest) = after_first.strip_prefix("---") {
        ("", rest)
    } else {
        let close_pos = after_first.find("\n---").ok_or_else(|| {
            QuireError::Parse("No closing '---' frontmatter delimiter found".to_string())
        })?;
        (&after_first[..close_pos], &after_first[close_pos + 4..])
    };

    let body = rest.strip_prefix('\r').unwrap_or(rest);
    let body = body.strip_prefix('\n').unwrap_or(body);

    Ok((Some(yaml), body))
}

/// Split and decode a markdown file into its raw frontmatter and body.
///
/// A file without a frontmatter block yields an empty [`RawFrontmatter`], so
/// schema validation reports the missing fields.
///
/// # Errors
///
/// Returns [`QuireError::Parse`] or [`QuireError::Serialization`] if the
/// frontmatter block is unterminated or is not a YAML mapping.
pub fn parse_document(content: &str) -> Result<(RawFrontmatter, &str), QuireError> {
    let (yaml, body) = split_frontmatter(content)?;
    let raw = match yaml {
        Some(yaml) => RawFrontmatter::from_yaml(yaml)?,
        None => RawFrontmatter::default(),
    };
    Ok((raw, body))
}
