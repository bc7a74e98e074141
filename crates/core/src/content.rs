//! Content values and the rules for editing them.
//!
//! Live content is stored as text. A value whose trimmed text starts with
//! `{` or `[` is structured (FAQ entries, wedding-party members, hotel lists)
//! and must be valid JSON; anything else is free text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a content key.
pub const MAX_KEY_LEN: usize = 100;

/// Maximum length of a single content value, in bytes.
pub const MAX_VALUE_LEN: usize = 200_000;

/// A full snapshot of a page's editable fields, keyed by content key.
///
/// `BTreeMap` keeps serialization order stable so snapshots diff cleanly.
pub type ContentMap = BTreeMap<String, ContentValue>;

// ---------------------------------------------------------------------------
// ContentValue
// ---------------------------------------------------------------------------

/// A single content value inside a draft snapshot.
///
/// Serialized untagged: plain text is a JSON string, structured content is
/// any other JSON value. A JSON string always deserializes as `PlainText`,
/// even when its text happens to look like JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    PlainText(String),
    Structured(serde_json::Value),
}

impl ContentValue {
    /// Build a value from editor text.
    ///
    /// The text is kept verbatim as `PlainText` so that what the admin typed
    /// (key order, indentation) is exactly what goes live. Text that looks
    /// structured but fails to parse is rejected.
    pub fn from_edit(raw: &str) -> Result<Self, CoreError> {
        validate_edit(raw)?;
        Ok(ContentValue::PlainText(raw.to_string()))
    }

    /// The text written to the content store when this value is published.
    ///
    /// Plain text is stored verbatim; structured values are stored as compact
    /// JSON text.
    pub fn to_stored_string(&self) -> String {
        match self {
            ContentValue::PlainText(text) => text.clone(),
            ContentValue::Structured(value) => match value {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ContentValue::Structured(_))
    }
}

impl From<&str> for ContentValue {
    fn from(value: &str) -> Self {
        ContentValue::PlainText(value.to_string())
    }
}

impl From<String> for ContentValue {
    fn from(value: String) -> Self {
        ContentValue::PlainText(value)
    }
}

impl From<serde_json::Value> for ContentValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => ContentValue::PlainText(text),
            other => ContentValue::Structured(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// True when the trimmed text starts with `{` or `[`.
pub fn looks_structured(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn parse_structured(raw: &str) -> Result<serde_json::Value, CoreError> {
    serde_json::from_str(raw.trim())
        .map_err(|e| CoreError::Validation(format!("Invalid JSON: {e}")))
}

/// Validate a value typed into the editor.
///
/// Structured-looking text must parse as JSON; free text is always valid.
pub fn validate_edit(raw: &str) -> Result<(), CoreError> {
    if looks_structured(raw) {
        parse_structured(raw)?;
    }
    Ok(())
}

/// Validate a content key (non-empty, <= 100 chars, lowercase alphanumeric
/// and underscores, starting with a letter).
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation("Content key must not be empty".into()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(CoreError::Validation(format!(
            "Content key must be at most {MAX_KEY_LEN} characters"
        )));
    }
    if !key.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(CoreError::Validation(
            "Content key must start with a lowercase letter".into(),
        ));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(CoreError::Validation(
            "Content key must contain only lowercase alphanumeric characters and underscores"
                .into(),
        ));
    }
    Ok(())
}

/// Validate a value written directly to the content store.
pub fn validate_value(value: &str) -> Result<(), CoreError> {
    if value.len() > MAX_VALUE_LEN {
        return Err(CoreError::Validation(format!(
            "Content value must be at most {MAX_VALUE_LEN} bytes"
        )));
    }
    validate_edit(value)
}

/// Validate every key and value of a draft snapshot.
///
/// Plain-text values follow the same rules as direct content writes, so a
/// draft can never publish text the content store would refuse.
pub fn validate_content_map(content: &ContentMap) -> Result<(), CoreError> {
    for (key, value) in content {
        validate_key(key)?;
        if let ContentValue::PlainText(text) = value {
            if text.len() > MAX_VALUE_LEN {
                return Err(CoreError::Validation(format!(
                    "Value for '{key}' must be at most {MAX_VALUE_LEN} bytes"
                )));
            }
            if looks_structured(text) {
                serde_json::from_str::<serde_json::Value>(text.trim()).map_err(|e| {
                    CoreError::Validation(format!("Value for '{key}' is not valid JSON: {e}"))
                })?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Pretty-print structured text with two-space indentation.
///
/// Free text is returned unchanged. Invalid structured text is an error.
pub fn format_json(raw: &str) -> Result<String, CoreError> {
    if !looks_structured(raw) {
        return Ok(raw.to_string());
    }
    let parsed = parse_structured(raw)?;
    serde_json::to_string_pretty(&parsed).map_err(|e| CoreError::Internal(e.to_string()))
}
