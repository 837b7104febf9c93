//! Field Model - Typed Input Descriptors
//!
//! Fields describe one input of a template: its kind, its default, and the
//! single validation this layer enforces (required-but-empty). Numeric bounds
//! and accepted media types are advisory metadata for the form layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::CardInstance;

/// A concrete value held by a card for one field.
///
/// Binary payloads (textures, icons) pass through the engine verbatim and
/// serialize as base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    Binary(#[serde(with = "crate::b64")] Vec<u8>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Empty means "nothing entered": the `Empty` variant, blank text, or a
    /// zero-length blob.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
            Self::Binary(b) => b.is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Empty
    }
}

/// One option in a choice field: stored value plus display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The kind of a field - determines what shape the value takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    /// Decorative heading, never holds user input.
    Title,
    Choice {
        choices: Vec<Choice>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    File {
        accept: String,
    },
}

/// Reactive hook run after a field's value changes on an instance.
///
/// Hooks receive the owning card and may read siblings, overwrite sibling and
/// descendant fields, and replace choice candidate lists. They must write
/// through [`CardInstance::write_field`] (never `set_field`) so a cascade can
/// never re-enter its own change path.
pub type ChangeHook = fn(&mut CardInstance);

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("{message}")]
    MissingRequired { field: String, message: String },
}

/// Descriptor for one input field of a template.
///
/// Identifier uniqueness is scoped to the declaring template, not global.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub required_message: String,
    pub default: FieldValue,
    pub on_change: Option<ChangeHook>,
}

impl Field {
    fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            required_message: "This field is required.".to_string(),
            default: FieldValue::Empty,
            on_change: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn title(id: impl Into<String>) -> Self {
        Self::new(id, "", FieldKind::Title)
    }

    pub fn choice(
        id: impl Into<String>,
        label: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self::new(id, label, FieldKind::Choice { choices })
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Number { min: None, max: None })
    }

    pub fn file(id: impl Into<String>, label: impl Into<String>, accept: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::File { accept: accept.into() })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.required_message = message.into();
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = value;
        self
    }

    /// Advisory numeric bounds for form-layer clamping. Not enforced here.
    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if let FieldKind::Number {
            min: ref mut lo,
            max: ref mut hi,
        } = self.kind
        {
            *lo = min;
            *hi = max;
        }
        self
    }

    pub fn on_change(mut self, hook: ChangeHook) -> Self {
        self.on_change = Some(hook);
        self
    }

    /// The declared candidate list, empty for non-choice fields.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            FieldKind::Choice { choices } => choices,
            _ => &[],
        }
    }

    /// Advisory numeric bounds, if this is a numeric field.
    pub fn bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self.kind {
            FieldKind::Number { min, max } => Some((min, max)),
            _ => None,
        }
    }

    /// Only "required but empty" is enforced at this layer. No cross-field
    /// validation happens here.
    pub fn validate(&self, value: &FieldValue) -> Result<(), FieldError> {
        if self.required && value.is_empty() {
            return Err(FieldError::MissingRequired {
                field: self.id.clone(),
                message: self.required_message.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_empty_is_violation() {
        let field = Field::text("itemId", "Item ID").required();
        let err = field.validate(&FieldValue::Empty).unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn blank_text_counts_as_empty() {
        let field = Field::text("itemId", "Item ID").required_message("Give it an ID.");
        assert!(field.validate(&FieldValue::text("   ")).is_err());
        assert!(field.validate(&FieldValue::text("emerald_helmet")).is_ok());
    }

    #[test]
    fn optional_field_accepts_empty() {
        let field = Field::text("repairItem", "Repair Item");
        assert!(field.validate(&FieldValue::Empty).is_ok());
    }

    #[test]
    fn zero_is_not_empty() {
        let field = Field::number("armor", "Armor Points").required();
        assert!(field.validate(&FieldValue::Number(0.0)).is_ok());
    }

    #[test]
    fn value_roundtrips_through_json() {
        let value = FieldValue::Binary(vec![0x89, 0x50, 0x4e, 0x47]);
        let json = serde_json::to_string(&value).unwrap();
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
