//! Required-Field Validation - Advisory Reports
//!
//! The only rule this layer enforces is "required but empty". Reports are
//! surfaced to the form layer (inline messaging) and the CLI; they never
//! block a generation pass, which has its own per-node skip logic keyed on
//! identifying fields.

use serde::{Deserialize, Serialize};

use crate::card::CardInstance;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Position of the card in the forest, e.g. `armorSet[0]/armorPiece[1]`.
    pub path: String,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn empty() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }
}

/// Walk a card forest and collect every required-but-empty field.
pub fn validate_forest(roots: &[CardInstance]) -> ValidationReport {
    let mut violations = Vec::new();
    for (index, root) in roots.iter().enumerate() {
        let path = format!("{}[{index}]", root.template_id());
        validate_card(root, &path, &mut violations);
    }
    ValidationReport {
        valid: violations.is_empty(),
        violations,
    }
}

fn validate_card(card: &CardInstance, path: &str, violations: &mut Vec<FieldViolation>) {
    for field in card.template().fields() {
        if let Err(err) = field.validate(card.field(&field.id)) {
            violations.push(FieldViolation {
                path: path.to_string(),
                field: field.id.clone(),
                message: err.to_string(),
            });
        }
    }
    for (index, child) in card.children().iter().enumerate() {
        let child_path = format!("{path}/{}[{index}]", child.template_id());
        validate_card(child, &child_path, violations);
    }
}
