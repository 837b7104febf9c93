//! Equipment Templates
//!
//! Concrete content types built on the engine: armor sets with nested
//! pieces, and standalone tools. The artifact payloads here are domain
//! detail - the engine itself treats the paths and contents as opaque.

pub mod armor;
pub mod tools;
pub mod vanilla;

use std::sync::Arc;

use serde_json::Value;

use crate::templates::TemplateRegistry;

pub use armor::{ArmorPieceTemplate, ArmorSetTemplate, HorseArmorTemplate};
pub use tools::ToolTemplate;

/// Register the equipment templates. Child-only templates are listed too,
/// so the registry can reject them at the top level by name instead of
/// reporting them as unknown.
pub fn register_equipment(registry: &mut TemplateRegistry) {
    registry.register(Arc::new(ArmorSetTemplate::new()));
    registry.register(Arc::new(ArmorPieceTemplate::new()));
    registry.register(Arc::new(HorseArmorTemplate::new()));
    registry.register(Arc::new(ToolTemplate::new()));
}

/// Lowercased, underscore-joined identifier form of a display name.
/// `"Emerald Set" -> "emerald_set"`.
pub(crate) fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `"horse_armor" -> "Horse Armor"`.
pub(crate) fn title_case(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numeric JSON value that prints whole numbers without a trailing `.0`.
pub(crate) fn num(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Namespace-qualify an item reference that may have been entered bare.
pub(crate) fn qualify(item: &str) -> String {
    if item.contains(':') {
        item.to_string()
    } else {
        format!("minecraft:{item}")
    }
}
