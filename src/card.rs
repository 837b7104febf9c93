//! Card Instances - The Runtime Template Tree
//!
//! A card is a live instantiation of a template: a value for every declared
//! field, the option bag chosen at add time, and an ordered list of owned
//! child cards. Deleting a card drops its whole subtree.
//!
//! Reactive rule: `set_field` is the only triggering write. It runs the
//! field's `on_change` hook, and hooks in turn mutate through `write_field`
//! and `set_choices`, which never trigger. Combined with the unchanged-value
//! early return, a cascade cannot re-enter its own change path.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::fields::{Choice, FieldKind, FieldValue};
use crate::templates::{OptionBag, Template};

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Template '{template}' declares no field '{field}'")]
    UnknownField { template: String, field: String },

    #[error("Template '{0}' has no child slot")]
    NoChildSlot(String),

    #[error("Child slot of '{template}' has no button '{button}'")]
    UnknownButton { template: String, button: String },

    #[error("No child at index {0}")]
    NoSuchChild(usize),
}

pub struct CardInstance {
    template: Arc<dyn Template>,
    values: BTreeMap<String, FieldValue>,
    choice_overrides: BTreeMap<String, Vec<Choice>>,
    options: OptionBag,
    children: Vec<CardInstance>,
}

// The descriptor is a trait object, so derive(Debug) is out; print its id.
impl fmt::Debug for CardInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInstance")
            .field("template", &self.template.id())
            .field("values", &self.values)
            .field("options", &self.options)
            .field("children", &self.children)
            .finish()
    }
}

impl CardInstance {
    /// Instantiate a template. Every declared field gets an entry: the
    /// declared default, else the first choice for choice fields, else
    /// `Empty`. The template's `on_card_added` hook runs once at the end.
    pub fn new(template: Arc<dyn Template>, options: OptionBag) -> Self {
        let mut values = BTreeMap::new();
        for field in template.fields() {
            let value = if !matches!(field.default, FieldValue::Empty) {
                field.default.clone()
            } else if let FieldKind::Choice { choices } = &field.kind {
                choices
                    .first()
                    .map(|c| FieldValue::Text(c.value.clone()))
                    .unwrap_or(FieldValue::Empty)
            } else {
                FieldValue::Empty
            };
            values.insert(field.id.clone(), value);
        }

        let mut card = Self {
            template,
            values,
            choice_overrides: BTreeMap::new(),
            options,
            children: Vec::new(),
        };
        let template = card.template.clone();
        template.on_card_added(&mut card);
        card
    }

    pub fn template(&self) -> &Arc<dyn Template> {
        &self.template
    }

    pub fn template_id(&self) -> &str {
        self.template.id()
    }

    pub fn options(&self) -> &OptionBag {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Current value of a field. Undeclared ids read as `Empty`.
    pub fn field(&self, id: &str) -> &FieldValue {
        static EMPTY: FieldValue = FieldValue::Empty;
        self.values.get(id).unwrap_or(&EMPTY)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.field(id).as_text()
    }

    pub fn number(&self, id: &str) -> Option<f64> {
        self.field(id).as_number()
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    /// The triggering write: stores the value and runs the field's declared
    /// `on_change` hook. Writing the value a field already holds is a no-op,
    /// so a cascade can never re-trigger itself for the same value.
    pub fn set_field(&mut self, id: &str, value: FieldValue) -> Result<(), CardError> {
        let hook = {
            let field = self
                .template
                .field(id)
                .ok_or_else(|| CardError::UnknownField {
                    template: self.template.id().to_string(),
                    field: id.to_string(),
                })?;
            field.on_change
        };

        if self.values.get(id) == Some(&value) {
            return Ok(());
        }
        self.values.insert(id.to_string(), value);

        if let Some(hook) = hook {
            hook(self);
        }
        Ok(())
    }

    /// The non-triggering write used inside cascade hooks. Ignores ids the
    /// template does not declare, so a hook can cascade over heterogeneous
    /// children without probing each one's field list.
    pub fn write_field(&mut self, id: &str, value: FieldValue) {
        if self.template.field(id).is_some() {
            self.values.insert(id.to_string(), value);
        }
    }

    /// Replace the candidate list of a choice field on this instance only
    /// (the populate-then-select pattern for dependent dropdowns). The
    /// descriptor's declared list is untouched.
    pub fn set_choices(&mut self, id: &str, choices: Vec<Choice>) {
        self.choice_overrides.insert(id.to_string(), choices);
    }

    /// Effective candidate list: the instance override if present, else the
    /// descriptor's declared choices.
    pub fn choices(&self, id: &str) -> &[Choice] {
        if let Some(choices) = self.choice_overrides.get(id) {
            return choices;
        }
        self.template.field(id).map(|f| f.choices()).unwrap_or(&[])
    }

    /// Add a child card through the template's child slot, selecting the
    /// alternative by button label. Returns the new child's index. The parent
    /// template's `on_child_added` hook runs after the append.
    pub fn add_child(&mut self, button_label: &str) -> Result<usize, CardError> {
        let slot = self
            .template
            .child_slot()
            .ok_or_else(|| CardError::NoChildSlot(self.template.id().to_string()))?;
        let button = slot
            .button(button_label)
            .ok_or_else(|| CardError::UnknownButton {
                template: self.template.id().to_string(),
                button: button_label.to_string(),
            })?;
        let child = CardInstance::new(button.template.clone(), button.options.clone());

        self.children.push(child);
        let index = self.children.len() - 1;
        let template = self.template.clone();
        template.on_child_added(self, index);
        Ok(index)
    }

    /// Remove a child card and its whole subtree.
    pub fn remove_child(&mut self, index: usize) -> Result<(), CardError> {
        if index >= self.children.len() {
            return Err(CardError::NoSuchChild(index));
        }
        self.children.remove(index);
        Ok(())
    }

    pub fn children(&self) -> &[CardInstance] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [CardInstance] {
        &mut self.children
    }
}
