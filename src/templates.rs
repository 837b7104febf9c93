//! Template Descriptors - Immutable Blueprints
//!
//! A template declares a content type's ordered fields and its (at most one)
//! child slot, and carries the polymorphic generation hook. Descriptors are
//! constructed once, registered, and never mutated by instances.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::card::CardInstance;
use crate::context::{GenerationContext, Skip};
use crate::fields::Field;
use crate::sink::ArtifactSink;

pub type TemplateId = String;

/// Option bag fixed at child-add time (for example `piece_type: helmet`).
pub type OptionBag = BTreeMap<String, String>;

/// One labeled way to add a child card to a slot.
#[derive(Clone)]
pub struct ChildButton {
    pub label: String,
    pub template: Arc<dyn Template>,
    pub options: OptionBag,
}

impl ChildButton {
    pub fn new(label: impl Into<String>, template: Arc<dyn Template>) -> Self {
        Self {
            label: label.into(),
            template,
            options: OptionBag::new(),
        }
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// A template's declared capability to host nested child cards.
///
/// A descriptor exposes at most one slot. The original engine silently let a
/// second registration overwrite the first; here the single slot is the
/// documented contract.
#[derive(Clone)]
pub struct ChildSlot {
    pub label: String,
    pub buttons: Vec<ChildButton>,
}

impl ChildSlot {
    pub fn new(label: impl Into<String>, buttons: Vec<ChildButton>) -> Self {
        Self {
            label: label.into(),
            buttons,
        }
    }

    pub fn button(&self, label: &str) -> Option<&ChildButton> {
        self.buttons.iter().find(|b| b.label == label)
    }
}

/// The polymorphic template surface.
///
/// `on_generate` must read field values through the context (never from a
/// card directly), write only into the sink, and stay side-effect-free with
/// respect to every other node's context. Missing identifying data is a
/// per-node [`Skip`], never a panic and never a whole-pass abort.
pub trait Template: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Ordered field list, append-only at construction time.
    fn fields(&self) -> &[Field];

    fn child_slot(&self) -> Option<&ChildSlot> {
        None
    }

    /// Whether this template may only appear nested, never top-level.
    fn child_only(&self) -> bool {
        false
    }

    /// Runs once right after a card of this template is created, before the
    /// user interacts. Seeds computed defaults; must be safe to run again.
    fn on_card_added(&self, _card: &mut CardInstance) {}

    /// Runs on the parent after a child card is appended through the child
    /// slot. `child` indexes into the parent's child list.
    fn on_child_added(&self, _card: &mut CardInstance, _child: usize) {}

    fn on_generate(&self, ctx: &GenerationContext<'_>, sink: &mut ArtifactSink)
        -> Result<(), Skip>;

    fn field(&self, id: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.id == id)
    }
}

/// Template registry - registration order is preserved so listings and
/// CLI output stay deterministic.
pub struct TemplateRegistry {
    order: Vec<TemplateId>,
    templates: BTreeMap<TemplateId, Arc<dyn Template>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            templates: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, template: Arc<dyn Template>) {
        let id = template.id().to_string();
        if !self.templates.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.templates.insert(id, template);
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Template>> {
        self.templates.get(id)
    }

    pub fn list(&self) -> Vec<&Arc<dyn Template>> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id))
            .collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
