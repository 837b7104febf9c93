//! Generation Context - Per-Node Facade
//!
//! Built fresh for every card on every generation pass, never persisted.
//! Binds the node to its field values, its option bag, the pack settings,
//! and the already-built parent context. The artifact sink travels alongside
//! the context as an explicit `&mut` so the pass stays replayable.

use crate::card::CardInstance;
use crate::fields::FieldValue;
use crate::settings::PackSettings;

/// Non-fatal, per-node generation outcome: the node's identifying data is
/// absent, so it contributes nothing to the manifest. Siblings and ancestors
/// are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub reason: String,
}

impl Skip {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn missing(what: &str) -> Self {
        Self::new(format!("card is missing {what}"))
    }
}

pub struct GenerationContext<'a> {
    card: &'a CardInstance,
    settings: &'a PackSettings,
    parent: Option<&'a GenerationContext<'a>>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        card: &'a CardInstance,
        settings: &'a PackSettings,
        parent: Option<&'a GenerationContext<'a>>,
    ) -> Self {
        Self {
            card,
            settings,
            parent,
        }
    }

    pub fn field(&self, id: &str) -> &FieldValue {
        self.card.field(id)
    }

    /// Text value, `None` when empty or non-text.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.card.text(id).filter(|s| !s.trim().is_empty())
    }

    pub fn number(&self, id: &str) -> Option<f64> {
        self.card.number(id)
    }

    pub fn binary(&self, id: &str) -> Option<&[u8]> {
        self.field(id).as_binary().filter(|b| !b.is_empty())
    }

    /// The option bag fixed when this card was added through a child slot.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.card.option(key)
    }

    pub fn settings(&self) -> &PackSettings {
        self.settings
    }

    /// The parent card's context; `None` on roots. A parent's `on_generate`
    /// always ran before its children's, so parent field values are final,
    /// but parent-written artifacts must not be appended to (the sink is
    /// last-write-wins, not append-into-file).
    pub fn parent(&self) -> Option<&GenerationContext<'a>> {
        self.parent
    }

    pub fn template_id(&self) -> &str {
        self.card.template_id()
    }
}
