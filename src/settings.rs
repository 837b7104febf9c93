//! Pack Settings - External Flat Configuration
//!
//! Owned and populated outside the engine (the settings panel); generation
//! hooks read it through the context. The pack name doubles as the output
//! namespace, so a blank name means no card can generate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackSettings {
    /// Pack name / namespace. No spaces or special characters.
    pub pack_name: String,
    pub pack_desc: String,
    /// `pack.png` icon blob.
    #[serde(with = "crate::b64::opt", skip_serializing_if = "Option::is_none")]
    pub pack_icon: Option<Vec<u8>>,
    pub use_item_group: bool,
    pub item_group_name: String,
    pub item_group_id: String,
    /// Icon item for the custom group in the creative menu.
    pub item_group_item: String,
    pub create_item_group: bool,
}

impl PackSettings {
    pub fn named(pack_name: impl Into<String>) -> Self {
        Self {
            pack_name: pack_name.into(),
            ..Self::default()
        }
    }

    /// The output namespace, `None` when the pack name is blank.
    pub fn namespace(&self) -> Option<&str> {
        let name = self.pack_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// The fully qualified item group id, when the group toggle is on. An
    /// unqualified id gets the pack's namespace prefixed.
    pub fn qualified_group_id(&self) -> Option<String> {
        if !self.use_item_group || self.item_group_id.is_empty() {
            return None;
        }
        if self.item_group_id.contains(':') {
            Some(self.item_group_id.clone())
        } else {
            let namespace = self.namespace()?;
            Some(format!("{namespace}:{}", self.item_group_id))
        }
    }
}
