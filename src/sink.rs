//! Artifact Sink - Append-Only Output Collector
//!
//! One sink is shared across a whole generation pass. Writes are
//! last-write-wins for files (paths are content-addressed by the generating
//! card's own identifier, so a collision means duplicate IDs or intentional
//! re-declaration) and set-union for tags, so traversal-order determinism is
//! the only discipline the pass needs.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// File payloads are opaque to the engine: structured text or a binary blob
/// passed through verbatim (serialized as base64).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileContent {
    Text(String),
    Binary(#[serde(with = "crate::b64")] Vec<u8>),
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

impl From<&[u8]> for FileContent {
    fn from(bytes: &[u8]) -> Self {
        Self::Binary(bytes.to_vec())
    }
}

/// The deliverable of one generation pass.
///
/// Files keep their write (traversal) order; tag and equipment-texture maps
/// are sorted. Everything serializes with string keys only, so canonical
/// JSON hashing applies directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub files: IndexMap<String, FileContent>,
    /// namespace -> tag name -> entry ids
    pub tags: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    /// set id -> layer id -> source reference
    pub equipment_textures: BTreeMap<String, BTreeMap<String, String>>,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.tags.is_empty() && self.equipment_textures.is_empty()
    }

    pub fn tag_entries(&self, namespace: &str, tag: &str) -> Option<&BTreeSet<String>> {
        self.tags.get(namespace).and_then(|tags| tags.get(tag))
    }
}

/// Write-only collector handed to every `on_generate` hook in a pass.
#[derive(Debug, Default)]
pub struct ArtifactSink {
    files: IndexMap<String, FileContent>,
    tags: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    equipment_textures: BTreeMap<String, BTreeMap<String, String>>,
}

impl ArtifactSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional write. Writing the same path twice overwrites the
    /// content but keeps the path's original position.
    pub fn create_file(&mut self, path: impl Into<String>, content: impl Into<FileContent>) {
        self.files.insert(path.into(), content.into());
    }

    /// Set semantics: a duplicate entry id is a no-op, not an error.
    pub fn add_tag(
        &mut self,
        namespace: impl Into<String>,
        tag: impl Into<String>,
        entry_id: impl Into<String>,
    ) {
        self.tags
            .entry(namespace.into())
            .or_default()
            .entry(tag.into())
            .or_default()
            .insert(entry_id.into());
    }

    /// Auxiliary cross-cutting record, keyed overwrite on (set, layer).
    pub fn add_equipment_texture(
        &mut self,
        set_id: impl Into<String>,
        layer_id: impl Into<String>,
        source_ref: impl Into<String>,
    ) {
        self.equipment_textures
            .entry(set_id.into())
            .or_default()
            .insert(layer_id.into(), source_ref.into());
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn finish(self) -> Manifest {
        Manifest {
            files: self.files,
            tags: self.tags,
            equipment_textures: self.equipment_textures,
        }
    }
}
