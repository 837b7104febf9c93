//! Generation Pipeline - Single Entry Point
//!
//! Walks a card forest depth-first, pre-order: insertion order of roots,
//! then insertion order of each card's children. Parents generate before
//! their children, and every node runs - a card missing its identifying data
//! is skipped and logged, never aborts the pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::card::{CardError, CardInstance};
use crate::context::GenerationContext;
use crate::fields::FieldValue;
use crate::hashing::compute_manifest_hash;
use crate::settings::PackSettings;
use crate::sink::{ArtifactSink, Manifest};
use crate::templates::{OptionBag, TemplateRegistry};
use crate::validation::{validate_forest, ValidationReport};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template '{0}' is child-only and cannot appear at top level")]
    ChildOnlyTemplate(String),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialized form of one card, used to build a forest over the CLI surface.
/// Children are selected by child-slot button label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSpec {
    pub template: String,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub children: Vec<ChildSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildSpec {
    pub button: String,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub children: Vec<ChildSpec>,
}

/// Full CLI payload: settings plus the card forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub settings: PackSettings,
    #[serde(default)]
    pub cards: Vec<CardSpec>,
}

/// A card that contributed nothing to the manifest, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedCard {
    pub template_id: String,
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub manifest: Manifest,
    pub manifest_hash: String,
    pub skipped: Vec<SkippedCard>,
}

/// The generation pipeline - owns the registry and runs passes.
pub struct GenerationPipeline {
    registry: TemplateRegistry,
}

impl GenerationPipeline {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Required-field check over a forest. Advisory: a failing report does
    /// not prevent [`generate`](Self::generate) from running.
    pub fn validate(&self, roots: &[CardInstance]) -> ValidationReport {
        validate_forest(roots)
    }

    /// Run one generation pass over the forest and return the aggregated
    /// manifest. Deterministic: same tree and settings, byte-identical
    /// canonical manifest and hash.
    pub fn generate(
        &self,
        roots: &[CardInstance],
        settings: &PackSettings,
    ) -> Result<GenerationReport, PipelineError> {
        let mut sink = ArtifactSink::new();
        let mut skipped = Vec::new();

        for (index, root) in roots.iter().enumerate() {
            let path = format!("{}[{index}]", root.template_id());
            visit(root, None, settings, &mut sink, &mut skipped, &path);
        }

        let manifest = sink.finish();
        let manifest_hash = compute_manifest_hash(&manifest)?;
        debug!(
            files = manifest.files.len(),
            skipped = skipped.len(),
            "generation pass complete"
        );

        Ok(GenerationReport {
            manifest,
            manifest_hash,
            skipped,
        })
    }

    /// Build one root card from its serialized spec. Values are applied in
    /// field-declaration order through the triggering write path, so
    /// cascades replay exactly as they would under interactive editing.
    pub fn instantiate(&self, spec: &CardSpec) -> Result<CardInstance, PipelineError> {
        let template = self
            .registry
            .get(&spec.template)
            .ok_or_else(|| PipelineError::TemplateNotFound(spec.template.clone()))?;
        if template.child_only() {
            return Err(PipelineError::ChildOnlyTemplate(spec.template.clone()));
        }
        let mut card = CardInstance::new(template.clone(), OptionBag::new());
        apply_spec(&mut card, &spec.values, &spec.children)?;
        Ok(card)
    }

    pub fn instantiate_forest(&self, specs: &[CardSpec]) -> Result<Vec<CardInstance>, PipelineError> {
        specs.iter().map(|spec| self.instantiate(spec)).collect()
    }
}

fn apply_spec(
    card: &mut CardInstance,
    values: &BTreeMap<String, FieldValue>,
    children: &[ChildSpec],
) -> Result<(), PipelineError> {
    // Declaration order keeps cascade side effects deterministic; a value
    // listed after a cascading source wins over what the cascade derived.
    let declared: Vec<String> = card
        .template()
        .fields()
        .iter()
        .map(|f| f.id.clone())
        .collect();
    for id in &declared {
        if let Some(value) = values.get(id) {
            card.set_field(id, value.clone())?;
        }
    }
    for id in values.keys() {
        if !declared.contains(id) {
            return Err(CardError::UnknownField {
                template: card.template_id().to_string(),
                field: id.clone(),
            }
            .into());
        }
    }
    for child_spec in children {
        let index = card.add_child(&child_spec.button)?;
        apply_spec(
            &mut card.children_mut()[index],
            &child_spec.values,
            &child_spec.children,
        )?;
    }
    Ok(())
}

fn visit(
    card: &CardInstance,
    parent: Option<&GenerationContext<'_>>,
    settings: &PackSettings,
    sink: &mut ArtifactSink,
    skipped: &mut Vec<SkippedCard>,
    path: &str,
) {
    let ctx = GenerationContext::new(card, settings, parent);

    if let Err(skip) = card.template().on_generate(&ctx, sink) {
        warn!(
            template = card.template_id(),
            path,
            reason = %skip.reason,
            "skipping generation for card"
        );
        skipped.push(SkippedCard {
            template_id: card.template_id().to_string(),
            path: path.to_string(),
            reason: skip.reason,
        });
    }

    for (index, child) in card.children().iter().enumerate() {
        let child_path = format!("{path}/{}[{index}]", child.template_id());
        visit(child, Some(&ctx), settings, sink, skipped, &child_path);
    }
}
