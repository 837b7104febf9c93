//! PackForge Core - Datapack Composition Engine
//!
//! # The Five Rules (Non-Negotiable)
//! 1. Templates Are Contracts
//! 2. Cards Own Their Subtrees
//! 3. Generation Is Deterministic
//! 4. The Sink Is Append-Only
//! 5. A Broken Card Skips, The Pass Finishes

pub mod b64;
pub mod card;
pub mod context;
pub mod equipment;
pub mod fields;
pub mod hashing;
pub mod pipeline;
pub mod settings;
pub mod sink;
pub mod templates;
pub mod validation;

pub use card::{CardError, CardInstance};
pub use context::{GenerationContext, Skip};
pub use fields::{Choice, Field, FieldKind, FieldValue};
pub use hashing::{canonical_json, compute_manifest_hash};
pub use pipeline::{
    CardSpec, ChildSpec, GenerateRequest, GenerationPipeline, GenerationReport, PipelineError,
    SkippedCard,
};
pub use settings::PackSettings;
pub use sink::{ArtifactSink, FileContent, Manifest};
pub use templates::{ChildButton, ChildSlot, OptionBag, Template, TemplateId, TemplateRegistry};
pub use validation::{FieldViolation, ValidationReport};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
