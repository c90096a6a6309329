//! Orchestration for the discovery-document to model-definition pipeline.
//!
//! The `Orchestrator` owns one decoded document and runs the whole pass
//! (registry, graph, topological emission), returning the ordered model
//! sequence plus run statistics.
//!
//! ## Usage
//!
//! ```no_run
//! use disco_gen::generator::orchestrator::Orchestrator;
//!
//! # fn example() -> anyhow::Result<()> {
//! let raw = std::fs::read_to_string("storage-v1.json")?;
//! let document = serde_json::from_str(&raw)?;
//!
//! let orchestrator = Orchestrator::new(document);
//! let output = orchestrator.generate()?;
//!
//! println!(
//!   "Generated {} models with {} warnings",
//!   output.stats.models_generated,
//!   output.stats.warnings.len()
//! );
//! # Ok(())
//! # }
//! ```

use crate::generator::{
  document::DiscoveryDocument,
  emitter::TopologicalEmitter,
  errors::GeneratorError,
  graph_builder::ModelGraphBuilder,
  metrics::GenerationStats,
  model::ModelDefinition,
};

/// High-level pipeline facade.
pub struct Orchestrator {
  document: DiscoveryDocument,
}

/// Document identity for logging and output headers.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
  pub name: String,
  pub version: String,
  pub title: Option<String>,
  pub description: Option<String>,
}

/// Result of one generation run.
#[derive(Debug)]
pub struct GenerationOutput {
  /// Ordered model definitions: every model follows its non-self,
  /// non-deferred dependencies.
  pub models: Vec<ModelDefinition>,
  pub stats: GenerationStats,
}

impl Orchestrator {
  pub fn new(document: DiscoveryDocument) -> Self {
    Self { document }
  }

  pub fn metadata(&self) -> DocumentMetadata {
    DocumentMetadata {
      name: self.document.name.clone().unwrap_or_else(|| "unnamed".to_string()),
      version: self.document.version.clone().unwrap_or_else(|| "v1".to_string()),
      title: self.document.title.clone(),
      description: self.document.description.clone(),
    }
  }

  /// Runs the complete pipeline:
  /// 1. Builds the Named Schema Registry from the `schemas` section.
  /// 2. Derives Model Definitions for declared schemas and inline method
  ///    bodies, with dependency edges validated against the registry.
  /// 3. Topologically orders the models, flagging recursive models and
  ///    deferred cycle edges.
  ///
  /// Any document defect aborts the run; no partial model set is returned.
  pub fn generate(&self) -> Result<GenerationOutput, GeneratorError> {
    let mut stats = GenerationStats::default();

    let graph = ModelGraphBuilder::new(&self.document).build(&mut stats)?;
    stats.schemas_declared = graph.registry.len();
    stats.record_models(&graph.models);

    let models = TopologicalEmitter::new(graph.models).emit(&mut stats)?;

    Ok(GenerationOutput { models, stats })
  }
}
