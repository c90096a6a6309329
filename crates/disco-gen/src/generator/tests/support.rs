use serde_json::Value;

use crate::generator::{
  document::DiscoveryDocument,
  graph_builder::{ModelGraph, ModelGraphBuilder},
  metrics::GenerationStats,
  model::ModelDefinition,
};

pub(super) fn document_from(raw: Value) -> DiscoveryDocument {
  serde_json::from_value(raw).expect("failed to decode test document")
}

pub(super) fn schemas_document(schemas: Value) -> DiscoveryDocument {
  document_from(serde_json::json!({ "schemas": schemas }))
}

pub(super) fn build_graph(document: &DiscoveryDocument) -> (ModelGraph, GenerationStats) {
  let mut stats = GenerationStats::default();
  let graph = ModelGraphBuilder::new(document)
    .build(&mut stats)
    .expect("graph building failed for test document");
  (graph, stats)
}

pub(super) fn model_names(models: &[ModelDefinition]) -> Vec<&str> {
  models.iter().map(|model| model.name.as_str()).collect()
}

pub(super) fn position(models: &[ModelDefinition], name: &str) -> usize {
  models
    .iter()
    .position(|model| model.name == name)
    .unwrap_or_else(|| panic!("model {name} missing from output"))
}

pub(super) fn find<'a>(models: &'a [ModelDefinition], name: &str) -> &'a ModelDefinition {
  models
    .iter()
    .find(|model| model.name == name)
    .unwrap_or_else(|| panic!("model {name} missing from output"))
}
