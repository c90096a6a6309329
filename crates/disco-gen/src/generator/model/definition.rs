use serde::Serialize;

use super::node::SchemaNode;

/// Where a model definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelOrigin {
  /// Declared under the document's top-level `schemas` section.
  Declared,
  /// Synthesized for an inline method request/response body.
  Synthesized,
}

/// The emitted unit: one named model plus its ordering metadata.
///
/// Built once by the graph builder; the emitter annotates `recursive` and
/// `deferred` on the vector it owns and otherwise only reorders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDefinition {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub schema: SchemaNode,
  /// Names of the models this one references, first-encounter order,
  /// deduplicated.
  pub dependencies: Vec<String>,
  /// The model references itself, directly or through an array wrapper.
  pub recursive: bool,
  /// Dependencies the downstream emitter must satisfy via forward
  /// declaration because ordering alone cannot.
  pub deferred: Vec<String>,
  pub origin: ModelOrigin,
}

impl ModelDefinition {
  pub(crate) fn new(
    name: String,
    description: Option<String>,
    schema: SchemaNode,
    dependencies: Vec<String>,
    origin: ModelOrigin,
  ) -> Self {
    Self {
      name,
      description,
      schema,
      dependencies,
      recursive: false,
      deferred: Vec::new(),
      origin,
    }
  }
}
