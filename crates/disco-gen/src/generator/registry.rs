use indexmap::IndexMap;

use crate::generator::{
  errors::{GeneratorError, SchemaPath},
  model::SchemaNode,
};

/// Immutable mapping from declared schema name to its normalized node.
///
/// Populated in one pass over the document's `schemas` section before any
/// resolution begins, then only read. Forward references resolve
/// independently of visitation order.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
  nodes: IndexMap<String, SchemaNode>,
}

impl SchemaRegistry {
  pub(crate) fn new(nodes: IndexMap<String, SchemaNode>) -> Self {
    Self { nodes }
  }

  /// Resolves a reference target to its declared node.
  ///
  /// Returns the one registered node rather than expanding it into the
  /// referencing site, so ten fields referencing the same schema share one
  /// model instead of ten copies. Callers that need the full shape follow
  /// the reference explicitly.
  pub fn resolve(&self, target: &str, path: &SchemaPath) -> Result<&SchemaNode, GeneratorError> {
    self
      .nodes
      .get(target)
      .ok_or_else(|| GeneratorError::UnresolvedReference {
        path: path.clone(),
        target: target.to_string(),
      })
  }

  pub fn get(&self, name: &str) -> Option<&SchemaNode> {
    self.nodes.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.nodes.contains_key(name)
  }

  /// Declared schema names in document order.
  pub fn names(&self) -> impl Iterator<Item = &String> {
    self.nodes.keys()
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
