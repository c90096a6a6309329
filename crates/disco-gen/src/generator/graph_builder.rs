use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::generator::{
  document::{DiscoveryDocument, MethodSite},
  errors::{GeneratorError, SchemaPath},
  inference,
  metrics::{GenerationStats, GenerationWarning},
  model::{ModelDefinition, ModelOrigin, SchemaNode},
  naming::identifiers::synthesized_model_name,
  registry::SchemaRegistry,
};

/// Registry plus the unordered model set extracted from one document.
///
/// Model order is declaration order: declared schemas first, then
/// synthesized method bodies in traversal order. The emitter reorders.
#[derive(Debug)]
pub(crate) struct ModelGraph {
  pub registry: SchemaRegistry,
  pub models: Vec<ModelDefinition>,
}

/// Walks the discovery document and produces the Named Schema Registry and
/// every Model Definition candidate, with dependency edges computed and all
/// references validated.
pub(crate) struct ModelGraphBuilder<'a> {
  document: &'a DiscoveryDocument,
}

impl<'a> ModelGraphBuilder<'a> {
  pub(crate) fn new(document: &'a DiscoveryDocument) -> Self {
    Self { document }
  }

  pub(crate) fn build(self, stats: &mut GenerationStats) -> Result<ModelGraph, GeneratorError> {
    let registry = self.build_registry()?;

    let mut models = Vec::new();
    let mut taken: BTreeSet<String> = registry.names().cloned().collect();

    self.build_declared_models(&registry, &mut models)?;
    self.build_method_body_models(&registry, &mut taken, &mut models, stats)?;

    Ok(ModelGraph { registry, models })
  }

  /// One pass over the `schemas` section, before any resolution happens.
  fn build_registry(&self) -> Result<SchemaRegistry, GeneratorError> {
    let schemas_path = SchemaPath::root("schemas");
    let mut nodes = IndexMap::new();

    for (name, fragment) in &self.document.schemas {
      let path = schemas_path.child(name);
      let node = inference::infer(fragment, &path)?;

      if !node.is_model_root() {
        return Err(GeneratorError::InvalidTopLevelSchema {
          name: name.clone(),
          kind: node.kind(),
        });
      }

      nodes.insert(name.clone(), node);
    }

    Ok(SchemaRegistry::new(nodes))
  }

  fn build_declared_models(
    &self,
    registry: &SchemaRegistry,
    models: &mut Vec<ModelDefinition>,
  ) -> Result<(), GeneratorError> {
    let schemas_path = SchemaPath::root("schemas");

    for (name, fragment) in &self.document.schemas {
      let Some(node) = registry.get(name) else { continue };
      let path = schemas_path.child(name);
      let dependencies = collect_dependencies(node, &path, registry)?;

      models.push(ModelDefinition::new(
        name.clone(),
        fragment_description(fragment),
        node.clone(),
        dependencies,
        ModelOrigin::Declared,
      ));
    }

    Ok(())
  }

  fn build_method_body_models(
    &self,
    registry: &SchemaRegistry,
    taken: &mut BTreeSet<String>,
    models: &mut Vec<ModelDefinition>,
    stats: &mut GenerationStats,
  ) -> Result<(), GeneratorError> {
    for site in self.document.method_sites() {
      if site.method.id.is_none() && (site.method.request.is_some() || site.method.response.is_some()) {
        stats.record_warning(GenerationWarning::MissingMethodId {
          path: site.path.to_string(),
        });
      }

      let bodies = [
        ("Request", "request", site.method.request.as_ref()),
        ("Response", "response", site.method.response.as_ref()),
      ];

      for (slot, key, fragment) in bodies {
        let Some(fragment) = fragment else { continue };
        let path = site.path.child(key);
        self.build_body_model(&site, slot, fragment, &path, registry, taken, models, stats)?;
      }
    }

    Ok(())
  }

  #[allow(clippy::too_many_arguments)]
  fn build_body_model(
    &self,
    site: &MethodSite<'_>,
    slot: &str,
    fragment: &Value,
    path: &SchemaPath,
    registry: &SchemaRegistry,
    taken: &mut BTreeSet<String>,
    models: &mut Vec<ModelDefinition>,
    stats: &mut GenerationStats,
  ) -> Result<(), GeneratorError> {
    let node = inference::infer(fragment, path)?;

    if let SchemaNode::Reference { target } = &node {
      // A `$ref` body reuses the declared model; just prove it resolves.
      registry.resolve(target, path)?;
      return Ok(());
    }

    if matches!(node, SchemaNode::Primitive { .. }) {
      stats.record_warning(GenerationWarning::PrimitiveBodySkipped {
        method: site.identity(),
        slot: slot.to_lowercase(),
      });
      return Ok(());
    }

    let name = match site.method.id.as_deref() {
      Some(id) => synthesized_model_name(id.split('.'), slot),
      None => synthesized_model_name(site.key_chain.iter().map(String::as_str), slot),
    };

    if !taken.insert(name.clone()) {
      return Err(GeneratorError::DuplicateModelName {
        name,
        path: path.clone(),
      });
    }

    let dependencies = collect_dependencies(&node, path, registry)?;
    models.push(ModelDefinition::new(
      name,
      fragment_description(fragment),
      node,
      dependencies,
      ModelOrigin::Synthesized,
    ));

    Ok(())
  }
}

fn fragment_description(fragment: &Value) -> Option<String> {
  fragment
    .get("description")
    .and_then(Value::as_str)
    .map(str::to_string)
}

/// Records the target of every reference reachable without crossing another
/// named model boundary, first-encounter order, deduplicated. Every target
/// is resolved against the registry here, so a dangling `$ref` aborts with
/// the precise document path of the referencing site.
fn collect_dependencies(
  node: &SchemaNode,
  path: &SchemaPath,
  registry: &SchemaRegistry,
) -> Result<Vec<String>, GeneratorError> {
  let mut ordered = Vec::new();
  let mut seen = BTreeSet::new();
  walk_references(node, path, registry, &mut ordered, &mut seen)?;
  Ok(ordered)
}

fn walk_references(
  node: &SchemaNode,
  path: &SchemaPath,
  registry: &SchemaRegistry,
  ordered: &mut Vec<String>,
  seen: &mut BTreeSet<String>,
) -> Result<(), GeneratorError> {
  match node {
    SchemaNode::Reference { target } => {
      registry.resolve(target, path)?;
      if seen.insert(target.clone()) {
        ordered.push(target.clone());
      }
    }
    SchemaNode::Array { items } => {
      walk_references(items, &path.child("items"), registry, ordered, seen)?;
    }
    SchemaNode::Object { properties } => {
      let properties_path = path.child("properties");
      for (name, property) in properties {
        walk_references(&property.schema, &properties_path.child(name), registry, ordered, seen)?;
      }
    }
    SchemaNode::Primitive { .. } | SchemaNode::Enum { .. } => {}
  }

  Ok(())
}
