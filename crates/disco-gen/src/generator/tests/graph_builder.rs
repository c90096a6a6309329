use serde_json::json;

use super::support::{build_graph, document_from, model_names, schemas_document};
use crate::generator::{
  errors::{GeneratorError, SchemaPath},
  graph_builder::ModelGraphBuilder,
  metrics::{GenerationStats, GenerationWarning},
  model::{ModelOrigin, SchemaNode},
};

fn build_error(document: serde_json::Value) -> GeneratorError {
  let document = document_from(document);
  let mut stats = GenerationStats::default();
  ModelGraphBuilder::new(&document)
    .build(&mut stats)
    .expect_err("expected graph building to fail")
}

#[test]
fn test_registry_holds_every_declared_schema() {
  let document = schemas_document(json!({
    "Bucket": { "type": "object", "properties": { "name": { "type": "string" } } },
    "Acl": { "type": "object", "properties": { "role": { "type": "string" } } }
  }));

  let (graph, _) = build_graph(&document);
  assert_eq!(graph.registry.len(), 2);
  assert!(graph.registry.contains("Bucket"));
  assert!(graph.registry.contains("Acl"));
  assert_eq!(model_names(&graph.models), ["Bucket", "Acl"]);
  assert!(graph.models.iter().all(|model| model.origin == ModelOrigin::Declared));
}

#[test]
fn test_dependencies_first_encounter_order_deduplicated() {
  let document = schemas_document(json!({
    "Report": {
      "type": "object",
      "properties": {
        "primary": { "$ref": "Entry" },
        "related": { "type": "array", "items": { "$ref": "Tag" } },
        "fallback": { "$ref": "Entry" }
      }
    },
    "Entry": { "type": "object", "properties": {} },
    "Tag": { "type": "object", "properties": {} }
  }));

  let (graph, _) = build_graph(&document);
  let report = &graph.models[0];
  assert_eq!(report.dependencies, ["Entry", "Tag"]);
}

#[test]
fn test_nested_inline_object_references_counted() {
  let document = schemas_document(json!({
    "Bucket": {
      "type": "object",
      "properties": {
        "owner": {
          "type": "object",
          "properties": {
            "entity": { "$ref": "Entity" }
          }
        }
      }
    },
    "Entity": { "type": "object", "properties": {} }
  }));

  let (graph, _) = build_graph(&document);
  assert_eq!(graph.models[0].dependencies, ["Entity"]);
}

#[test]
fn test_unresolved_reference_carries_site_path() {
  let error = build_error(json!({
    "schemas": {
      "Bucket": {
        "type": "object",
        "properties": { "acl": { "$ref": "Missing" } }
      }
    }
  }));

  assert_eq!(
    error,
    GeneratorError::UnresolvedReference {
      path: SchemaPath::root("schemas")
        .child("Bucket")
        .child("properties")
        .child("acl"),
      target: "Missing".to_string(),
    }
  );
}

#[test]
fn test_top_level_primitive_rejected() {
  let error = build_error(json!({
    "schemas": { "Timestamp": { "type": "string", "format": "date-time" } }
  }));

  assert_eq!(
    error,
    GeneratorError::InvalidTopLevelSchema {
      name: "Timestamp".to_string(),
      kind: "primitive",
    }
  );
}

#[test]
fn test_top_level_array_rejected() {
  let error = build_error(json!({
    "schemas": {
      "BucketList": { "type": "array", "items": { "type": "string" } }
    }
  }));

  assert_eq!(
    error,
    GeneratorError::InvalidTopLevelSchema {
      name: "BucketList".to_string(),
      kind: "array",
    }
  );
}

#[test]
fn test_top_level_reference_alias_rejected() {
  let error = build_error(json!({
    "schemas": {
      "Original": { "type": "object", "properties": {} },
      "Alias": { "$ref": "Original" }
    }
  }));

  assert_eq!(
    error,
    GeneratorError::InvalidTopLevelSchema {
      name: "Alias".to_string(),
      kind: "reference",
    }
  );
}

#[test]
fn test_inline_request_body_synthesizes_model_from_method_id() {
  let document = document_from(json!({
    "schemas": {
      "Entity": { "type": "object", "properties": {} }
    },
    "resources": {
      "objects": {
        "methods": {
          "insert": {
            "id": "storage.objects.insert",
            "request": {
              "type": "object",
              "properties": { "entity": { "$ref": "Entity" } }
            }
          }
        }
      }
    }
  }));

  let (graph, _) = build_graph(&document);
  assert_eq!(model_names(&graph.models), ["Entity", "StorageObjectsInsertRequest"]);

  let synthesized = &graph.models[1];
  assert_eq!(synthesized.origin, ModelOrigin::Synthesized);
  assert_eq!(synthesized.dependencies, ["Entity"]);
}

#[test]
fn test_method_without_id_names_from_key_chain() {
  let document = document_from(json!({
    "resources": {
      "buckets": {
        "methods": {
          "insert": {
            "request": { "type": "object", "properties": {} }
          }
        }
      }
    }
  }));

  let mut stats = GenerationStats::default();
  let graph = ModelGraphBuilder::new(&document).build(&mut stats).unwrap();

  assert_eq!(model_names(&graph.models), ["BucketsInsertRequest"]);
  assert!(
    stats
      .warnings
      .iter()
      .any(|warning| matches!(warning, GenerationWarning::MissingMethodId { .. }))
  );
}

#[test]
fn test_ref_body_reuses_declared_model() {
  let document = document_from(json!({
    "schemas": {
      "Bucket": { "type": "object", "properties": {} }
    },
    "resources": {
      "buckets": {
        "methods": {
          "insert": {
            "id": "storage.buckets.insert",
            "request": { "$ref": "Bucket" },
            "response": { "$ref": "Bucket" }
          }
        }
      }
    }
  }));

  let (graph, _) = build_graph(&document);
  assert_eq!(model_names(&graph.models), ["Bucket"]);
}

#[test]
fn test_ref_body_to_unknown_schema_fails() {
  let error = build_error(json!({
    "resources": {
      "buckets": {
        "methods": {
          "get": {
            "id": "storage.buckets.get",
            "response": { "$ref": "Bucket" }
          }
        }
      }
    }
  }));

  let GeneratorError::UnresolvedReference { path, target } = error else {
    panic!("expected unresolved reference error")
  };
  assert_eq!(target, "Bucket");
  assert_eq!(path.to_string(), "resources.buckets.methods.get.response");
}

#[test]
fn test_inline_array_body_becomes_alias_model() {
  let document = document_from(json!({
    "schemas": {
      "Item": { "type": "object", "properties": {} }
    },
    "resources": {
      "items": {
        "methods": {
          "list": {
            "id": "svc.items.list",
            "response": { "type": "array", "items": { "$ref": "Item" } }
          }
        }
      }
    }
  }));

  let (graph, _) = build_graph(&document);
  let alias = &graph.models[1];
  assert_eq!(alias.name, "SvcItemsListResponse");
  assert!(matches!(alias.schema, SchemaNode::Array { .. }));
  assert_eq!(alias.dependencies, ["Item"]);
}

#[test]
fn test_primitive_body_skipped_with_warning() {
  let document = document_from(json!({
    "resources": {
      "meta": {
        "methods": {
          "revision": {
            "id": "svc.meta.revision",
            "response": { "type": "string" }
          }
        }
      }
    }
  }));

  let mut stats = GenerationStats::default();
  let graph = ModelGraphBuilder::new(&document).build(&mut stats).unwrap();

  assert!(graph.models.is_empty());
  assert_eq!(
    stats.warnings,
    vec![GenerationWarning::PrimitiveBodySkipped {
      method: "svc.meta.revision".to_string(),
      slot: "response".to_string(),
    }]
  );
}

#[test]
fn test_synthesized_name_colliding_with_declared_fails() {
  let error = build_error(json!({
    "schemas": {
      "StorageBucketsInsertRequest": { "type": "object", "properties": {} }
    },
    "resources": {
      "buckets": {
        "methods": {
          "insert": {
            "id": "storage.buckets.insert",
            "request": { "type": "object", "properties": {} }
          }
        }
      }
    }
  }));

  let GeneratorError::DuplicateModelName { name, .. } = error else {
    panic!("expected duplicate model name error")
  };
  assert_eq!(name, "StorageBucketsInsertRequest");
}
