//! Full-pipeline tests over a trimmed-down storage discovery document.

use crate::generator::{
  document::DiscoveryDocument,
  model::{ModelOrigin, PrimitiveType, SchemaNode},
  orchestrator::{GenerationOutput, Orchestrator},
};

const STORAGE_DOC: &str = r#"{
  "name": "storage",
  "version": "v1",
  "title": "Cloud Storage JSON API",
  "schemas": {
    "Buckets": {
      "type": "object",
      "description": "A list of buckets.",
      "properties": {
        "kind": { "type": "string", "default": "storage#buckets" },
        "items": { "type": "array", "items": { "$ref": "Bucket" } },
        "nextPageToken": { "type": "string" }
      }
    },
    "Bucket": {
      "type": "object",
      "description": "A bucket.",
      "required": ["name"],
      "properties": {
        "name": { "type": "string" },
        "timeCreated": { "type": "string", "format": "date-time" },
        "metageneration": { "type": "string", "format": "int64" },
        "storageClass": {
          "type": "string",
          "enum": ["STANDARD", "NEARLINE"],
          "enumDescriptions": ["Standard storage"]
        },
        "acl": { "type": "array", "items": { "$ref": "BucketAccessControl" } },
        "owner": {
          "type": "object",
          "properties": {
            "entity": { "type": "string" },
            "entityId": { "type": "string" }
          }
        }
      }
    },
    "BucketAccessControl": {
      "type": "object",
      "properties": {
        "entity": { "type": "string" },
        "role": { "type": "string" },
        "bucket": { "type": "string" }
      }
    }
  },
  "resources": {
    "buckets": {
      "methods": {
        "insert": {
          "id": "storage.buckets.insert",
          "request": { "$ref": "Bucket" },
          "response": { "$ref": "Bucket" }
        },
        "list": {
          "id": "storage.buckets.list",
          "response": { "$ref": "Buckets" }
        },
        "patch": {
          "id": "storage.buckets.patch",
          "request": {
            "type": "object",
            "properties": {
              "bucket": { "$ref": "Bucket" },
              "fields": { "type": "string" }
            }
          },
          "response": { "$ref": "Bucket" }
        }
      }
    }
  }
}"#;

fn generate() -> GenerationOutput {
  let document: DiscoveryDocument = serde_json::from_str(STORAGE_DOC).expect("failed to decode storage document");
  Orchestrator::new(document).generate().expect("generation failed")
}

fn index_of(output: &GenerationOutput, name: &str) -> usize {
  output
    .models
    .iter()
    .position(|model| model.name == name)
    .unwrap_or_else(|| panic!("model {name} missing"))
}

#[test]
fn test_storage_document_model_set() {
  let output = generate();

  let names: Vec<&str> = output.models.iter().map(|model| model.name.as_str()).collect();
  assert_eq!(
    names,
    [
      "BucketAccessControl",
      "Bucket",
      "Buckets",
      "StorageBucketsPatchRequest",
    ]
  );
}

#[test]
fn test_storage_document_dependency_order() {
  let output = generate();

  assert!(index_of(&output, "BucketAccessControl") < index_of(&output, "Bucket"));
  assert!(index_of(&output, "Bucket") < index_of(&output, "Buckets"));
  assert!(index_of(&output, "Bucket") < index_of(&output, "StorageBucketsPatchRequest"));

  for model in &output.models {
    assert!(!model.recursive, "{} unexpectedly recursive", model.name);
    assert!(model.deferred.is_empty(), "{} unexpectedly deferred", model.name);
  }
}

#[test]
fn test_storage_document_field_details() {
  let output = generate();
  let bucket = &output.models[index_of(&output, "Bucket")];

  assert_eq!(bucket.description.as_deref(), Some("A bucket."));

  let SchemaNode::Object { properties } = &bucket.schema else {
    panic!("expected Bucket to be an object")
  };

  assert!(properties["name"].required);
  assert!(!properties["timeCreated"].required);
  assert_eq!(
    properties["timeCreated"].schema,
    SchemaNode::Primitive {
      primitive: PrimitiveType::DateTime
    }
  );
  assert_eq!(
    properties["metageneration"].schema,
    SchemaNode::Primitive {
      primitive: PrimitiveType::Int64
    }
  );

  let SchemaNode::Enum { values } = &properties["storageClass"].schema else {
    panic!("expected storageClass enum")
  };
  assert_eq!(values[0].description, "Standard storage");
  assert_eq!(values[1].description, "");

  // The inline owner object stays part of Bucket rather than becoming a
  // separate model.
  assert_eq!(properties["owner"].schema.kind(), "object");
}

#[test]
fn test_storage_document_synthesized_patch_request() {
  let output = generate();
  let patch = &output.models[index_of(&output, "StorageBucketsPatchRequest")];

  assert_eq!(patch.origin, ModelOrigin::Synthesized);
  assert_eq!(patch.dependencies, ["Bucket"]);
}

#[test]
fn test_storage_document_stats() {
  let output = generate();

  assert_eq!(output.stats.schemas_declared, 3);
  assert_eq!(output.stats.models_generated, 4);
  assert_eq!(output.stats.objects_generated, 4);
  assert_eq!(output.stats.models_synthesized, 1);
  assert_eq!(output.stats.cycles_detected, 0);
  assert!(output.stats.warnings.is_empty());
}

#[test]
fn test_storage_document_serialization_is_stable() {
  let first = serde_json::to_string_pretty(&generate().models).unwrap();
  let second = serde_json::to_string_pretty(&generate().models).unwrap();
  assert_eq!(first, second);

  // Spot-check the serialized contract consumed by downstream emitters.
  assert!(first.contains(r#""kind": "object""#));
  assert!(first.contains(r#""target": "Bucket""#));
  assert!(first.contains(r#""origin": "synthesized""#));
}
