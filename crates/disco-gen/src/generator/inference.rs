use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::generator::{
  errors::{GeneratorError, SchemaPath},
  model::{EnumValueDef, PrimitiveType, PropertyDef, SchemaNode},
};

/// Normalizes one raw schema fragment into a `SchemaNode`.
///
/// Dispatch order: `$ref`, then `enum`, then arrays, then objects, then the
/// primitive table. A fragment matching none of these is rejected with the
/// offending path, never defaulted.
///
/// Pure function of the fragment and the format table; no side effects.
pub(crate) fn infer(fragment: &Value, path: &SchemaPath) -> Result<SchemaNode, GeneratorError> {
  let Some(map) = fragment.as_object() else {
    return Err(GeneratorError::MalformedFragment { path: path.clone() });
  };

  if let Some(reference) = map.get("$ref") {
    // The discovery format guarantees a reference carries no sibling type
    // info, so everything else on the fragment is ignored.
    let Some(target) = reference.as_str() else {
      return Err(GeneratorError::MalformedFragment {
        path: path.child("$ref"),
      });
    };
    return Ok(SchemaNode::Reference {
      target: target.to_string(),
    });
  }

  if map.contains_key("enum") {
    return infer_enum(map, path);
  }

  match map.get("type").and_then(Value::as_str) {
    Some("array") => infer_array(map, path),
    Some("object") => infer_object(map, path),
    None if map.contains_key("properties") => infer_object(map, path),
    declared => infer_primitive(declared, map.get("format").and_then(Value::as_str), path),
  }
}

fn infer_enum(map: &Map<String, Value>, path: &SchemaPath) -> Result<SchemaNode, GeneratorError> {
  let Some(raw_values) = map.get("enum").and_then(Value::as_array) else {
    return Err(GeneratorError::MalformedFragment {
      path: path.child("enum"),
    });
  };

  let descriptions = map
    .get("enumDescriptions")
    .and_then(Value::as_array)
    .map(Vec::as_slice)
    .unwrap_or_default();

  let mut values = Vec::with_capacity(raw_values.len());
  for (index, raw) in raw_values.iter().enumerate() {
    let Some(value) = raw.as_str() else {
      return Err(GeneratorError::InvalidEnumValue {
        path: path.child("enum"),
      });
    };

    // Positional pairing with enumDescriptions; the shorter list governs.
    // Missing descriptions become empty, excess descriptions are dropped.
    let description = descriptions
      .get(index)
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string();

    values.push(EnumValueDef {
      value: value.to_string(),
      description,
    });
  }

  Ok(SchemaNode::Enum { values })
}

fn infer_array(map: &Map<String, Value>, path: &SchemaPath) -> Result<SchemaNode, GeneratorError> {
  let Some(items) = map.get("items") else {
    return Err(GeneratorError::MissingArrayItems { path: path.clone() });
  };

  let items = infer(items, &path.child("items"))?;
  Ok(SchemaNode::Array {
    items: Box::new(items),
  })
}

fn infer_object(map: &Map<String, Value>, path: &SchemaPath) -> Result<SchemaNode, GeneratorError> {
  let required_names: Vec<&str> = map
    .get("required")
    .and_then(Value::as_array)
    .map(|names| names.iter().filter_map(Value::as_str).collect())
    .unwrap_or_default();

  let mut properties = IndexMap::new();

  if let Some(raw_properties) = map.get("properties") {
    let Some(raw_properties) = raw_properties.as_object() else {
      return Err(GeneratorError::MalformedFragment {
        path: path.child("properties"),
      });
    };

    let properties_path = path.child("properties");
    for (name, raw) in raw_properties {
      let property_path = properties_path.child(name);
      let schema = infer(raw, &property_path)?;

      // Required-ness comes from the object's `required` list or the
      // per-property annotation the discovery format itself uses.
      let annotated = raw.get("required").and_then(Value::as_bool).unwrap_or(false);

      properties.insert(
        name.clone(),
        PropertyDef {
          schema,
          required: annotated || required_names.contains(&name.as_str()),
          default: raw.get("default").cloned(),
          description: raw
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        },
      );
    }
  }

  Ok(SchemaNode::Object { properties })
}

fn infer_primitive(
  declared: Option<&str>,
  format: Option<&str>,
  path: &SchemaPath,
) -> Result<SchemaNode, GeneratorError> {
  let primitive = match (declared, format) {
    (Some("any"), None) => PrimitiveType::Any,
    (Some("boolean"), None) => PrimitiveType::Bool,
    (Some("integer"), None | Some("int32")) => PrimitiveType::Int32,
    (Some("integer"), Some("uint32")) => PrimitiveType::Uint32,
    (Some("integer"), Some("int64")) => PrimitiveType::Int64,
    (Some("integer"), Some("uint64")) => PrimitiveType::Uint64,
    (Some("number"), None | Some("double")) => PrimitiveType::Double,
    (Some("number"), Some("float")) => PrimitiveType::Float,
    (Some("string"), None) => PrimitiveType::String,
    (Some("string"), Some("byte")) => PrimitiveType::Bytes,
    (Some("string"), Some("date")) => PrimitiveType::Date,
    (Some("string"), Some("date-time" | "google-datetime")) => PrimitiveType::DateTime,
    // Discovery serializes 64-bit integers as strings.
    (Some("string"), Some("int64")) => PrimitiveType::Int64,
    (Some("string"), Some("uint64")) => PrimitiveType::Uint64,
    (Some("string"), Some("int32")) => PrimitiveType::Int32,
    (Some("string"), Some("uint32")) => PrimitiveType::Uint32,
    (Some("string"), Some("google-duration" | "google-fieldmask")) => PrimitiveType::String,
    (declared, format) => {
      return Err(GeneratorError::UnsupportedTypeFormat {
        path: path.clone(),
        type_name: declared.unwrap_or("<missing>").to_string(),
        format: format.unwrap_or("<none>").to_string(),
      });
    }
  };

  Ok(SchemaNode::Primitive { primitive })
}
