use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use strum::Display;

/// Canonical primitive types the discovery `type`/`format` vocabulary maps
/// onto. Discovery serializes 64-bit integers as strings, so the integer
/// variants are reachable from both `integer` and `string` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PrimitiveType {
  Any,
  Bool,
  Int32,
  Uint32,
  Int64,
  Uint64,
  Float,
  Double,
  String,
  Bytes,
  Date,
  DateTime,
}

/// One field of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDef {
  pub schema: SchemaNode,
  pub required: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// One enum literal paired with its positional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValueDef {
  pub value: String,
  pub description: String,
}

/// Normalized representation of one schema fragment.
///
/// The variant is fixed at construction time; downstream code matches on the
/// tag instead of re-inspecting raw JSON, so a node can never carry payload
/// inconsistent with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaNode {
  Primitive { primitive: PrimitiveType },
  Array { items: Box<SchemaNode> },
  Object { properties: IndexMap<String, PropertyDef> },
  Enum { values: Vec<EnumValueDef> },
  Reference { target: String },
}

impl SchemaNode {
  /// Kind tag for diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      SchemaNode::Primitive { .. } => "primitive",
      SchemaNode::Array { .. } => "array",
      SchemaNode::Object { .. } => "object",
      SchemaNode::Enum { .. } => "enum",
      SchemaNode::Reference { .. } => "reference",
    }
  }

  /// Whether this node can stand alone as a declared top-level model.
  pub fn is_model_root(&self) -> bool {
    matches!(self, SchemaNode::Object { .. } | SchemaNode::Enum { .. })
  }
}
