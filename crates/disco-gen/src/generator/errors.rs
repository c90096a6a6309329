use thiserror::Error;

/// Dotted location of a schema fragment inside the discovery document,
/// e.g. `schemas.Bucket.properties.acl.items`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaPath {
  segments: Vec<String>,
}

impl SchemaPath {
  pub fn root(segment: &str) -> Self {
    Self {
      segments: vec![segment.to_string()],
    }
  }

  #[must_use]
  pub fn child(&self, segment: &str) -> Self {
    let mut segments = self.segments.clone();
    segments.push(segment.to_string());
    Self { segments }
  }
}

impl std::fmt::Display for SchemaPath {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.segments.join("."))
  }
}

/// Fatal defects in a discovery document.
///
/// Every variant aborts the whole generation run; no partial model set is
/// ever returned. Schema errors are deterministic document defects, so none
/// of these are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
  #[error("schema fragment at `{path}` has unrecognized type/format combination `{type_name}` / `{format}`")]
  UnsupportedTypeFormat {
    path: SchemaPath,
    type_name: String,
    format: String,
  },

  #[error("array schema at `{path}` is missing an `items` definition")]
  MissingArrayItems { path: SchemaPath },

  #[error("schema fragment at `{path}` is not a JSON object")]
  MalformedFragment { path: SchemaPath },

  #[error("enum schema at `{path}` contains a non-string value")]
  InvalidEnumValue { path: SchemaPath },

  #[error("reference at `{path}` names `{target}`, which is not a declared schema")]
  UnresolvedReference { path: SchemaPath, target: String },

  #[error("top-level schema `{name}` is a bare {kind} and cannot stand alone as a model")]
  InvalidTopLevelSchema { name: String, kind: &'static str },

  #[error("model name `{name}` is assigned to more than one schema (second occurrence at `{path}`)")]
  DuplicateModelName { name: String, path: SchemaPath },

  #[error("dependency cycle could not be broken: {}", .members.join(" -> "))]
  UnresolvedCycle { members: Vec<String> },
}
