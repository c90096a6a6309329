use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::generator::errors::SchemaPath;

/// Decoded shell of a service discovery document.
///
/// Only the structure needed to reach schema fragments is typed; the
/// fragments themselves stay as raw JSON and are normalized by the
/// inferencer. Declaration order is preserved throughout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub schemas: IndexMap<String, Value>,
  #[serde(default)]
  pub methods: IndexMap<String, Method>,
  #[serde(default)]
  pub resources: IndexMap<String, Resource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
  #[serde(default)]
  pub methods: IndexMap<String, Method>,
  #[serde(default)]
  pub resources: IndexMap<String, Resource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub request: Option<Value>,
  #[serde(default)]
  pub response: Option<Value>,
}

/// One method reached during document traversal, with enough identity to
/// synthesize stable model names for its inline bodies.
#[derive(Debug)]
pub struct MethodSite<'a> {
  /// Document path of the method entry.
  pub path: SchemaPath,
  /// Resource/method key chain, the naming fallback when the method
  /// carries no `id`.
  pub key_chain: Vec<String>,
  pub method: &'a Method,
}

impl MethodSite<'_> {
  /// Display identity for diagnostics: the dotted id when present,
  /// otherwise the key chain.
  pub fn identity(&self) -> String {
    self
      .method
      .id
      .clone()
      .unwrap_or_else(|| self.key_chain.join("."))
  }
}

impl DiscoveryDocument {
  /// All methods in declaration order: top-level methods first, then each
  /// resource's own methods before its sub-resources.
  pub fn method_sites(&self) -> Vec<MethodSite<'_>> {
    let mut sites = Vec::new();

    for (key, method) in &self.methods {
      sites.push(MethodSite {
        path: SchemaPath::root("methods").child(key),
        key_chain: vec![key.clone()],
        method,
      });
    }

    for (key, resource) in &self.resources {
      collect_resource_sites(
        resource,
        &SchemaPath::root("resources").child(key),
        &[key.clone()],
        &mut sites,
      );
    }

    sites
  }
}

fn collect_resource_sites<'a>(
  resource: &'a Resource,
  path: &SchemaPath,
  key_chain: &[String],
  sites: &mut Vec<MethodSite<'a>>,
) {
  for (key, method) in &resource.methods {
    let mut chain = key_chain.to_vec();
    chain.push(key.clone());
    sites.push(MethodSite {
      path: path.child("methods").child(key),
      key_chain: chain,
      method,
    });
  }

  for (key, nested) in &resource.resources {
    let mut chain = key_chain.to_vec();
    chain.push(key.clone());
    collect_resource_sites(nested, &path.child("resources").child(key), &chain, sites);
  }
}
