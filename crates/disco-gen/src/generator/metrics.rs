use strum::Display;

use crate::generator::model::{ModelDefinition, ModelOrigin, SchemaNode};

/// Counters and non-fatal findings from one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub schemas_declared: usize,
  pub models_generated: usize,
  pub objects_generated: usize,
  pub enums_generated: usize,
  pub aliases_generated: usize,
  pub models_synthesized: usize,
  pub recursive_models: usize,
  pub deferred_edges: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_model(&mut self, model: &ModelDefinition) {
    self.models_generated += 1;
    if model.origin == ModelOrigin::Synthesized {
      self.models_synthesized += 1;
    }
    match &model.schema {
      SchemaNode::Object { .. } => self.objects_generated += 1,
      SchemaNode::Enum { .. } => self.enums_generated += 1,
      _ => self.aliases_generated += 1,
    }
  }

  pub fn record_models(&mut self, models: &[ModelDefinition]) {
    for model in models {
      self.record_model(model);
    }
  }

  /// Tally the ordering annotations after emission.
  pub fn record_flags(&mut self, models: &[ModelDefinition]) {
    for model in models {
      if model.recursive {
        self.recursive_models += 1;
      }
      self.deferred_edges += model.deferred.len();
    }
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Method `{method}`: inline {slot} body is a bare primitive, no model emitted")]
  PrimitiveBodySkipped { method: String, slot: String },
  #[strum(to_string = "Method at `{path}` has no id; synthesized names fall back to its key path")]
  MissingMethodId { path: String },
}
