use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use itertools::Itertools;
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::generator::{errors::GeneratorError, metrics::GenerationStats, model::ModelDefinition};

/// Three-color DFS visitation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  Unvisited,
  InProgress,
  Done,
}

/// Orders the model set so every model follows its non-self, non-deferred
/// dependencies.
///
/// Self-loops are flagged `recursive` and excluded from ordering. Cycles
/// between distinct models are broken deterministically: the alphabetically
/// first member of each strongly connected component has its edges into the
/// component marked `deferred`, leaving the remaining direction to govern
/// the order. Otherwise-unordered models keep their declaration order.
pub(crate) struct TopologicalEmitter {
  models: IndexMap<String, ModelDefinition>,
}

impl TopologicalEmitter {
  pub(crate) fn new(models: Vec<ModelDefinition>) -> Self {
    let models = models
      .into_iter()
      .map(|model| (model.name.clone(), model))
      .collect();
    Self { models }
  }

  pub(crate) fn emit(mut self, stats: &mut GenerationStats) -> Result<Vec<ModelDefinition>, GeneratorError> {
    self.flag_recursive_models();

    let mut edges = self.ordering_edges();
    self.break_cycles(&mut edges, stats)?;

    let order = self.topological_order(&edges)?;
    let mut output = Vec::with_capacity(order.len());
    for name in &order {
      if let Some(model) = self.models.shift_remove(name) {
        output.push(model);
      }
    }

    stats.record_flags(&output);
    Ok(output)
  }

  fn flag_recursive_models(&mut self) {
    for model in self.models.values_mut() {
      if model.dependencies.iter().any(|dep| *dep == model.name) {
        model.recursive = true;
      }
    }
  }

  /// Ordering edges per model: recorded dependency order, self-loops
  /// excluded.
  fn ordering_edges(&self) -> BTreeMap<String, Vec<String>> {
    self
      .models
      .values()
      .map(|model| {
        let deps = model
          .dependencies
          .iter()
          .filter(|dep| **dep != model.name)
          .filter(|dep| self.models.contains_key(dep.as_str()))
          .cloned()
          .collect();
        (model.name.clone(), deps)
      })
      .collect()
  }

  /// Defers the alphabetically-first member's in-component edges until the
  /// graph is acyclic. Each pass shrinks every remaining component, so
  /// running out of passes means a logic bug, not a document defect.
  fn break_cycles(
    &mut self,
    edges: &mut BTreeMap<String, Vec<String>>,
    stats: &mut GenerationStats,
  ) -> Result<(), GeneratorError> {
    for cycle in cyclic_components(edges) {
      stats.record_cycle(cycle);
    }

    for _ in 0..=self.models.len() {
      let components = cyclic_components(edges);
      if components.is_empty() {
        return Ok(());
      }

      for members in components {
        let Some(anchor) = members.first().cloned() else { continue };
        let member_set: BTreeSet<&String> = members.iter().collect();

        let Some(outgoing) = edges.get_mut(&anchor) else { continue };
        let (deferred, kept): (Vec<String>, Vec<String>) =
          outgoing.drain(..).partition(|dep| member_set.contains(dep));
        *outgoing = kept;

        if let Some(model) = self.models.get_mut(&anchor) {
          model.deferred.extend(deferred);
        }
      }
    }

    Err(GeneratorError::UnresolvedCycle {
      members: self.models.keys().cloned().collect(),
    })
  }

  fn topological_order<'a>(
    &'a self,
    edges: &'a BTreeMap<String, Vec<String>>,
  ) -> Result<Vec<String>, GeneratorError> {
    let mut marks: BTreeMap<&'a str, Mark> = self
      .models
      .keys()
      .map(|name| (name.as_str(), Mark::Unvisited))
      .collect();
    let mut order = Vec::with_capacity(self.models.len());

    // Roots in declaration order keep unrelated models stable across runs.
    for name in self.models.keys() {
      self.visit(name.as_str(), edges, &mut marks, &mut order)?;
    }

    Ok(order)
  }

  fn visit<'a>(
    &'a self,
    name: &'a str,
    edges: &'a BTreeMap<String, Vec<String>>,
    marks: &mut BTreeMap<&'a str, Mark>,
    order: &mut Vec<String>,
  ) -> Result<(), GeneratorError> {
    match marks.get(name).copied().unwrap_or(Mark::Done) {
      Mark::Done => return Ok(()),
      Mark::InProgress => {
        // Cycle breaking removed every back edge; reaching a gray node is a
        // terminal logic failure, not a document defect.
        return Err(GeneratorError::UnresolvedCycle {
          members: vec![name.to_string()],
        });
      }
      Mark::Unvisited => {}
    }

    marks.insert(name, Mark::InProgress);

    if let Some(deps) = edges.get(name) {
      for dep in deps {
        self.visit(dep.as_str(), edges, marks, order)?;
      }
    }

    marks.insert(name, Mark::Done);
    order.push(name.to_string());
    Ok(())
  }
}

/// Strongly connected components of size > 1, members sorted, components
/// ordered by their first member. Self-loops are excluded from the edge set
/// before this runs, so single-node components are never cyclic here.
fn cyclic_components(edges: &BTreeMap<String, Vec<String>>) -> Vec<Vec<String>> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for (node, deps) in edges {
    graph.add_node(node.as_str());
    for dep in deps {
      graph.add_edge(node.as_str(), dep.as_str(), ());
    }
  }

  kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1)
    .map(|scc| scc.into_iter().map(String::from).sorted().collect::<Vec<_>>())
    .sorted()
    .collect()
}
