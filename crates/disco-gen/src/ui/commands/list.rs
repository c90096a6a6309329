use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{model::ModelDefinition, orchestrator::Orchestrator},
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::loader::DocumentLoader,
};

fn flags(model: &ModelDefinition) -> String {
  let mut parts = Vec::new();
  if model.recursive {
    parts.push("recursive".to_string());
  }
  if !model.deferred.is_empty() {
    parts.push(format!("deferred: {}", model.deferred.join(", ")));
  }
  parts.join(", ")
}

pub async fn list_models(input: &str, colors: &Colors) -> anyhow::Result<()> {
  let document = DocumentLoader::from_location(input).load().await?;
  let output = Orchestrator::new(document).generate()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("#").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("MODEL").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("KIND").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("DEPS").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("FLAGS").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for (position, model) in output.models.iter().enumerate() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(position + 1)
        .fg(IntoComfyColor::into(colors.value()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(
      Cell::new(&model.name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(model.schema.kind()).fg(IntoComfyColor::into(colors.accent())));
    row.add_cell(
      Cell::new(model.dependencies.len())
        .fg(IntoComfyColor::into(colors.primary()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(flags(model)).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
