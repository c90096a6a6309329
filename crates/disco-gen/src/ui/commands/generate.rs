use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    metrics::GenerationStats,
    orchestrator::{GenerationOutput, Orchestrator},
  },
  ui::{Colors, GenerateCommand},
  utils::loader::DocumentLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: String,
  pub output: PathBuf,
  pub pretty: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input,
      output,
      pretty,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      output,
      pretty,
      verbose,
      quiet,
    }
  }

  fn render(&self, output: &GenerationOutput) -> anyhow::Result<String> {
    let rendered = if self.pretty {
      serde_json::to_string_pretty(&output.models)?
    } else {
      serde_json::to_string(&output.models)?
    };
    Ok(rendered)
  }

  async fn write_output(&self, rendered: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, rendered).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "           {:<22} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading discovery document from: {}", self.config.input)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Deriving model definitions...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Schemas declared:", stats.schemas_declared.to_string());
    self.stat("Models generated:", stats.models_generated.to_string());
    self.stat("", format!("{} objects", stats.objects_generated));
    self.stat("", format!("{} enums", stats.enums_generated));
    if stats.aliases_generated > 0 {
      self.stat("", format!("{} aliases", stats.aliases_generated));
    }
    if stats.models_synthesized > 0 {
      self.stat("Synthesized:", stats.models_synthesized.to_string());
    }
    if stats.recursive_models > 0 {
      self.stat("Recursive models:", stats.recursive_models.to_string());
    }
    if stats.deferred_edges > 0 {
      self.stat("Deferred edges:", stats.deferred_edges.to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "             {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" <-> ").with(self.colors.primary())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self, metadata_name: &str) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated models for `{metadata_name}`").with(self.colors.success())
      );
    }
  }
}

pub async fn generate_models(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = DocumentLoader::from_location(&config.input).load().await?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(document);
  let metadata = orchestrator.metadata();
  let output = orchestrator.generate()?;

  logger.print_statistics(&output.stats);
  logger.log_writing();

  let rendered = config.render(&output)?;
  config.write_output(rendered).await?;

  logger.log_success(&metadata.name);
  Ok(())
}
