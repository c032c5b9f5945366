mod artifact;
mod commands;
mod compliance;
mod core;
mod engine;
mod gate;
mod poll;
mod version;

use clap::{Parser, Subcommand};
use crate::commands::decide::DecideOptions;
use crate::core::error::{GateError, print_error};
use std::path::PathBuf;

/// Release-decision engine for build pipelines
#[derive(Parser)]
#[command(name = "release-gate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the full release decision: version, analysis wait, quality gate, policy, routing
  Decide {
    /// Branch being built ("master" routes to the release repository)
    #[arg(long)]
    branch: String,
    /// Free-text change trigger (e.g. "fix-null-deref"); omit for no bump
    #[arg(long)]
    trigger: Option<String>,
    /// Single-line version file to read and (with --apply) update
    #[arg(long)]
    version_file: Option<PathBuf>,
    /// TOML build descriptor with a version assignment to read and update
    #[arg(long)]
    descriptor: Option<PathBuf>,
    /// Analysis task id to await (requires --task-status-file)
    #[arg(long, requires = "task_status_file")]
    task_id: Option<String>,
    /// Status document for the analysis task, refreshed by the pipeline
    #[arg(long, requires = "task_id")]
    task_status_file: Option<PathBuf>,
    /// Project key of the quality gate
    #[arg(long)]
    project_key: String,
    /// Status document for the quality gate, refreshed by the pipeline
    #[arg(long)]
    gate_status_file: PathBuf,
    /// Compliance report JSON produced by the security scan
    #[arg(long)]
    report: PathBuf,
    /// Actually write the new version to its sources (default: dry-run)
    #[arg(long)]
    apply: bool,
    /// Output the decision record in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Resolve a version bump from a trigger without gating or routing
  Version {
    /// Free-text change trigger
    #[arg(long)]
    trigger: Option<String>,
    /// Single-line version file
    #[arg(long)]
    version_file: Option<PathBuf>,
    /// TOML build descriptor with a version assignment
    #[arg(long)]
    descriptor: Option<PathBuf>,
    /// Actually write the new version (default: dry-run)
    #[arg(long)]
    apply: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Compute the branch-conditional artifact target
  // --version here is the artifact version, not the binary version flag
  #[command(disable_version_flag = true)]
  Route {
    /// Branch being built
    #[arg(long)]
    branch: String,
    /// Artifact repository base name
    #[arg(long)]
    base_name: String,
    /// Version to publish under
    #[arg(long)]
    version: String,
    /// Artifact file name (default: "{base_name}-{version}.tar.gz")
    #[arg(long)]
    file_name: Option<String>,
    /// Output the target in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Evaluate a compliance report against the severity thresholds
  Policy {
    /// Compliance report JSON file
    #[arg(long)]
    report: PathBuf,
    /// Output the verdict in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Decide {
      branch,
      trigger,
      version_file,
      descriptor,
      task_id,
      task_status_file,
      project_key,
      gate_status_file,
      report,
      apply,
      json,
    } => commands::run_decide(DecideOptions {
      trigger,
      branch,
      version_file,
      descriptor,
      task_id,
      task_status_file,
      project_key,
      gate_status_file,
      report,
      apply,
      json,
    }),

    Commands::Version {
      trigger,
      version_file,
      descriptor,
      apply,
      json,
    } => commands::run_version(trigger, version_file, descriptor, apply, json),

    Commands::Route {
      branch,
      base_name,
      version,
      file_name,
      json,
    } => commands::run_route(branch, base_name, version, file_name, json),

    Commands::Policy { report, json } => commands::run_policy(report, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
