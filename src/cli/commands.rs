//! Command dispatch

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, OutputFormat};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{render_indented, render_json, render_tree};
use crate::config::{global_config_path, project_config_path, Settings};
use crate::domain::MatchMode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = cli
        .project_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    match &cli.command {
        Some(Commands::Config { command }) => execute_config(command, &project_dir),
        None => execute_tree(cli, &project_dir),
    }
}

/// Settings from config files and env, with command line flags on top.
fn effective_settings(cli: &Cli, project_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(project_dir))?;
    if let Some(root) = &cli.root {
        settings.source_root = Some(root.clone());
    }
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = Some(max_depth);
    }
    if cli.word_boundary {
        settings.match_mode = MatchMode::Word;
    }
    if cli.memoize {
        settings.memoize = true;
    }
    Ok(settings)
}

#[instrument(level = "debug", skip(cli))]
fn execute_tree(cli: &Cli, project_dir: &Path) -> CliResult<()> {
    let Some(entry) = cli.entry.as_deref() else {
        let usage = Cli::command().render_usage();
        return Err(CliError::Usage(format!("missing entry file\n\n{usage}")));
    };

    let settings = effective_settings(cli, project_dir)?;
    let source_root = settings.source_root_for(entry);
    debug!(
        entry = %entry.display(),
        source_root = %source_root.display(),
        match_mode = %settings.match_mode,
        "building tree"
    );

    let container = ServiceContainer::new(settings);
    let service = container.hierarchy_service()?;
    let root = service.build(entry, &source_root)?;

    let rendered = match cli.format {
        OutputFormat::Indented => render_indented(&root),
        OutputFormat::Tree => render_tree(&root),
        OutputFormat::Json => render_json(&root)?,
    };
    output::info(rendered.trim_end_matches('\n'));
    Ok(())
}

fn execute_config(cmd: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => config_show(project_dir),
        ConfigCommands::Init { write } => config_init(project_dir, *write),
        ConfigCommands::Path => config_path(project_dir),
    }
}

fn config_show(project_dir: &Path) -> CliResult<()> {
    let settings = Settings::load(Some(project_dir))?;
    output::header("# Effective configuration");
    output::info(settings.to_toml()?.trim_end_matches('\n'));
    Ok(())
}

fn config_init(project_dir: &Path, write: bool) -> CliResult<()> {
    let template = Settings::template();
    if !write {
        output::info(template.trim_end_matches('\n'));
        return Ok(());
    }

    let fs = RealFileSystem;
    let path = project_config_path(project_dir);
    if fs.exists(&path) {
        return Err(CliError::InvalidArgs(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    fs.write(&path, &template)
        .map_err(|e| InfraError::write(&path, e))?;
    output::success(&format!("Created {}", path.display()));
    Ok(())
}

fn config_path(project_dir: &Path) -> CliResult<()> {
    let fs = RealFileSystem;
    let describe = |path: &Path| {
        let marker = if fs.exists(path) { "" } else { " (not found)" };
        format!("{}{marker}", path.display())
    };

    output::header("Global config:");
    match global_config_path() {
        Some(path) => output::detail(&describe(&path)),
        None => output::detail("(no config directory on this platform)"),
    }
    output::header("Project config:");
    output::detail(&describe(&project_config_path(project_dir)));
    Ok(())
}
