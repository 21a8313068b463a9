//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, RenderArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let local_dir = cli
        .config_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let settings = Settings::load(local_dir.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => _render(&container, &RenderArgs::default()),
        Some(Commands::Render(args)) => _render(&container, args),
        Some(Commands::Check { file }) => _check(&container, file.as_deref()),
        Some(Commands::Normalize { file }) => _normalize(&container, file.as_deref()),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&container),
            ConfigCommands::Path => _config_path(local_dir.as_deref()),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Positional argument wins over the configured input.
fn input_path(container: &ServiceContainer, file: Option<&Path>) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.input.clone())
}

fn flush(out: &mut impl Write) -> CliResult<()> {
    out.flush()
        .map_err(|e| InfraError::io("flush stdout", e).into())
}

#[instrument(skip(container))]
fn _render(container: &ServiceContainer, args: &RenderArgs) -> CliResult<()> {
    let path = input_path(container, args.file.as_deref());
    let mut options = container.render_options();
    if let Some(limit) = args.limit {
        options.tree_limit = limit;
    }
    options.strict |= args.strict;

    let forest = container.render_service.load(&path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = container.render_service.render(&forest, options, &mut out);
    flush(&mut out)?;
    let summary = result?;

    for report in &summary.incomplete {
        output::warning(&format!(
            "tree {}: {} unplaced node(s) not rendered",
            report.tree, report.unplaced
        ));
    }
    debug!(
        "rendered {} trees, skipped {}",
        summary.rendered, summary.skipped
    );
    Ok(())
}

#[instrument(skip(container))]
fn _check(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = input_path(container, file);
    let forest = container.render_service.load(&path)?;
    let reports = container.render_service.check(&forest);

    let mut incomplete = 0;
    for report in &reports {
        if report.is_complete() {
            output::success(&format!(
                "tree {}: ok ({} levels, {} nodes)",
                report.tree, report.levels, report.placed
            ));
        } else {
            incomplete += 1;
            output::failure(&format!(
                "tree {}: {} unplaced nodes",
                report.tree, report.unplaced
            ));
        }
    }

    if incomplete > 0 {
        return Err(CliError::Incomplete(incomplete));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _normalize(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = input_path(container, file);
    let forest = container.render_service.load(&path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    container.render_service.normalize(&forest, &mut out)?;
    flush(&mut out)
}

fn _config_show(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn _config_path(local_dir: Option<&Path>) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("global", &path.display()),
        None => output::action("global", "(no config directory)"),
    }
    if let Some(dir) = local_dir {
        output::action("local", &local_config_path(dir).display());
    }
    Ok(())
}
