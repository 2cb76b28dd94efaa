//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{InputSource, Solution, SolverOptions};
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;

/// Load settings, wire services and run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    // `config init --config FILE` creates FILE, so it cannot be loaded first
    let config_file = match &cli.command {
        Some(Commands::Config {
            command: ConfigCommands::Init { .. },
        }) => None,
        _ => cli.config.as_deref(),
    };
    let settings = Settings::load(config_file)?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    dispatch(cli, &container)
}

/// Run the selected command against an already wired container.
pub fn dispatch(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Solve { input, explain }) => cmd_solve(container, input, *explain),
        Some(Commands::Tree { input, annotate }) => cmd_tree(container, input, *annotate),
        Some(Commands::Config { command }) => cmd_config(container, cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => cmd_solve(container, &InputArgs::default(), false),
    }
}

/// Command-line flags override loaded settings.
fn options_for(container: &ServiceContainer, input: &InputArgs) -> SolverOptions {
    let mut options = container.solver_options();
    if let Some(sentinel) = input.sentinel {
        options.sentinel = sentinel;
    }
    if let Some(format) = input.format {
        options.format = format;
    }
    options
}

#[instrument(skip(container))]
fn cmd_solve(container: &ServiceContainer, input: &InputArgs, explain: bool) -> CliResult<()> {
    let options = options_for(container, input);
    let source = InputSource::from_arg(input.file.as_deref());
    let solution = container.solver.solve(&source, &options)?;

    output::info(&solution.answer);
    if explain {
        print_explanation(&solution);
    }
    Ok(())
}

fn print_explanation(solution: &Solution) {
    match &solution.best {
        Some(best) => {
            output::detail("best subtree root", &best.value);
            output::detail("best subtree size", &best.size);
        }
        None => output::warning("tree is empty, printed the configured empty-tree answer"),
    }
    output::detail("nodes", &solution.node_count);
    output::detail("depth", &solution.depth);
    output::detail("bst subtrees", &solution.bst_count);
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, input: &InputArgs, annotate: bool) -> CliResult<()> {
    let options = options_for(container, input);
    let source = InputSource::from_arg(input.file.as_deref());
    let rendered = container.solver.render(&source, &options, annotate)?;
    print!("{}", rendered);
    Ok(())
}

fn cmd_config(container: &ServiceContainer, cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("# effective configuration");
            print!("{}", container.settings.to_toml()?);
        }
        ConfigCommands::Init { force } => {
            let path = container.init_config(cli.config.as_deref(), *force)?;
            output::action("Created", &path.display());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::detail("global", &path.display()),
                None => output::detail("global", &"<no home directory>"),
            }
            if let Some(path) = &cli.config {
                output::detail("file", &path.display());
            }
        }
    }
    Ok(())
}
