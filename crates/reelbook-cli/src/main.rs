use clap::{ArgAction, Parser, Subcommand};
use commands::{add, browse, config, delete, edit, list, show, update, AppContext, DraftArgs};
use movie_sync_models::Genre;
use std::path::{Path, PathBuf};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelbook")]
#[command(about = "ReelBook - Keep your movie catalog in sync from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (defaults to <config dir>/logs/reelbook.log)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    /// Directory holding config.toml (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Catalog(CatalogCommands),
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List movies in the catalog
    #[command(long_about = "Fetch the catalog from the backend and show it as a table. Filters are applied genre first, then by case-insensitive name search.")]
    List {
        /// Only show movies of this genre (Action, Comedy, Drama, Horror, Sci-Fi, Fantasy)
        #[arg(long, value_parser = parse_genre)]
        genre: Option<Genre>,

        /// Only show movies whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single movie
    Show {
        /// Movie id
        id: String,
    },
    /// Add a movie (prompts for any field not given)
    Add {
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Edit a movie from the catalog list
    #[command(long_about = "Load the catalog, open the movie in the form and save the changes. Fields not given as flags are prompted for with the current value as default.")]
    Edit {
        /// Movie id
        id: String,

        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Update a movie by id, then return to the list
    #[command(long_about = "Fetch one movie by id, edit it and send the update. After a successful update the notice is shown and the list is reloaded once the redirect delay has passed.")]
    Update {
        /// Movie id
        id: String,

        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Delete a movie
    Delete {
        /// Movie id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Interactive catalog session
    #[command(long_about = "Browse the catalog interactively: filter by genre, search, add, edit and delete movies. Alerts are shown after each action.")]
    Browse,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Set the backend base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:8081
        url: String,
    },
}

fn parse_genre(value: &str) -> Result<Genre, String> {
    value.parse::<Genre>().map_err(|e| e.to_string())
}

/// `--log-file` without a value logs to the default file under the config directory
fn resolve_log_file(log_file: Option<Option<PathBuf>>, config_dir: Option<&Path>) -> Option<PathBuf> {
    log_file.map(|path| path.unwrap_or_else(|| commands::path_manager(config_dir).log_file()))
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = resolve_log_file(cli.log_file, cli.config_dir.as_deref());
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Config { cmd } => config::run_config(cmd, cli.config_dir.as_deref(), &output),
        Commands::Catalog(command) => {
            let ctx = AppContext::load(cli.config_dir.as_deref())?;
            run_catalog_command(command, &ctx, &output).await
        }
    }
}

async fn run_catalog_command(command: CatalogCommands, ctx: &AppContext, output: &output::Output) -> color_eyre::Result<()> {
    match command {
        CatalogCommands::List { genre, search } => list::run_list(ctx, genre, search, output).await,
        CatalogCommands::Show { id } => show::run_show(ctx, &id, output).await,
        CatalogCommands::Add { fields } => add::run_add(ctx, &fields, output).await,
        CatalogCommands::Edit { id, fields } => edit::run_edit(ctx, &id, &fields, output).await,
        CatalogCommands::Update { id, fields } => update::run_update(ctx, &id, &fields, output).await,
        CatalogCommands::Delete { id, yes } => delete::run_delete(ctx, &id, yes, output).await,
        CatalogCommands::Browse => browse::run_browse(ctx, output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_log_file_uses_config_dir_default() {
        let cli = Cli::try_parse_from(["reelbook", "--config-dir", "/tmp/reelbook-cfg", "list", "--log-file"]).unwrap();
        assert_eq!(cli.log_file, Some(None));
        assert_eq!(
            resolve_log_file(cli.log_file, cli.config_dir.as_deref()),
            Some(PathBuf::from("/tmp/reelbook-cfg/logs/reelbook.log"))
        );
    }

    #[test]
    fn test_log_file_value_and_absence() {
        let cli = Cli::try_parse_from(["reelbook", "--log-file=/var/log/rb.log", "browse"]).unwrap();
        assert_eq!(
            resolve_log_file(cli.log_file, None),
            Some(PathBuf::from("/var/log/rb.log"))
        );

        let cli = Cli::try_parse_from(["reelbook", "config", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { cmd: ConfigCommands::Show }));
        assert_eq!(resolve_log_file(cli.log_file, None), None);
    }
}
