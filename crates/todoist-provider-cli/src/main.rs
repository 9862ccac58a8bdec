//! Todoist provider CLI - manage Todoist projects as declarative resources

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use todoist_provider_core::client::{Project, TodoistClient, known_color_names};
use todoist_provider_core::config::{Config, LoggingConfig, TOKEN_ENV_VAR};
use todoist_provider_core::resource::{self, ProjectPlan};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todoist-provider")]
#[command(author, version, about = "Manage Todoist projects as declarative resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Todoist API token (takes precedence over TODOIST_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API base URL (overrides api.base_url from the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Show project details
    Show { id: String },
    /// Create a new project
    Create {
        /// Project name
        name: String,
        /// Parent project ID
        #[arg(long)]
        parent_id: Option<String>,
        /// Color name (e.g. berry_red, mint_green)
        #[arg(long)]
        color: Option<String>,
        /// Mark as favorite
        #[arg(long)]
        favorite: Option<bool>,
        /// View style (list, board, calendar)
        #[arg(long)]
        view_style: Option<String>,
    },
    /// Update a project (only given fields change)
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
        #[arg(long)]
        view_style: Option<String>,
    },
    /// Delete a project
    Delete { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // A broken config file must not block `config reset` or `doctor`
    let logging = Config::load()
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging)?;

    let result = match &cli.command {
        Commands::Projects { action } => cmd_projects(&cli, action).await,
        Commands::Config { action } => cmd_config(action, cli.quiet),
        Commands::Doctor => cmd_doctor(&cli),
    };

    if let Err(e) = &result {
        if let Some(suggestion) = e
            .downcast_ref::<todoist_provider_core::Error>()
            .and_then(|core| core.suggestion())
        {
            eprintln!("Hint: {}", suggestion);
        }
    }
    result
}

/// Install the global subscriber; events go to stderr or the configured file
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("todoist_provider={}", logging.level).parse()?);

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn build_client(cli: &Cli, config: &Config) -> anyhow::Result<TodoistClient> {
    let mut api = config.api.clone();
    if let Some(base_url) = &cli.base_url {
        api.base_url = base_url.clone();
    }
    debug!(base_url = %api.base_url, "Building Todoist client");
    Ok(api.build_client(cli.token.as_deref())?)
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_projects(cli: &Cli, action: &ProjectAction) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = build_client(cli, &config)?;

    match action {
        ProjectAction::Show { id } => {
            let project = resource::read(&client, id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Project '{}' not found", id))?;
            print_project(&project, cli.format);
        }
        ProjectAction::Create {
            name,
            parent_id,
            color,
            favorite,
            view_style,
        } => {
            if let Some(color) = color {
                warn_unknown_color(color);
            }
            let plan = ProjectPlan {
                name: name.clone(),
                parent_id: parent_id.clone(),
                color: color.clone(),
                is_favorite: *favorite,
                view_style: view_style.clone(),
            };
            let project = resource::create(&client, &plan).await?;
            if !cli.quiet {
                print_project(&project, cli.format);
            }
        }
        ProjectAction::Update {
            id,
            name,
            color,
            favorite,
            view_style,
        } => {
            if let Some(color) = color {
                warn_unknown_color(color);
            }
            let prior = resource::read(&client, id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Project '{}' not found", id))?;
            let plan = ProjectPlan {
                name: name.clone().unwrap_or_else(|| prior.name.clone()),
                parent_id: None,
                color: color.clone(),
                is_favorite: *favorite,
                view_style: view_style.clone(),
            };
            let project = resource::update(&client, &prior, &plan).await?;
            if !cli.quiet {
                print_project(&project, cli.format);
            }
        }
        ProjectAction::Delete { id } => {
            resource::delete(&client, id).await?;
            if !cli.quiet {
                match cli.format {
                    OutputFormat::Text => println!("Project '{}' deleted.", id),
                    OutputFormat::Json => {
                        println!("{}", serde_json::json!({ "id": id, "deleted": true }))
                    }
                }
            }
        }
    }
    Ok(())
}

fn warn_unknown_color(color: &str) {
    if !known_color_names().any(|known| known == color) {
        warn!(color = %color, "Color is not a known Todoist color name");
    }
}

fn print_project(project: &Project, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(project) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize project: {}", e),
        },
        OutputFormat::Text => {
            println!("ID:          {}", project.id);
            println!("Name:        {}", project.name);
            println!("Color:       {}", project.color);
            println!("Order:       {}", project.order);
            println!("Favorite:    {}", project.is_favorite);
            println!("Shared:      {}", project.is_shared);
            println!("Inbox:       {}", project.is_inbox_project);
            println!("Team inbox:  {}", project.is_team_inbox);
            println!("View style:  {}", project.view_style);
            if !project.parent_id.is_empty() {
                println!("Parent:      {}", project.parent_id);
            }
            println!("URL:         {}", project.url);
        }
    }
}

fn cmd_config(action: &ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn cmd_doctor(cli: &Cli) -> anyhow::Result<()> {
    if !cli.quiet {
        println!("Todoist Provider Health Check");
        println!("=============================");
        println!();
    }

    let mut all_ok = true;

    let config = match Config::load() {
        Ok(config) => {
            if !cli.quiet {
                println!("[OK] Configuration: Valid");
            }
            config
        }
        Err(e) => {
            all_ok = false;
            if !cli.quiet {
                println!("[!!] Configuration: Error - {:#}", e);
                println!("     Fix the file or run `todoist-provider config reset`");
            }
            Config::default()
        }
    };

    match config.api.redacted_token(cli.token.as_deref()) {
        Some(redacted) => {
            if !cli.quiet {
                println!("[OK] API Token: Configured ({})", redacted);
            }
        }
        None => {
            all_ok = false;
            if !cli.quiet {
                println!("[!!] API Token: Not configured");
                println!("     Pass --token or set the {} environment variable", TOKEN_ENV_VAR);
            }
        }
    }

    if !cli.quiet {
        let base_url = cli.base_url.as_deref().unwrap_or(&config.api.base_url);
        println!("[OK] API: {} (timeout {}s)", base_url, config.api.timeout_secs);

        match Config::config_path() {
            Ok(path) => {
                if path.exists() {
                    println!("[OK] Config file: {}", path.display());
                } else {
                    println!("[--] Config file: {} (using defaults)", path.display());
                }
            }
            Err(e) => {
                println!("[!!] Config file: Error - {}", e);
            }
        }
    }

    if !cli.quiet {
        println!();
        if all_ok {
            println!("All checks passed!");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_options() {
        let cli = Cli::try_parse_from([
            "todoist-provider",
            "projects",
            "create",
            "Infra",
            "--color",
            "teal",
            "--favorite",
            "true",
            "--token",
            "abc",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("abc"));
        match cli.command {
            Commands::Projects {
                action:
                    ProjectAction::Create {
                        name,
                        color,
                        favorite,
                        parent_id,
                        ..
                    },
            } => {
                assert_eq!(name, "Infra");
                assert_eq!(color.as_deref(), Some("teal"));
                assert_eq!(favorite, Some(true));
                assert!(parent_id.is_none());
            }
            _ => panic!("expected projects create"),
        }
    }

    #[test]
    fn test_parse_update_requires_id() {
        assert!(Cli::try_parse_from(["todoist-provider", "projects", "update"]).is_err());
    }

    #[test]
    fn test_parse_json_format() {
        let cli =
            Cli::try_parse_from(["todoist-provider", "--format", "json", "projects", "show", "1"])
                .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
