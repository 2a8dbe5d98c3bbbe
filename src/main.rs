use std::io::Read;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use url_editor::config::EditorConfig;
use url_editor::editor::{Disposition, EditSession, Navigator};
use url_editor::url_parser::{compose_with, decompose_with, ParsedUrl};
use url_editor::utils::logger::init_logger;

#[derive(Parser)]
#[command(name = "url-editor")]
#[command(about = "Take a URL apart, edit the pieces, put it back together", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the components and decoded parameters of a URL as JSON
    Decompose {
        /// URL to decompose
        url: String,
    },

    /// Build a URL from a JSON document produced by `decompose`
    Compose {
        /// JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Edit a URL and print the result
    Edit {
        /// URL to start from
        url: String,
        #[arg(long)]
        scheme: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        port: Option<String>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        fragment: Option<String>,
        /// Set a parameter, NAME=VALUE (first match is replaced, otherwise appended)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
        /// Add a parameter even if one with that name exists, NAME[=VALUE]
        #[arg(long = "add", value_name = "NAME[=VALUE]")]
        add: Vec<String>,
        /// Remove every parameter with this name
        #[arg(long = "remove", value_name = "NAME")]
        remove: Vec<String>,
        /// Open as a new document rather than replacing the current one
        #[arg(long)]
        new_tab: bool,
    },
}

/// Prints the URL it is asked to open
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&mut self, url: &str, disposition: Disposition) -> Result<()> {
        info!(?disposition, "Navigating");
        println!("{}", url);
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EditorConfig::load(cli.config.as_deref())?;
    let log_dir = cli.log_dir.as_deref().or(config.log_dir.as_deref());
    init_logger(log_dir)?;

    match cli.command {
        Commands::Decompose { url } => {
            let parsed = decompose_with(&url, &config.parse_options())
                .with_context(|| format!("Failed to decompose '{}'", url))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Commands::Compose { input } => {
            let json = read_input(&input)?;
            let parsed: ParsedUrl =
                serde_json::from_str(&json).context("Input is not a decomposed URL document")?;
            println!(
                "{}",
                compose_with(&parsed.components, &parsed.parameters, &config.compose_options())
            );
        }
        Commands::Edit {
            url,
            scheme,
            domain,
            port,
            path,
            fragment,
            set,
            add,
            remove,
            new_tab,
        } => {
            let mut session = EditSession::new(config.parse_options());
            session.reset(&url)?;

            let fields = session.fields_mut();
            let edits = [
                (&mut fields.scheme, scheme),
                (&mut fields.domain, domain),
                (&mut fields.port, port),
                (&mut fields.path, path),
                (&mut fields.fragment, fragment),
            ];
            for (field, edit) in edits {
                if let Some(value) = edit {
                    *field = value;
                }
            }

            for name in &remove {
                session.remove_params_named(name);
            }
            for assignment in &set {
                let (name, value) = assignment
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Expected NAME=VALUE, got '{}'", assignment))?;
                session.set_param(name, value);
            }
            for assignment in &add {
                let (name, value) = assignment.split_once('=').unwrap_or((assignment, ""));
                session.add_param(name, value);
            }

            let disposition = if new_tab {
                Disposition::NewTab
            } else {
                Disposition::CurrentTab
            };
            session.launch(&mut StdoutNavigator, disposition)?;
        }
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read '{}'", input))
    }
}
