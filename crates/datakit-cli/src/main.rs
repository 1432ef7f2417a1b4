//! Datakit CLI — entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use datakit::{HttpClient, HttpFetch, LocalFs};
use datakit_cli::commands::{csv_cmd, demo, get_cmd, json_cmd, text_cmd};
use datakit_cli::{resolve_demo_dir, resolve_endpoint, Output};

#[derive(Parser)]
#[command(
    name = "datakit",
    about = "Datakit — read and write text, CSV, and JSON, and fetch over HTTP",
    version,
    after_help = "Run 'datakit <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the contents of a text file
    Read {
        path: PathBuf,
    },
    /// Write text to a file, creating it if needed
    Write {
        path: PathBuf,
        content: String,
        /// Append instead of overwriting
        #[arg(long)]
        append: bool,
    },
    /// Parse or generate CSV
    Csv {
        #[command(subcommand)]
        action: CsvAction,
    },
    /// Parse or generate JSON
    Json {
        #[command(subcommand)]
        action: JsonAction,
    },
    /// Issue a GET request
    Get {
        /// URL to fetch (defaults to $DATAKIT_ENDPOINT, then a sample todo)
        url: Option<String>,
        /// Print status and content type along with the body
        #[arg(long)]
        full: bool,
    },
    /// Run every section of the walkthrough in order
    Demo {
        /// Working directory for sample files (defaults to $DATAKIT_DIR, then ./demo_files)
        #[arg(long)]
        dir: Option<String>,
        /// URL for the HTTP section
        #[arg(long)]
        endpoint: Option<String>,
        /// Skip the HTTP section
        #[arg(long)]
        offline: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CsvAction {
    /// Parse a CSV file and print its rows
    Parse {
        path: PathBuf,
        /// Field separator: one ASCII character, or "tab"
        #[arg(long, short, default_value = ",", value_parser = csv_cmd::parse_delimiter)]
        delimiter: u8,
        /// Treat the first row as field names
        #[arg(long)]
        headers: bool,
    },
    /// Write the sample roster as CSV
    Generate {
        path: PathBuf,
        /// Field separator: one ASCII character, or "tab"
        #[arg(long, short, default_value = ",", value_parser = csv_cmd::parse_delimiter)]
        delimiter: u8,
        /// Append instead of overwriting
        #[arg(long)]
        append: bool,
        /// Join fields without quoting
        #[arg(long)]
        naive: bool,
    },
}

#[derive(Subcommand)]
enum JsonAction {
    /// Parse a JSON file and print it back
    Parse {
        path: PathBuf,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Serialize the sample person
    Generate {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let out = Output::new(cli.json);
    let result = dispatch(cli.command, out).await;

    // 0 = success, 1 = error
    if let Err(e) = &result {
        out.error(e);
        std::process::exit(1);
    }

    result
}

async fn dispatch(command: Commands, out: Output) -> anyhow::Result<()> {
    let fs = LocalFs;

    match command {
        Commands::Read { path } => {
            let file = text_cmd::read(&fs, &path)?;
            out.emit(&file, || file.content.clone())
        }

        Commands::Write {
            path,
            content,
            append,
        } => {
            let summary = text_cmd::write(&fs, &path, &content, append)?;
            out.emit(&summary, || {
                format!("Wrote {} bytes to {}", summary.bytes, summary.path)
            })
        }

        Commands::Csv { action } => match action {
            CsvAction::Parse {
                path,
                delimiter,
                headers,
            } => {
                let set = csv_cmd::parse(&fs, &path, delimiter, headers)?;
                out.emit(&set, || csv_cmd::render(&set))
            }
            CsvAction::Generate {
                path,
                delimiter,
                append,
                naive,
            } => {
                let generated = csv_cmd::generate(&fs, &path, delimiter, append, naive)?;
                out.emit(&generated, || generated.csv.clone())
            }
        },

        Commands::Json { action } => match action {
            JsonAction::Parse { path, pretty } => {
                let (value, text) = json_cmd::parse(&fs, &path, pretty)?;
                out.emit(&value, || text)
            }
            JsonAction::Generate { pretty } => {
                let (person, text) = json_cmd::generate(pretty)?;
                out.emit(&person, || text)
            }
        },

        Commands::Get { url, full } => {
            let url = resolve_endpoint(url.as_deref());
            let client = HttpClient::new().context("building HTTP client")?;
            let fetched = get_cmd::run(&client, &url, full).await?;
            out.emit(&fetched, || fetched.render())
        }

        Commands::Demo {
            dir,
            endpoint,
            offline,
        } => {
            let dir = resolve_demo_dir(dir.as_deref());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            let endpoint = resolve_endpoint(endpoint.as_deref());

            let client = if offline {
                None
            } else {
                Some(HttpClient::new().context("building HTTP client")?)
            };
            let client_ref = client.as_ref().map(|c| c as &dyn HttpFetch);

            tracing::info!(dir = %dir.display(), offline, "running demo");
            let report = demo::run(&fs, client_ref, &dir, &endpoint).await?;
            out.emit(&report, || report.render())
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "datakit", &mut std::io::stdout());
            Ok(())
        }
    }
}
