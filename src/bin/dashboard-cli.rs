use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dashboard_sdk::{DashboardClient, ExtensionistFilter, StateChange, SurveyKind, SurveyState};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dashboard-cli")]
#[command(about = "Talk to the extension dashboard API through the gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, default_value = dashboard_sdk::DEFAULT_PREFIX)]
    prefix: String,

    /// Access token from a previous `login`.
    #[arg(short, long, env = "DASHBOARD_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the issued token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List extensionists
    Extensionists {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one extensionist's summary
    Summary { id: u64 },
    /// Download an extensionist's spreadsheet export
    Export {
        id: u64,
        /// Output file (defaults to the server-provided name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Accept, reject or reset a survey
    SetState {
        /// 1/initial, 2/follow-up, 3/final
        kind: SurveyKind,
        survey_id: u64,
        state: SurveyState,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long, default_value = "admin")]
        perfil: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut client = DashboardClient::with_prefix(&cli.url, &cli.prefix);
    if let Some(token) = cli.token {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Login { email, password } => {
            let envelope = client.login(&email, &password).await?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Extensionists { name, page, limit } => {
            let filter = ExtensionistFilter { name, page, limit };
            print_json(&client.list_extensionists(&filter).await?)?;
        }
        Commands::Summary { id } => {
            print_json(&client.extensionist_summary(id).await?)?;
        }
        Commands::Export { id, output } => {
            let download = client.export_extensionist_excel(id).await?;
            let path = export_path(output, download.file_name.as_deref(), id);
            tokio::fs::write(&path, &download.bytes).await?;
            println!(
                "Wrote {} bytes ({}) to {}",
                download.bytes.len(),
                download.content_type,
                path.display()
            );
        }
        Commands::SetState {
            kind,
            survey_id,
            state,
            reason,
            perfil,
        } => {
            let change = StateChange {
                state,
                state_reason: reason,
            };
            print_json(&client.set_survey_state(kind, survey_id, &perfil, &change).await?)?;
        }
    }

    Ok(())
}

/// `--output`, else the server-chosen name, else `extensionist_<id>.xlsx`.
fn export_path(output: Option<PathBuf>, server_name: Option<&str>, id: u64) -> PathBuf {
    output
        .or_else(|| {
            // keep only the last component of a server-chosen name
            server_name
                .and_then(|name| Path::new(name).file_name())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(format!("extensionist_{}.xlsx", id)))
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
