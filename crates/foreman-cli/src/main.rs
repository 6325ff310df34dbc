use anyhow::Result;
use clap::{Parser, Subcommand};
use foreman_application::{LifecycleController, StartOutcome, TurnController, TurnOutcome};
use foreman_backend::{BackendConfig, HttpWorkflowBackend};
use foreman_core::backend::WorkflowBackend;
use foreman_core::session::SessionStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "foreman")]
#[command(about = "Foreman - project workflow controller for the writing studio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query backend status and print the mirrored session
    Status,
    /// Start a new project
    Start {
        /// Working title of the project
        #[arg(long)]
        title: String,
        /// Name of the protagonist
        #[arg(long)]
        protagonist: String,
    },
    /// Send one chat message
    Send {
        /// The message text
        message: String,
    },
    /// Abandon the active project
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = BackendConfig::load()?;
    let backend: Arc<dyn WorkflowBackend> = Arc::new(HttpWorkflowBackend::new(&config));
    let store = Arc::new(SessionStore::new());
    let lifecycle = Arc::new(LifecycleController::new(store.clone(), backend.clone()));
    let turn = TurnController::new(store.clone(), backend, lifecycle.clone());

    match cli.command {
        Commands::Status => {
            if let Err(e) = lifecycle.refresh_status().await {
                if e.is_offline() {
                    eprintln!("Backend offline: {}", e);
                } else {
                    eprintln!("Status refresh failed: {}", e);
                }
                std::process::exit(1);
            }
        }
        Commands::Start { title, protagonist } => {
            match lifecycle.start_project(&title, &protagonist).await {
                Ok(StartOutcome::Started) => {}
                Ok(StartOutcome::RejectedBlank) => {
                    eprintln!("Title and protagonist must be non-blank");
                    std::process::exit(2);
                }
                Err(e) => {
                    eprintln!("Start failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Send { message } => {
            // Pull current state first so the turn runs against an
            // established session mirror.
            let _ = lifecycle.refresh_status().await;
            match turn.send_message(&message).await {
                TurnOutcome::Completed | TurnOutcome::Failed(_) => {}
                TurnOutcome::RejectedEmpty => {
                    eprintln!("Message must be non-blank");
                    std::process::exit(2);
                }
                TurnOutcome::RejectedBusy | TurnOutcome::Discarded => {
                    eprintln!("Turn did not complete; retry");
                    std::process::exit(1);
                }
            }
        }
        Commands::Reset => {
            lifecycle.reset_project().await;
        }
    }

    println!("{}", serde_json::to_string_pretty(&store.snapshot())?);

    Ok(())
}
