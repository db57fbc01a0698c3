//! CLI entry: one command in, dispatched actions out.

use clap::Parser;

use commandeer::config::AppConfig;
use commandeer::dispatch::{Collaborators, GoogleCollaborators};
use commandeer::generate::GeminiBackend;
use commandeer::pipeline;
use commandeer::types::ActingIdentity;

#[derive(Parser)]
#[command(
    name = "commandeer",
    version,
    about = "Turn a plain-English command into a dispatched calendar event, task, or email"
)]
struct Cli {
    /// The command to interpret, e.g. "schedule a meeting tomorrow at 5"
    #[arg(required = true)]
    text: Vec<String>,

    /// Verified email address of the acting user (sender identity)
    #[arg(long)]
    email: String,

    /// Display name of the acting user; derived from the email when absent
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let text = cli.text.join(" ");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let backend = GeminiBackend::new(config.gemini_api_key, config.model_candidates);
    let google = GoogleCollaborators {
        access_token: config.google_access_token,
    };
    let collaborators = Collaborators {
        calendar: &google,
        tasks: &google,
        mail: &google,
    };
    let identity = ActingIdentity {
        name: cli.name,
        email: cli.email,
    };

    let response = pipeline::handle_command(&text, &identity, &backend, &collaborators).await;
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize response: {e}");
            std::process::exit(1);
        }
    }
}
