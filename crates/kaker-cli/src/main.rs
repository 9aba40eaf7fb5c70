use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use futures_util::StreamExt;
use kaker_ox::{
    ClientConfig, DEFAULT_ENDPOINT_BASE, DEFAULT_MAX_OUTPUT_TOKENS, Generation, Kaker, Model,
};
use tracing_subscriber::EnvFilter;

/// Fallback variable for the API key, checked after `GEMINI_API_KEY`
const FALLBACK_API_KEY_VAR: &str = "GOOGLE_AI_API_KEY";

/// Ask El kaker something
#[derive(Debug, Parser)]
#[command(name = "kaker", version, about)]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier
    #[arg(short, long, default_value_t = Model::default().to_string())]
    model: String,

    /// Print the answer while it is being generated
    #[arg(short, long)]
    stream: bool,

    /// Upper bound on the answer length, in tokens
    #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    max_output_tokens: u32,

    /// Base URL of the models endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT_BASE)]
    endpoint: String,

    /// Prompt, including any conversation the bot should see
    #[arg(required = true)]
    prompt: Vec<String>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var(FALLBACK_API_KEY_VAR).ok())
            .unwrap_or_default();

        ClientConfig::builder()
            .api_key(api_key)
            .model(self.model.clone())
            .max_output_tokens(self.max_output_tokens)
            .endpoint_base(self.endpoint.clone())
            .build()
    }

    fn prompt(&self) -> String {
        self.prompt.join(" ")
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let kaker = Kaker::from_config(cli.client_config())?;
    tracing::debug!(config = ?kaker.config(), "client ready");

    match kaker.generate_with(cli.prompt(), cli.stream).await? {
        Generation::Complete(answer) => println!("{answer}"),
        Generation::Stream(mut fragments) => {
            let mut stdout = io::stdout();
            while let Some(fragment) = fragments.next().await {
                stdout.write_all(fragment?.as_bytes())?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
