use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dn_pipeline::{create_pipeline, PipelineConfig};
use dn_web::AppState;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "DevNewsCopilot: developer news with generated code samples",
    long_about = None
)]
pub struct Cli {
    #[arg(long, env = "SERPER_API", default_value = "", hide_env_values = true)]
    serper_api_key: String,
    #[arg(long, env = "GROQ_API", default_value = "", hide_env_values = true)]
    groq_api_key: String,
    #[arg(long, env = "BLACKBOX_API", default_value = "", hide_env_values = true)]
    blackbox_api_key: String,
    /// File holding the system prompt for code generation
    #[arg(long, default_value = "system_prompt.md")]
    system_prompt: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the HTTP backend
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Generate news for one topic and print the JSON result
    Generate {
        topic: String,
    },
}

impl Cli {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let system_prompt = dn_inference::load_system_prompt(&self.system_prompt)
            .with_context(|| format!("reading system prompt {}", self.system_prompt.display()))?;

        Ok(PipelineConfig {
            serper_api_key: self.serper_api_key.clone(),
            serper_endpoint: None,
            inference: dn_inference::Config::new(&self.groq_api_key, &self.blackbox_api_key)
                .with_system_prompt(system_prompt),
        })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = cli.pipeline_config()?;
    let client = Client::builder().build().context("building HTTP client")?;
    let pipeline = Arc::new(create_pipeline(&config, client));

    match cli.command {
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("invalid bind address {}:{}", host, port))?;
            let app = dn_web::create_app(AppState { pipeline }).await;

            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("🚀 DevNewsCopilot backend starting up on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("🔄 DevNewsCopilot backend shutting down...");
        }
        Commands::Generate { topic } => {
            let result = pipeline.run(&topic).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
