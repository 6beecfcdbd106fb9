// FAQ Bot Entry Point
// Reads user messages from stdin and prints one JSON reply per line.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use faqbot_core::brain::{ChatReply, EchoClassifier, FaqResponder, KnowledgeStore};
use faqbot_core::config::{load_knowledge_file, EngineConfig, LogFormat};

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new("faq-bot".into(), std::io::stderr));
            tracing::subscriber::set_global_default(subscriber)
                .context("failed to install JSON subscriber")?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn print_reply(reply: &ChatReply) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(reply)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = EngineConfig::from_env()?;
    init_tracing(config.log_format)?;

    let knowledge = load_knowledge_file(&config.knowledge_path).with_context(|| {
        format!(
            "failed to load FAQ document from {}",
            config.knowledge_path.display()
        )
    })?;
    let store = Arc::new(KnowledgeStore::new(knowledge, config.fallback_key.clone())?);

    // No model is wired in here; the user's text is resolved directly.
    let responder = FaqResponder::new(store, EchoClassifier, &config);

    info!("FAQ bot ready, reading messages from stdin");
    print_reply(&responder.welcome()?)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let user_text = line.trim();
        if user_text.is_empty() {
            continue;
        }

        let reply = match responder.answer(user_text).await {
            Ok(reply) => reply,
            Err(e) if e.is_configuration() => {
                error!("Knowledge base misconfigured: {}", e);
                return Err(e.into());
            }
            Err(e) => {
                error!("Failed to answer: {}", e);
                ChatReply::apology()
            }
        };
        print_reply(&reply)?;
    }

    Ok(())
}
