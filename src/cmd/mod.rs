use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::{
    conf::settings,
    pkg::{
        internal::{ai::client::Client, pipeline::Pipeline, records::store::RecordStore},
        server::listen,
    },
    prelude::{Error, Result},
};

#[derive(Parser)]
#[command(about = "resume ingestion and search services")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Ingest { path: PathBuf },
    Search { keyword: String },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Ingest { path }) => {
            ingest(&path).await?;
        }
        Some(SubCommandType::Search { keyword }) => {
            search(&keyword).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}

async fn ingest(path: &Path) -> Result<()> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidRequest(format!("no filename in {}", path.display())))?
        .to_string();
    let data = tokio::fs::read(path).await?;
    let record = build_pipeline()?.ingest(&data, &filename).await?;
    println!("Parsed and saved: {}", record.display_name());
    Ok(())
}

async fn search(keyword: &str) -> Result<()> {
    let results = build_pipeline()?.search(keyword).await?;
    let rendered = serde_json::to_string_pretty(&results)
        .map_err(|e| Error::Persistence(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

fn build_pipeline() -> Result<Pipeline> {
    Ok(Pipeline::new(
        Arc::new(Client::from_settings()?),
        Arc::new(RecordStore::new(settings.store_path.as_str())),
    ))
}
