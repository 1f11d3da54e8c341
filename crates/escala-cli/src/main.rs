//! `escala`: command-line client for the Escala roster server.
//!
//! # Usage
//!
//! ```
//! escala person add --code A1 --name Ana --rank Cabo
//! escala shift assign --person 1 --date 2024-05-01 --start 08:00 --end 12:00
//! escala shift list --date 2024-05-01
//! escala --url http://roster.local:3001 shift list --page 2
//! ```

mod client;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:3001";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "escala", about = "Command-line client for the Escala duty roster")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the escala server (default: http://localhost:3001).
  #[arg(long, env = "ESCALA_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Check server and storage liveness.
  Health,
  /// Manage registered persons.
  #[command(subcommand)]
  Person(PersonCommand),
  /// Assign and list duty shifts.
  #[command(subcommand)]
  Shift(ShiftCommand),
}

#[derive(Subcommand, Debug)]
enum PersonCommand {
  /// Register a new person.
  Add {
    /// Registration code (matrícula); must be unique.
    #[arg(long)]
    code: String,
    #[arg(long)]
    name: String,
    /// Rank or role label.
    #[arg(long)]
    rank: String,
  },
  /// List all persons by id.
  List,
  /// Show one person.
  Get { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ShiftCommand {
  /// Assign a person to a shift on one day.
  Assign {
    /// Person id.
    #[arg(long)]
    person: i64,
    /// Day in YYYY-MM-DD form.
    #[arg(long)]
    date: String,
    /// Start time, HH:MM.
    #[arg(long)]
    start: String,
    /// End time, HH:MM; must be after start.
    #[arg(long)]
    end: String,
  },
  /// List shifts for one day, or page through all of them.
  List {
    #[arg(long, conflicts_with_all = ["page", "limit"])]
    date: Option<String>,
    #[arg(long, default_value_t = escala_core::query::DEFAULT_PAGE)]
    page: u64,
    #[arg(long, default_value_t = escala_core::query::DEFAULT_LIMIT)]
    limit: u32,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };

  let client = ApiClient::new(api_config)?;
  let out = run(&client, args.command).await?;
  print!("{out}");
  Ok(())
}

async fn run(client: &ApiClient, command: Command) -> Result<String> {
  Ok(match command {
    Command::Health => {
      let (live, db) = client.health().await?;
      format!("server: {live}\nstorage: {db}\n")
    }
    Command::Person(PersonCommand::Add { code, name, rank }) => {
      let p = client.register_person(&code, &name, &rank).await?;
      format!("registered {}\n", render::person(&p))
    }
    Command::Person(PersonCommand::List) => {
      render::persons(&client.list_persons().await?)
    }
    Command::Person(PersonCommand::Get { id }) => {
      format!("{}\n", render::person(&client.get_person(id).await?))
    }
    Command::Shift(ShiftCommand::Assign { person, date, start, end }) => {
      let s = client.assign_shift(person, &date, &start, &end).await?;
      format!("{}\n", render::shift(&s))
    }
    Command::Shift(ShiftCommand::List { date: Some(date), .. }) => {
      render::listing(&date, &client.shifts_on(&date).await?)
    }
    Command::Shift(ShiftCommand::List { date: None, page, limit }) => {
      render::page(&client.shifts_page(page, limit).await?)
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  use clap::CommandFactory as _;

  #[test]
  fn cli_definition_is_consistent() { Args::command().debug_assert(); }

  #[test]
  fn shift_list_defaults_to_first_page() {
    let args = Args::try_parse_from(["escala", "shift", "list"]).unwrap();
    match args.command {
      Command::Shift(ShiftCommand::List { date, page, limit }) => {
        assert_eq!(date, None);
        assert_eq!((page, limit), (1, 10));
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn date_and_paging_are_exclusive() {
    let res = Args::try_parse_from([
      "escala", "shift", "list", "--date", "2024-05-01", "--page", "2",
    ]);
    assert!(res.is_err());
  }
}
