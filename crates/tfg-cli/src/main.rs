//! `tfgctl`, the operator tool for the TFG authorization core.
//!
//! Reads `tfgctl.toml` (or the path given with `--config`) and `TFG_*`
//! environment variables, opens the SQLite directory, and answers
//! authorization questions against it.
//!
//! # Usage
//!
//! ```text
//! tfgctl seed fixtures/department.toml
//! tfgctl check --actor <id> --action thesis.upload_file --resource <id>
//! tfgctl actions --actor <id> --family defense --resource <id>
//! tfgctl fields --actor <id> --target <id>
//! tfgctl availability --committee <id> --at 2025-06-10T09:00:00Z
//! ```
//!
//! `check`, `transition`, `roles` and `availability` exit with status 1 when
//! the answer is no.

mod commands;
mod fixture;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tfg_authz::{Action, Family};
use tfg_core::{
  role::{Role, RoleSet},
  thesis::ThesisState,
};
use tfg_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::settings::Settings;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tfgctl", author, version, about = "TFG authorization tool")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tfgctl.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Load users, committees, theses, defenses and notifications from a TOML
  /// fixture and print the ids they were given.
  Seed {
    fixture: PathBuf,
  },

  /// Decide one action. Prints `allow` or `deny`.
  Check {
    #[arg(long)]
    actor:    Uuid,
    /// `<family>.<action>`, e.g. `thesis.upload_file`.
    #[arg(long)]
    action:   Action,
    #[arg(long)]
    resource: Option<Uuid>,
  },

  /// List the actions the actor may take on a resource, or the
  /// collection-level actions when no resource is given.
  Actions {
    #[arg(long)]
    actor:    Uuid,
    #[arg(long, requires = "resource")]
    family:   Option<Family>,
    #[arg(long, requires = "family")]
    resource: Option<Uuid>,
    /// Print a JSON array instead of one action per line.
    #[arg(long)]
    json:     bool,
  },

  /// Show the actor's access level on a user and the fields it may edit.
  Fields {
    #[arg(long)]
    actor:  Uuid,
    #[arg(long)]
    target: Uuid,
    #[arg(long)]
    json:   bool,
  },

  /// Decide whether the actor may move a thesis to another review state.
  Transition {
    #[arg(long)]
    actor:  Uuid,
    #[arg(long)]
    thesis: Uuid,
    #[arg(long, value_parser = ThesisState::parse)]
    to:     ThesisState,
  },

  /// Decide whether the actor may rewrite a user's roles to the given set.
  /// The last active administrator keeps the admin role.
  Roles {
    #[arg(long)]
    actor:  Uuid,
    #[arg(long)]
    target: Uuid,
    /// Comma-separated role tags, e.g. `professor,committee-president`.
    #[arg(long, value_delimiter = ',', value_parser = Role::parse)]
    set:    Vec<Role>,
  },

  /// Check whether a committee can take a defense at the given time.
  Availability {
    #[arg(long)]
    committee: Uuid,
    #[arg(long)]
    at:        DateTime<Utc>,
  },
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;

  let granted = match cli.command {
    Command::Seed { fixture } => {
      commands::seed(&store, &fixture).await?;
      true
    }
    Command::Check { actor, action, resource } => {
      commands::check(&store, actor, action, resource).await?
    }
    Command::Actions { actor, family, resource, json } => {
      let target = family.zip(resource);
      commands::actions(&store, actor, target, json).await?;
      true
    }
    Command::Fields { actor, target, json } => {
      commands::fields(&store, actor, target, json).await?;
      true
    }
    Command::Transition { actor, thesis, to } => {
      commands::transition(&store, actor, thesis, to).await?
    }
    Command::Roles { actor, target, set } => {
      commands::roles(&store, actor, target, set.into_iter().collect::<RoleSet>()).await?
    }
    Command::Availability { committee, at } => {
      commands::availability(&store, committee, at, settings.conflict_window_minutes).await?
    }
  };

  Ok(if granted { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
