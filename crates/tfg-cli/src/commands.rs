//! Subcommand implementations.
//!
//! Every decision is made by `tfg_authz` on records loaded from the
//! directory; this module only resolves ids and prints answers.

use std::path::Path;

use anyhow::{Context as _, bail};
use chrono::{DateTime, Utc};
use tfg_authz::{
  Action, Family, Policy, Resource, committee, thesis, user,
};
use tfg_core::{
  committee::Committee,
  notification::Notification,
  record::{DefenseRecord, ThesisRecord, UserRecord},
  role::RoleSet,
  store::{Directory, SlotQuery},
  thesis::ThesisState,
  user::User,
};
use uuid::Uuid;

use crate::fixture::{self, Fixture};

// ─── Loading ─────────────────────────────────────────────────────────────────

/// An owned resource of any family, borrowed as a [`Resource`] for decisions.
enum Loaded {
  Thesis(ThesisRecord),
  Defense(DefenseRecord),
  Committee(Committee),
  Notification(Notification),
  User(UserRecord),
}

impl Loaded {
  fn as_resource(&self) -> Resource<'_> {
    match self {
      Self::Thesis(r) => Resource::Thesis(r),
      Self::Defense(r) => Resource::Defense(r),
      Self::Committee(c) => Resource::Committee(c),
      Self::Notification(n) => Resource::Notification(n),
      Self::User(r) => Resource::User(r),
    }
  }
}

async fn load_actor<D: Directory>(directory: &D, id: Uuid) -> anyhow::Result<User> {
  directory
    .get_user(id)
    .await
    .context("loading actor")?
    .with_context(|| format!("actor {id} not found"))
}

async fn load_user<D: Directory>(directory: &D, id: Uuid) -> anyhow::Result<UserRecord> {
  directory
    .load_user(id)
    .await
    .context("loading user")?
    .with_context(|| format!("user {id} not found"))
}

async fn load_resource<D: Directory>(
  directory: &D,
  family: Family,
  id: Uuid,
) -> anyhow::Result<Loaded> {
  let loaded = match family {
    Family::Thesis => directory.load_thesis(id).await?.map(Loaded::Thesis),
    Family::Defense => directory.load_defense(id).await?.map(Loaded::Defense),
    Family::Committee => directory.get_committee(id).await?.map(Loaded::Committee),
    Family::Notification => {
      directory.get_notification(id).await?.map(Loaded::Notification)
    }
    Family::User => directory.load_user(id).await?.map(Loaded::User),
  };
  loaded.with_context(|| format!("{family} {id} not found"))
}

fn verdict(granted: bool) -> bool {
  println!("{}", if granted { "allow" } else { "deny" });
  granted
}

// ─── Commands ────────────────────────────────────────────────────────────────

pub async fn seed<D: Directory>(directory: &D, path: &Path) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading fixture {}", path.display()))?;
  let ids = fixture::seed(directory, Fixture::parse(&raw)?).await?;
  for (key, id) in ids.iter() {
    println!("{key}\t{id}");
  }
  Ok(())
}

pub async fn check<D: Directory>(
  directory: &D,
  actor: Uuid,
  action: Action,
  resource: Option<Uuid>,
) -> anyhow::Result<bool> {
  let actor = load_actor(directory, actor).await?;
  let loaded = match resource {
    Some(id) => Some(load_resource(directory, action.family(), id).await?),
    None => None,
  };
  let granted =
    Policy::new().authorize(Some(&actor), action, loaded.as_ref().map(Loaded::as_resource));
  Ok(verdict(granted))
}

pub async fn actions<D: Directory>(
  directory: &D,
  actor: Uuid,
  target: Option<(Family, Uuid)>,
  json: bool,
) -> anyhow::Result<()> {
  let actor = load_actor(directory, actor).await?;
  let loaded = match target {
    Some((family, id)) => Some(load_resource(directory, family, id).await?),
    None => None,
  };
  let actions =
    Policy::new().available_actions(Some(&actor), loaded.as_ref().map(Loaded::as_resource));

  if json {
    println!("{}", serde_json::to_string(&actions)?);
  } else {
    for action in &actions {
      println!("{action}");
    }
  }
  Ok(())
}

pub async fn fields<D: Directory>(
  directory: &D,
  actor: Uuid,
  target: Uuid,
  json: bool,
) -> anyhow::Result<()> {
  let actor = load_actor(directory, actor).await?;
  let target = load_user(directory, target).await?;
  let level = user::access_level(&target, &actor);
  let fields = user::editable_fields(&target.user, &actor);

  if json {
    let out = serde_json::json!({ "access_level": level, "fields": fields });
    println!("{out}");
  } else {
    println!("access {level}");
    for field in &fields {
      println!("{field}");
    }
  }
  Ok(())
}

pub async fn transition<D: Directory>(
  directory: &D,
  actor: Uuid,
  thesis_id: Uuid,
  to: ThesisState,
) -> anyhow::Result<bool> {
  let actor = load_actor(directory, actor).await?;
  let record = directory
    .load_thesis(thesis_id)
    .await?
    .with_context(|| format!("thesis {thesis_id} not found"))?;
  Ok(verdict(thesis::can_transition(&actor, &record, to)))
}

pub async fn roles<D: Directory>(
  directory: &D,
  actor: Uuid,
  target: Uuid,
  to: RoleSet,
) -> anyhow::Result<bool> {
  if to.is_empty() {
    bail!("--set needs at least one role");
  }
  let actor = load_actor(directory, actor).await?;
  let target = load_user(directory, target).await?;
  let active_admins = directory.count_active_admins().await?;

  Ok(verdict(user::can_change_role(
    &target.user.roles,
    &to,
    &actor,
    target.user.is_active,
    active_admins,
  )))
}

pub async fn availability<D: Directory>(
  directory: &D,
  committee_id: Uuid,
  at: DateTime<Utc>,
  window_minutes: u32,
) -> anyhow::Result<bool> {
  let committee = directory
    .get_committee(committee_id)
    .await?
    .with_context(|| format!("committee {committee_id} not found"))?;

  let slot = SlotQuery { at, window_minutes, exclude: None };
  let conflict = directory.find_committee_conflict(committee_id, &slot).await?;
  let available = committee::is_available(&committee, conflict.as_ref());

  match (&conflict, committee.is_active) {
    (_, false) => println!("unavailable: committee is inactive"),
    (Some(d), true) => println!(
      "unavailable: defense {} at {} in {}",
      d.defense_id,
      d.scheduled_at.to_rfc3339(),
      d.classroom
    ),
    (None, true) => println!("available"),
  }
  Ok(available)
}
