//! TOML fixtures for seeding a directory.
//!
//! Entities refer to each other by a fixture-local `key`; the store assigns
//! the real ids. Seeding returns the key → id mapping.
//!
//! ```toml
//! [[users]]
//! key   = "ana"
//! email = "ana@uni.example"
//! roles = ["professor", "committee-president"]
//!
//! [[theses]]
//! key     = "caches"
//! title   = "Distributed caches"
//! student = "dee"
//! tutor   = "eve"
//! state   = "approved"
//! ```

use std::collections::BTreeMap;

use anyhow::{Context as _, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tfg_core::{
  committee::NewCommittee,
  defense::{DEFAULT_DURATION_MINUTES, DefenseState, NewDefense},
  notification::{NewNotification, NotificationKind},
  role::RoleSet,
  store::Directory,
  thesis::{NewThesis, ThesisState},
  user::NewUser,
};
use uuid::Uuid;

// ─── Fixture shape ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
  pub users:         Vec<UserEntry>,
  pub committees:    Vec<CommitteeEntry>,
  pub theses:        Vec<ThesisEntry>,
  pub defenses:      Vec<DefenseEntry>,
  pub notifications: Vec<NotificationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UserEntry {
  pub key:          String,
  pub email:        String,
  pub display_name: Option<String>,
  #[serde(default)]
  pub roles:        RoleSet,
  #[serde(default = "yes")]
  pub active:       bool,
}

#[derive(Debug, Deserialize)]
pub struct CommitteeEntry {
  pub key:       String,
  pub name:      String,
  pub president: String,
  pub secretary: String,
  pub member:    String,
}

#[derive(Debug, Deserialize)]
pub struct ThesisEntry {
  pub key:      String,
  pub title:    String,
  pub student:  String,
  pub tutor:    Option<String>,
  pub co_tutor: Option<String>,
  /// Reached by walking the review workflow from draft.
  #[serde(default)]
  pub state:    ThesisState,
}

#[derive(Debug, Deserialize)]
pub struct DefenseEntry {
  pub key:              String,
  pub thesis:           String,
  pub committee:        String,
  pub scheduled_at:     DateTime<Utc>,
  pub classroom:        String,
  #[serde(default = "default_duration")]
  pub duration_minutes: u32,
  #[serde(default)]
  pub state:            DefenseState,
  #[serde(default)]
  pub certificate:      bool,
}

#[derive(Debug, Deserialize)]
pub struct NotificationEntry {
  pub user:    String,
  #[serde(default)]
  pub kind:    NotificationKind,
  pub title:   String,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub read:    bool,
}

fn yes() -> bool { true }

fn default_duration() -> u32 { DEFAULT_DURATION_MINUTES }

impl Fixture {
  pub fn parse(raw: &str) -> anyhow::Result<Self> {
    toml::from_str(raw).context("parsing fixture")
  }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

/// Fixture keys mapped to the ids the store assigned.
#[derive(Debug, Default)]
pub struct Seeded(BTreeMap<String, Uuid>);

impl Seeded {
  fn insert(&mut self, key: &str, id: Uuid) -> anyhow::Result<()> {
    if self.0.insert(key.to_owned(), id).is_some() {
      bail!("duplicate fixture key {key:?}");
    }
    Ok(())
  }

  pub fn id(&self, key: &str) -> anyhow::Result<Uuid> {
    self
      .0
      .get(key)
      .copied()
      .with_context(|| format!("unknown fixture key {key:?}"))
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Uuid)> {
    self.0.iter().map(|(k, id)| (k.as_str(), *id))
  }
}

/// The chain of review steps from draft to `target`.
fn review_path(target: ThesisState) -> &'static [ThesisState] {
  match target {
    ThesisState::Draft => &[],
    ThesisState::UnderReview => &[ThesisState::UnderReview],
    ThesisState::Approved => &[ThesisState::UnderReview, ThesisState::Approved],
    ThesisState::Defended => &[
      ThesisState::UnderReview,
      ThesisState::Approved,
      ThesisState::Defended,
    ],
  }
}

/// Load every entity of `fixture` into `directory`, in dependency order.
pub async fn seed<D: Directory>(directory: &D, fixture: Fixture) -> anyhow::Result<Seeded> {
  let mut ids = Seeded::default();

  for u in fixture.users {
    let user = directory
      .add_user(NewUser {
        display_name: u.display_name.unwrap_or_else(|| u.email.clone()),
        email:        u.email,
        roles:        u.roles,
        is_active:    u.active,
      })
      .await
      .with_context(|| format!("adding user {:?}", u.key))?;
    ids.insert(&u.key, user.user_id)?;
  }

  for c in fixture.committees {
    let committee = directory
      .add_committee(NewCommittee {
        name:         c.name,
        president_id: ids.id(&c.president)?,
        secretary_id: ids.id(&c.secretary)?,
        member_id:    ids.id(&c.member)?,
      })
      .await
      .with_context(|| format!("adding committee {:?}", c.key))?;
    ids.insert(&c.key, committee.committee_id)?;
  }

  for t in fixture.theses {
    let thesis = directory
      .add_thesis(NewThesis {
        title:       t.title,
        student_id:  ids.id(&t.student)?,
        tutor_id:    t.tutor.as_deref().map(|k| ids.id(k)).transpose()?,
        co_tutor_id: t.co_tutor.as_deref().map(|k| ids.id(k)).transpose()?,
      })
      .await
      .with_context(|| format!("adding thesis {:?}", t.key))?;
    for &step in review_path(t.state) {
      directory
        .set_thesis_state(thesis.thesis_id, step)
        .await
        .with_context(|| format!("moving thesis {:?} to {step}", t.key))?;
    }
    ids.insert(&t.key, thesis.thesis_id)?;
  }

  for d in fixture.defenses {
    let defense = directory
      .add_defense(NewDefense {
        thesis_id:        ids.id(&d.thesis)?,
        committee_id:     ids.id(&d.committee)?,
        scheduled_at:     d.scheduled_at,
        classroom:        d.classroom,
        duration_minutes: d.duration_minutes,
      })
      .await
      .with_context(|| format!("scheduling defense {:?}", d.key))?;
    if d.state != DefenseState::Scheduled {
      directory
        .set_defense_state(defense.defense_id, d.state)
        .await
        .with_context(|| format!("moving defense {:?} to {}", d.key, d.state))?;
    }
    if d.certificate {
      directory
        .mark_certificate_generated(defense.defense_id)
        .await
        .with_context(|| format!("generating certificate for {:?}", d.key))?;
    }
    ids.insert(&d.key, defense.defense_id)?;
  }

  for n in fixture.notifications {
    let user_id = ids.id(&n.user)?;
    let notification = directory
      .add_notification(NewNotification {
        user_id,
        kind: n.kind,
        title: n.title,
        message: n.message,
      })
      .await
      .with_context(|| format!("adding notification for {:?}", n.user))?;
    if n.read {
      directory
        .mark_notification_read(notification.notification_id)
        .await
        .context("marking notification read")?;
    }
  }

  tracing::info!(entities = ids.0.len(), "seeded directory");
  Ok(ids)
}
