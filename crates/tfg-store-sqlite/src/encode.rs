//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with whole seconds and a `Z`
//! suffix, so that string order is time order. Role sets are compact JSON.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use tfg_core::{
  committee::Committee,
  defense::{Defense, DefenseState},
  notification::{Notification, NotificationKind},
  role::RoleSet,
  thesis::{Thesis, ThesisState},
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Secs, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Roles ───────────────────────────────────────────────────────────────────

pub fn encode_roles(roles: &RoleSet) -> Result<String> { Ok(serde_json::to_string(roles)?) }

pub fn decode_roles(s: &str) -> Result<RoleSet> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "user_id, email, display_name, roles, is_active, created_at";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:      String,
  pub email:        String,
  pub display_name: String,
  pub roles:        String,
  pub is_active:    bool,
  pub created_at:   String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:      row.get(0)?,
      email:        row.get(1)?,
      display_name: row.get(2)?,
      roles:        row.get(3)?,
      is_active:    row.get(4)?,
      created_at:   row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:      decode_uuid(&self.user_id)?,
      email:        self.email,
      display_name: self.display_name,
      roles:        decode_roles(&self.roles)?,
      is_active:    self.is_active,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub const COMMITTEE_COLUMNS: &str =
  "committee_id, name, president_id, secretary_id, member_id, is_active";

pub struct RawCommittee {
  pub committee_id: String,
  pub name:         String,
  pub president_id: String,
  pub secretary_id: String,
  pub member_id:    String,
  pub is_active:    bool,
}

impl RawCommittee {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      committee_id: row.get(0)?,
      name:         row.get(1)?,
      president_id: row.get(2)?,
      secretary_id: row.get(3)?,
      member_id:    row.get(4)?,
      is_active:    row.get(5)?,
    })
  }

  pub fn into_committee(self) -> Result<Committee> {
    Ok(Committee {
      committee_id: decode_uuid(&self.committee_id)?,
      name:         self.name,
      president_id: decode_uuid(&self.president_id)?,
      secretary_id: decode_uuid(&self.secretary_id)?,
      member_id:    decode_uuid(&self.member_id)?,
      is_active:    self.is_active,
    })
  }
}

pub const THESIS_COLUMNS: &str =
  "thesis_id, title, state, student_id, tutor_id, co_tutor_id, defense_id, created_at";

pub struct RawThesis {
  pub thesis_id:   String,
  pub title:       String,
  pub state:       String,
  pub student_id:  String,
  pub tutor_id:    Option<String>,
  pub co_tutor_id: Option<String>,
  pub defense_id:  Option<String>,
  pub created_at:  String,
}

impl RawThesis {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      thesis_id:   row.get(0)?,
      title:       row.get(1)?,
      state:       row.get(2)?,
      student_id:  row.get(3)?,
      tutor_id:    row.get(4)?,
      co_tutor_id: row.get(5)?,
      defense_id:  row.get(6)?,
      created_at:  row.get(7)?,
    })
  }

  pub fn into_thesis(self) -> Result<Thesis> {
    Ok(Thesis {
      thesis_id:   decode_uuid(&self.thesis_id)?,
      title:       self.title,
      state:       ThesisState::parse(&self.state)?,
      student_id:  decode_uuid(&self.student_id)?,
      tutor_id:    decode_opt_uuid(self.tutor_id)?,
      co_tutor_id: decode_opt_uuid(self.co_tutor_id)?,
      defense_id:  decode_opt_uuid(self.defense_id)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const DEFENSE_COLUMNS: &str = "defense_id, thesis_id, committee_id, state, scheduled_at, \
                                   classroom, duration_minutes, certificate_generated";

pub struct RawDefense {
  pub defense_id:            String,
  pub thesis_id:             String,
  pub committee_id:          String,
  pub state:                 String,
  pub scheduled_at:          String,
  pub classroom:             String,
  pub duration_minutes:      u32,
  pub certificate_generated: bool,
}

impl RawDefense {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      defense_id:            row.get(0)?,
      thesis_id:             row.get(1)?,
      committee_id:          row.get(2)?,
      state:                 row.get(3)?,
      scheduled_at:          row.get(4)?,
      classroom:             row.get(5)?,
      duration_minutes:      row.get(6)?,
      certificate_generated: row.get(7)?,
    })
  }

  pub fn into_defense(self) -> Result<Defense> {
    Ok(Defense {
      defense_id:            decode_uuid(&self.defense_id)?,
      thesis_id:             decode_uuid(&self.thesis_id)?,
      committee_id:          decode_uuid(&self.committee_id)?,
      state:                 DefenseState::parse(&self.state)?,
      scheduled_at:          decode_dt(&self.scheduled_at)?,
      classroom:             self.classroom,
      duration_minutes:      self.duration_minutes,
      certificate_generated: self.certificate_generated,
    })
  }
}

pub const NOTIFICATION_COLUMNS: &str =
  "notification_id, user_id, kind, title, message, is_read, created_at";

pub struct RawNotification {
  pub notification_id: String,
  pub user_id:         String,
  pub kind:            String,
  pub title:           String,
  pub message:         String,
  pub is_read:         bool,
  pub created_at:      String,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      notification_id: row.get(0)?,
      user_id:         row.get(1)?,
      kind:            row.get(2)?,
      title:           row.get(3)?,
      message:         row.get(4)?,
      is_read:         row.get(5)?,
      created_at:      row.get(6)?,
    })
  }

  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      notification_id: decode_uuid(&self.notification_id)?,
      user_id:         decode_uuid(&self.user_id)?,
      kind:            NotificationKind::parse(&self.kind)?,
      title:           self.title,
      message:         self.message,
      is_read:         self.is_read,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
