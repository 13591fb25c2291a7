//! [`SqliteStore`]: the SQLite implementation of [`Directory`].

use std::path::Path;

use chrono::{DateTime, Duration, SubsecRound as _, Utc};
use rusqlite::{Connection, OptionalExtension as _, TransactionBehavior};
use uuid::Uuid;

use tfg_core::{
  committee::{Committee, NewCommittee},
  defense::{Defense, DefenseState, NewDefense},
  notification::{NewNotification, Notification},
  record::{DefenseRecord, ThesisRecord, UserRecord},
  role::RoleSet,
  store::{Directory, SlotQuery},
  thesis::{NewThesis, Thesis, ThesisState},
  user::{NewUser, User},
};

use crate::{
  encode::{
    COMMITTEE_COLUMNS, DEFENSE_COLUMNS, NOTIFICATION_COLUMNS, RawCommittee, RawDefense,
    RawNotification, RawThesis, RawUser, THESIS_COLUMNS, USER_COLUMNS, decode_uuid, encode_dt,
    encode_roles, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

/// Stored timestamps keep whole seconds only.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(0) }

// ─── Row fetchers ────────────────────────────────────────────────────────────
//
// Synchronous lookups run inside `Connection::call`, so a hydrated record is
// read in a single round trip to the database thread.

fn fetch_user(conn: &Connection, id: &str) -> rusqlite::Result<Option<RawUser>> {
  conn
    .query_row(
      &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
      rusqlite::params![id],
      RawUser::from_row,
    )
    .optional()
}

fn fetch_committee(conn: &Connection, id: &str) -> rusqlite::Result<Option<RawCommittee>> {
  conn
    .query_row(
      &format!("SELECT {COMMITTEE_COLUMNS} FROM committees WHERE committee_id = ?1"),
      rusqlite::params![id],
      RawCommittee::from_row,
    )
    .optional()
}

fn fetch_thesis(conn: &Connection, id: &str) -> rusqlite::Result<Option<RawThesis>> {
  conn
    .query_row(
      &format!("SELECT {THESIS_COLUMNS} FROM theses WHERE thesis_id = ?1"),
      rusqlite::params![id],
      RawThesis::from_row,
    )
    .optional()
}

fn fetch_defense(conn: &Connection, id: &str) -> rusqlite::Result<Option<RawDefense>> {
  conn
    .query_row(
      &format!("SELECT {DEFENSE_COLUMNS} FROM defenses WHERE defense_id = ?1"),
      rusqlite::params![id],
      RawDefense::from_row,
    )
    .optional()
}

fn fetch_notification(
  conn: &Connection,
  id: &str,
) -> rusqlite::Result<Option<RawNotification>> {
  conn
    .query_row(
      &format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE notification_id = ?1"),
      rusqlite::params![id],
      RawNotification::from_row,
    )
    .optional()
}

/// Encoded bounds of a [`SlotQuery`].
struct SlotWindow {
  from:    String,
  until:   String,
  exclude: Option<String>,
}

impl SlotWindow {
  fn new(slot: &SlotQuery) -> Self {
    let window = Duration::minutes(i64::from(slot.window_minutes));
    Self {
      from:    encode_dt(slot.at - window),
      until:   encode_dt(slot.at + window),
      exclude: slot.exclude.map(encode_uuid),
    }
  }
}

fn fetch_conflict(
  conn: &Connection,
  column: &'static str,
  value: &str,
  window: &SlotWindow,
) -> rusqlite::Result<Option<RawDefense>> {
  conn
    .query_row(
      &format!(
        "SELECT {DEFENSE_COLUMNS} FROM defenses
         WHERE {column} = ?1
           AND state != 'cancelled'
           AND scheduled_at BETWEEN ?2 AND ?3
           AND (?4 IS NULL OR defense_id != ?4)
         ORDER BY scheduled_at
         LIMIT 1"
      ),
      rusqlite::params![value, window.from, window.until, window.exclude],
      RawDefense::from_row,
    )
    .optional()
}

/// Why a defense could not be booked.
enum Refusal {
  ThesisMissing,
  CommitteeMissing,
  AlreadyScheduled,
  SlotTaken(String),
}

/// A thesis row with its linked defense and that defense's committee.
type RawThesisRecord = (RawThesis, Option<RawDefense>, Option<RawCommittee>);

fn fetch_thesis_record(conn: &Connection, thesis: RawThesis) -> rusqlite::Result<RawThesisRecord> {
  let defense = match &thesis.defense_id {
    Some(id) => fetch_defense(conn, id)?,
    None => None,
  };
  let committee = match &defense {
    Some(d) => fetch_committee(conn, &d.committee_id)?,
    None => None,
  };
  Ok((thesis, defense, committee))
}

fn decode_thesis_record((thesis, defense, committee): RawThesisRecord) -> Result<ThesisRecord> {
  Ok(ThesisRecord {
    thesis:    thesis.into_thesis()?,
    defense:   defense.map(RawDefense::into_defense).transpose()?,
    committee: committee.map(RawCommittee::into_committee).transpose()?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A TFG directory backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn user_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    Ok(
      self
        .conn
        .call(move |conn| Ok(fetch_user(conn, &id_str)?.is_some()))
        .await?,
    )
  }

  async fn require_user(&self, id: Uuid) -> Result<()> {
    if self.user_exists(id).await? { Ok(()) } else { Err(Error::UserNotFound(id)) }
  }

  async fn get_thesis(&self, id: Uuid) -> Result<Option<Thesis>> {
    let id_str = encode_uuid(id);
    let raw = self.conn.call(move |conn| Ok(fetch_thesis(conn, &id_str)?)).await?;
    raw.map(RawThesis::into_thesis).transpose()
  }

  async fn get_defense(&self, id: Uuid) -> Result<Option<Defense>> {
    let id_str = encode_uuid(id);
    let raw = self.conn.call(move |conn| Ok(fetch_defense(conn, &id_str)?)).await?;
    raw.map(RawDefense::into_defense).transpose()
  }

  /// First non-cancelled defense matching `column = value` inside the slot.
  async fn find_conflict(
    &self,
    column: &'static str,
    value: String,
    slot: &SlotQuery,
  ) -> Result<Option<Defense>> {
    let window = SlotWindow::new(slot);
    let raw = self
      .conn
      .call(move |conn| Ok(fetch_conflict(conn, column, &value, &window)?))
      .await?;

    raw.map(RawDefense::into_defense).transpose()
  }
}

// ─── Directory impl ──────────────────────────────────────────────────────────

impl Directory for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:      Uuid::new_v4(),
      email:        input.email,
      display_name: input.display_name,
      roles:        input.roles,
      is_active:    input.is_active,
      created_at:   now(),
    };

    let id_str    = encode_uuid(user.user_id);
    let email     = user.email.clone();
    let name      = user.display_name.clone();
    let roles_str = encode_roles(&user.roles)?;
    let active    = user.is_active;
    let at_str    = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, email, display_name, roles, is_active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, email, name, roles_str, active, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(user_id = %user.user_id, "added user");
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);
    let raw = self.conn.call(move |conn| Ok(fetch_user(conn, &id_str)?)).await?;
    raw.map(RawUser::into_user).transpose()
  }

  async fn load_user(&self, id: Uuid) -> Result<Option<UserRecord>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| {
        let Some(user) = fetch_user(conn, &id_str)? else {
          return Ok(None);
        };
        let owned: Vec<RawThesis> = {
          let mut stmt = conn.prepare(&format!(
            "SELECT {THESIS_COLUMNS} FROM theses WHERE student_id = ?1 ORDER BY created_at"
          ))?;
          stmt
            .query_map(rusqlite::params![id_str], RawThesis::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        let theses = owned
          .into_iter()
          .map(|t| fetch_thesis_record(conn, t))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some((user, theses)))
      })
      .await?;

    let Some((user, theses)) = raw else {
      return Ok(None);
    };
    Ok(Some(UserRecord {
      user:   user.into_user()?,
      theses: theses.into_iter().map(decode_thesis_record).collect::<Result<_>>()?,
    }))
  }

  async fn set_user_roles(&self, id: Uuid, roles: RoleSet) -> Result<()> {
    let id_str    = encode_uuid(id);
    let roles_str = encode_roles(&roles)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET roles = ?2 WHERE user_id = ?1",
          rusqlite::params![id_str, roles_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(id));
    }
    tracing::debug!(user_id = %id, "replaced user roles");
    Ok(())
  }

  async fn set_user_active(&self, id: Uuid, active: bool) -> Result<()> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET is_active = ?2 WHERE user_id = ?1",
          rusqlite::params![id_str, active],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(id));
    }
    Ok(())
  }

  async fn count_active_admins(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM users
           WHERE is_active = 1
             AND EXISTS (SELECT 1 FROM json_each(users.roles) WHERE value = 'admin')",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(count as usize)
  }

  // ── Committees ────────────────────────────────────────────────────────────

  async fn add_committee(&self, input: NewCommittee) -> Result<Committee> {
    for holder in [input.president_id, input.secretary_id, input.member_id] {
      self.require_user(holder).await?;
    }

    let committee = Committee {
      committee_id: Uuid::new_v4(),
      name:         input.name,
      president_id: input.president_id,
      secretary_id: input.secretary_id,
      member_id:    input.member_id,
      is_active:    true,
    };

    let id_str        = encode_uuid(committee.committee_id);
    let name          = committee.name.clone();
    let president_str = encode_uuid(committee.president_id);
    let secretary_str = encode_uuid(committee.secretary_id);
    let member_str    = encode_uuid(committee.member_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO committees (committee_id, name, president_id, secretary_id, member_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, president_str, secretary_str, member_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(committee)
  }

  async fn get_committee(&self, id: Uuid) -> Result<Option<Committee>> {
    let id_str = encode_uuid(id);
    let raw = self.conn.call(move |conn| Ok(fetch_committee(conn, &id_str)?)).await?;
    raw.map(RawCommittee::into_committee).transpose()
  }

  async fn find_committee_conflict(
    &self,
    committee_id: Uuid,
    slot: &SlotQuery,
  ) -> Result<Option<Defense>> {
    self.find_conflict("committee_id", encode_uuid(committee_id), slot).await
  }

  async fn find_classroom_conflict(
    &self,
    classroom: &str,
    slot: &SlotQuery,
  ) -> Result<Option<Defense>> {
    self.find_conflict("classroom", classroom.to_owned(), slot).await
  }

  // ── Theses ────────────────────────────────────────────────────────────────

  async fn add_thesis(&self, input: NewThesis) -> Result<Thesis> {
    self.require_user(input.student_id).await?;
    for tutor in input.tutor_id.into_iter().chain(input.co_tutor_id) {
      self.require_user(tutor).await?;
    }

    let thesis = Thesis {
      thesis_id:   Uuid::new_v4(),
      title:       input.title,
      state:       ThesisState::Draft,
      student_id:  input.student_id,
      tutor_id:    input.tutor_id,
      co_tutor_id: input.co_tutor_id,
      defense_id:  None,
      created_at:  now(),
    };

    let id_str       = encode_uuid(thesis.thesis_id);
    let title        = thesis.title.clone();
    let state_str: &'static str = thesis.state.into();
    let student_str  = encode_uuid(thesis.student_id);
    let tutor_str    = thesis.tutor_id.map(encode_uuid);
    let co_tutor_str = thesis.co_tutor_id.map(encode_uuid);
    let at_str       = encode_dt(thesis.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO theses (
             thesis_id, title, state, student_id, tutor_id, co_tutor_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            title,
            state_str,
            student_str,
            tutor_str,
            co_tutor_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(thesis)
  }

  async fn load_thesis(&self, id: Uuid) -> Result<Option<ThesisRecord>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| {
        let Some(thesis) = fetch_thesis(conn, &id_str)? else {
          return Ok(None);
        };
        Ok(Some(fetch_thesis_record(conn, thesis)?))
      })
      .await?;

    raw.map(decode_thesis_record).transpose()
  }

  async fn set_thesis_state(&self, id: Uuid, state: ThesisState) -> Result<()> {
    let current = self.get_thesis(id).await?.ok_or(Error::ThesisNotFound(id))?;
    let refused = || Error::InvalidTransition {
      entity: "thesis",
      id,
      from: current.state.to_string(),
      to: state.to_string(),
    };
    if !current.state.can_transition_to(state) {
      return Err(refused());
    }

    let id_str = encode_uuid(id);
    let from_str: &'static str = current.state.into();
    let to_str: &'static str = state.into();

    // Guarded on the state read above, so a concurrent change loses.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE theses SET state = ?3 WHERE thesis_id = ?1 AND state = ?2",
          rusqlite::params![id_str, from_str, to_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(refused());
    }
    tracing::debug!(thesis_id = %id, from = %current.state, to = %state, "thesis state changed");
    Ok(())
  }

  // ── Defenses ──────────────────────────────────────────────────────────────

  async fn add_defense(&self, input: NewDefense) -> Result<Defense> {
    let defense = Defense {
      defense_id:            Uuid::new_v4(),
      thesis_id:             input.thesis_id,
      committee_id:          input.committee_id,
      state:                 DefenseState::Scheduled,
      scheduled_at:          input.scheduled_at.trunc_subsecs(0),
      classroom:             input.classroom,
      duration_minutes:      input.duration_minutes,
      certificate_generated: false,
    };

    let window = SlotWindow::new(&SlotQuery {
      at:             defense.scheduled_at,
      window_minutes: defense.duration_minutes,
      exclude:        None,
    });
    let id_str        = encode_uuid(defense.defense_id);
    let thesis_str    = encode_uuid(defense.thesis_id);
    let committee_str = encode_uuid(defense.committee_id);
    let state_str: &'static str = defense.state.into();
    let at_str        = encode_dt(defense.scheduled_at);
    let classroom     = defense.classroom.clone();
    let duration      = defense.duration_minutes;

    // Checks and writes share one immediate transaction; a refusal rolls back.
    let refusal = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(thesis) = fetch_thesis(&tx, &thesis_str)? else {
          return Ok(Some(Refusal::ThesisMissing));
        };
        if let Some(existing) = &thesis.defense_id
          && fetch_defense(&tx, existing)?.is_some_and(|d| d.state != "cancelled")
        {
          return Ok(Some(Refusal::AlreadyScheduled));
        }
        if fetch_committee(&tx, &committee_str)?.is_none() {
          return Ok(Some(Refusal::CommitteeMissing));
        }
        for (column, value) in [("committee_id", &committee_str), ("classroom", &classroom)] {
          if let Some(taken) = fetch_conflict(&tx, column, value, &window)? {
            return Ok(Some(Refusal::SlotTaken(taken.defense_id)));
          }
        }

        tx.execute(
          "INSERT INTO defenses (
             defense_id, thesis_id, committee_id, state, scheduled_at,
             classroom, duration_minutes
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            thesis_str,
            committee_str,
            state_str,
            at_str,
            classroom,
            duration,
          ],
        )?;
        tx.execute(
          "UPDATE theses SET defense_id = ?2 WHERE thesis_id = ?1",
          rusqlite::params![thesis_str, id_str],
        )?;
        tx.commit()?;
        Ok(None)
      })
      .await?;

    match refusal {
      None => {}
      Some(Refusal::ThesisMissing) => return Err(Error::ThesisNotFound(defense.thesis_id)),
      Some(Refusal::CommitteeMissing) => {
        return Err(Error::CommitteeNotFound(defense.committee_id));
      }
      Some(Refusal::AlreadyScheduled) => {
        return Err(Error::AlreadyScheduled(defense.thesis_id));
      }
      Some(Refusal::SlotTaken(taken)) => {
        return Err(Error::SlotTaken(decode_uuid(&taken)?));
      }
    }

    tracing::debug!(
      defense_id = %defense.defense_id,
      thesis_id = %defense.thesis_id,
      "scheduled defense"
    );
    Ok(defense)
  }

  async fn load_defense(&self, id: Uuid) -> Result<Option<DefenseRecord>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| {
        let Some(defense) = fetch_defense(conn, &id_str)? else {
          return Ok(None);
        };
        let thesis = fetch_thesis(conn, &defense.thesis_id)?;
        let committee = fetch_committee(conn, &defense.committee_id)?;
        Ok(Some((defense, thesis, committee)))
      })
      .await?;

    let Some((defense, thesis, committee)) = raw else {
      return Ok(None);
    };
    let defense = defense.into_defense()?;
    let thesis = thesis.ok_or(Error::ThesisNotFound(defense.thesis_id))?;
    let committee = committee.ok_or(Error::CommitteeNotFound(defense.committee_id))?;
    Ok(Some(DefenseRecord {
      thesis: thesis.into_thesis()?,
      committee: committee.into_committee()?,
      defense,
    }))
  }

  async fn set_defense_state(&self, id: Uuid, state: DefenseState) -> Result<()> {
    let current = self.get_defense(id).await?.ok_or(Error::DefenseNotFound(id))?;
    let refused = || Error::InvalidTransition {
      entity: "defense",
      id,
      from: current.state.to_string(),
      to: state.to_string(),
    };
    if !current.state.can_transition_to(state) {
      return Err(refused());
    }

    let id_str = encode_uuid(id);
    let from_str: &'static str = current.state.into();
    let to_str: &'static str = state.into();

    // Two committee members closing the same defense: only one update lands.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE defenses SET state = ?3 WHERE defense_id = ?1 AND state = ?2",
          rusqlite::params![id_str, from_str, to_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(refused());
    }
    tracing::debug!(defense_id = %id, to = %state, "defense state changed");
    Ok(())
  }

  async fn mark_certificate_generated(&self, id: Uuid) -> Result<()> {
    let defense = self.get_defense(id).await?.ok_or(Error::DefenseNotFound(id))?;
    if !defense.is_completed() {
      return Err(Error::NotCompleted(id));
    }

    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE defenses SET certificate_generated = 1 WHERE defense_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn add_notification(&self, input: NewNotification) -> Result<Notification> {
    self.require_user(input.user_id).await?;

    let notification = Notification {
      notification_id: Uuid::new_v4(),
      user_id:         input.user_id,
      kind:            input.kind,
      title:           input.title,
      message:         input.message,
      is_read:         false,
      created_at:      now(),
    };

    let id_str   = encode_uuid(notification.notification_id);
    let user_str = encode_uuid(notification.user_id);
    let kind_str: &'static str = notification.kind.into();
    let title    = notification.title.clone();
    let message  = notification.message.clone();
    let at_str   = encode_dt(notification.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notifications (
             notification_id, user_id, kind, title, message, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, user_str, kind_str, title, message, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(notification)
  }

  async fn get_notification(&self, id: Uuid) -> Result<Option<Notification>> {
    let id_str = encode_uuid(id);
    let raw = self
      .conn
      .call(move |conn| Ok(fetch_notification(conn, &id_str)?))
      .await?;
    raw.map(RawNotification::into_notification).transpose()
  }

  async fn mark_notification_read(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notifications SET is_read = 1 WHERE notification_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotificationNotFound(id));
    }
    Ok(())
  }
}
