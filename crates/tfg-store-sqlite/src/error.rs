//! Error type for `tfg-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tfg_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("thesis not found: {0}")]
  ThesisNotFound(Uuid),

  #[error("defense not found: {0}")]
  DefenseNotFound(Uuid),

  #[error("committee not found: {0}")]
  CommitteeNotFound(Uuid),

  #[error("notification not found: {0}")]
  NotificationNotFound(Uuid),

  #[error("{entity} {id} cannot move from {from} to {to}")]
  InvalidTransition {
    entity: &'static str,
    id:     Uuid,
    from:   String,
    to:     String,
  },

  /// The committee or classroom is already booked near the requested time.
  #[error("slot taken by defense {0}")]
  SlotTaken(Uuid),

  #[error("thesis {0} already has a defense")]
  AlreadyScheduled(Uuid),

  #[error("defense {0} has not been completed")]
  NotCompleted(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
