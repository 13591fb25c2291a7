//! Error types for `tfg-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
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

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("unknown action identifier: {0:?}")]
  UnknownAction(String),

  #[error("unknown state: {0:?}")]
  UnknownState(String),

  #[error("unknown notification kind: {0:?}")]
  UnknownKind(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
