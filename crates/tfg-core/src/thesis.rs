//! Theses (TFGs) and their review lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::Error;

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ThesisState {
  #[default]
  Draft,
  UnderReview,
  Approved,
  Defended,
}

impl ThesisState {
  pub fn parse(s: &str) -> crate::Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownState(s.to_owned()))
  }

  /// The student may still change the work.
  pub fn is_editable(self) -> bool {
    matches!(self, Self::Draft | Self::UnderReview)
  }

  /// Review workflow: draft → under-review → approved → defended, with
  /// under-review able to fall back to draft when changes are requested.
  pub fn can_transition_to(self, next: Self) -> bool {
    matches!(
      (self, next),
      (Self::Draft, Self::UnderReview)
        | (Self::UnderReview, Self::Draft)
        | (Self::UnderReview, Self::Approved)
        | (Self::Approved, Self::Defended)
    )
  }
}

// ─── Thesis ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thesis {
  pub thesis_id:   Uuid,
  pub title:       String,
  pub state:       ThesisState,
  /// The owning student; exactly one.
  pub student_id:  Uuid,
  pub tutor_id:    Option<Uuid>,
  pub co_tutor_id: Option<Uuid>,
  pub defense_id:  Option<Uuid>,
  pub created_at:  DateTime<Utc>,
}

impl Thesis {
  pub fn is_editable(&self) -> bool { self.state.is_editable() }
}

/// Input to [`crate::store::Directory::add_thesis`]. New theses always start
/// as drafts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewThesis {
  pub title:       String,
  pub student_id:  Uuid,
  pub tutor_id:    Option<Uuid>,
  pub co_tutor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn editable_states() {
    let editable: Vec<_> =
      ThesisState::iter().filter(|s| s.is_editable()).collect();
    assert_eq!(editable, [ThesisState::Draft, ThesisState::UnderReview]);
  }

  #[test]
  fn defended_is_terminal() {
    assert!(ThesisState::iter().all(|s| !ThesisState::Defended.can_transition_to(s)));
  }

  #[test]
  fn review_can_fall_back_to_draft() {
    assert!(ThesisState::UnderReview.can_transition_to(ThesisState::Draft));
    assert!(!ThesisState::Draft.can_transition_to(ThesisState::Approved));
  }

  #[test]
  fn state_strings() {
    assert_eq!(ThesisState::UnderReview.to_string(), "under-review");
    assert_eq!(ThesisState::parse("approved").unwrap(), ThesisState::Approved);
    assert!(ThesisState::parse("borrador").is_err());
  }
}
