//! Defense events and certificate (acta) status.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::Error;

/// Slot length used when the caller does not give one.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DefenseState {
  #[default]
  Scheduled,
  Completed,
  Cancelled,
}

impl DefenseState {
  pub fn parse(s: &str) -> crate::Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownState(s.to_owned()))
  }

  /// A scheduled defense is either held or called off; both are final.
  pub fn can_transition_to(self, next: Self) -> bool {
    matches!(
      (self, next),
      (Self::Scheduled, Self::Completed) | (Self::Scheduled, Self::Cancelled)
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defense {
  pub defense_id:            Uuid,
  pub thesis_id:             Uuid,
  pub committee_id:          Uuid,
  pub state:                 DefenseState,
  pub scheduled_at:          DateTime<Utc>,
  pub classroom:             String,
  pub duration_minutes:      u32,
  pub certificate_generated: bool,
}

impl Defense {
  pub fn is_scheduled(&self) -> bool { self.state == DefenseState::Scheduled }

  pub fn is_completed(&self) -> bool { self.state == DefenseState::Completed }
}

/// Input to [`crate::store::Directory::add_defense`]. New defenses start as
/// [`DefenseState::Scheduled`] without a certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDefense {
  pub thesis_id:        Uuid,
  pub committee_id:     Uuid,
  pub scheduled_at:     DateTime<Utc>,
  pub classroom:        String,
  #[serde(default = "default_duration")]
  pub duration_minutes: u32,
}

fn default_duration() -> u32 { DEFAULT_DURATION_MINUTES }
