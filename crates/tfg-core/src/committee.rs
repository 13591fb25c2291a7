//! Committees (tribunals): three seats that evaluate defenses.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use uuid::Uuid;

/// One of the three seats on a committee.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Seat {
  President,
  Secretary,
  Member,
}

/// The three seats are held by distinct accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
  pub committee_id: Uuid,
  pub name:         String,
  pub president_id: Uuid,
  pub secretary_id: Uuid,
  pub member_id:    Uuid,
  pub is_active:    bool,
}

impl Committee {
  /// The seat held by `user_id`, checked president first.
  pub fn seat_of(&self, user_id: Uuid) -> Option<Seat> {
    if self.president_id == user_id {
      Some(Seat::President)
    } else if self.secretary_id == user_id {
      Some(Seat::Secretary)
    } else if self.member_id == user_id {
      Some(Seat::Member)
    } else {
      None
    }
  }
}

/// Input to [`crate::store::Directory::add_committee`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommittee {
  pub name:         String,
  pub president_id: Uuid,
  pub secretary_id: Uuid,
  pub member_id:    Uuid,
}
