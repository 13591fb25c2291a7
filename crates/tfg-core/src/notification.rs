//! In-app notifications and their delivery priority tiers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::Error;

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
pub enum NotificationKind {
  #[default]
  Info,
  Warning,
  Success,
  Error,
  Comment,
  StateChange,
  Defense,
  Approval,
  System,
  Maintenance,
  Audit,
}

impl NotificationKind {
  pub fn parse(s: &str) -> crate::Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownKind(s.to_owned()))
  }

  /// Operational kinds that only administrators receive.
  pub fn is_restricted(self) -> bool {
    matches!(self, Self::System | Self::Maintenance | Self::Audit)
  }
}

/// Delivery priority ceiling. The discriminant is the tier number handed to
/// the delivery layer.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
  Normal   = 1,
  High     = 2,
  Critical = 3,
  System   = 4,
}

impl Priority {
  pub fn tier(self) -> u8 { self as u8 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub notification_id: Uuid,
  /// The single owning account.
  pub user_id:         Uuid,
  pub kind:            NotificationKind,
  pub title:           String,
  pub message:         String,
  pub is_read:         bool,
  pub created_at:      DateTime<Utc>,
}

/// Input to [`crate::store::Directory::add_notification`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
  pub user_id: Uuid,
  #[serde(default)]
  pub kind:    NotificationKind,
  pub title:   String,
  #[serde(default)]
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn priority_tiers() {
    assert_eq!(Priority::Normal.tier(), 1);
    assert_eq!(Priority::System.tier(), 4);
    assert!(Priority::Critical > Priority::High);
  }

  #[test]
  fn restricted_kinds() {
    assert!(NotificationKind::Audit.is_restricted());
    assert!(!NotificationKind::StateChange.is_restricted());
    assert_eq!(
      NotificationKind::parse("state-change").unwrap(),
      NotificationKind::StateChange
    );
  }
}
