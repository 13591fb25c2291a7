//! The resource instance an action is checked against.

use tfg_core::{
  committee::Committee,
  notification::Notification,
  record::{DefenseRecord, ThesisRecord, UserRecord},
};
use uuid::Uuid;

use crate::action::Family;

/// A borrowed, already-loaded resource.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
  Thesis(&'a ThesisRecord),
  Defense(&'a DefenseRecord),
  Committee(&'a Committee),
  Notification(&'a Notification),
  User(&'a UserRecord),
}

impl Resource<'_> {
  pub fn family(&self) -> Family {
    match self {
      Self::Thesis(_) => Family::Thesis,
      Self::Defense(_) => Family::Defense,
      Self::Committee(_) => Family::Committee,
      Self::Notification(_) => Family::Notification,
      Self::User(_) => Family::User,
    }
  }

  pub fn id(&self) -> Uuid {
    match self {
      Self::Thesis(r) => r.thesis.thesis_id,
      Self::Defense(r) => r.defense.defense_id,
      Self::Committee(c) => c.committee_id,
      Self::Notification(n) => n.notification_id,
      Self::User(r) => r.user.user_id,
    }
  }
}

impl<'a> From<&'a ThesisRecord> for Resource<'a> {
  fn from(r: &'a ThesisRecord) -> Self { Self::Thesis(r) }
}

impl<'a> From<&'a DefenseRecord> for Resource<'a> {
  fn from(r: &'a DefenseRecord) -> Self { Self::Defense(r) }
}

impl<'a> From<&'a Committee> for Resource<'a> {
  fn from(c: &'a Committee) -> Self { Self::Committee(c) }
}

impl<'a> From<&'a Notification> for Resource<'a> {
  fn from(n: &'a Notification) -> Self { Self::Notification(n) }
}

impl<'a> From<&'a UserRecord> for Resource<'a> {
  fn from(r: &'a UserRecord) -> Self { Self::User(r) }
}
