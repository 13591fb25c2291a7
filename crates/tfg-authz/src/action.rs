//! Action identifiers, one closed enum per resource family.
//!
//! The string form of an [`Action`] is `<family>.<action>`, e.g.
//! `thesis.upload_file` or `defense.view_certificate_info`. Unknown strings are
//! rejected at parse time; decisions only ever see well-formed actions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tfg_core::Error;

// ─── Scope ───────────────────────────────────────────────────────────────────

/// Whether an action targets a specific resource, the resource class, or may
/// be asked either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
  /// Requires a loaded resource; without one the answer is always "deny".
  Instance,
  /// About the class of resources; any supplied instance is ignored.
  Collection,
  /// Meaningful with and without an instance (notification feed viewing).
  Either,
}

// ─── Families ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Family {
  Thesis,
  Defense,
  Committee,
  Notification,
  User,
}

macro_rules! action_enum {
  ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
    $(#[$meta])*
    #[derive(
      Debug,
      Clone,
      Copy,
      PartialEq,
      Eq,
      PartialOrd,
      Ord,
      Hash,
      Display,
      EnumIter,
      EnumString,
      IntoStaticStr,
    )]
    #[strum(serialize_all = "snake_case")]
    pub enum $name {
      $($variant),+
    }
  };
}

action_enum! {
  /// Actions on a thesis.
  ThesisAction {
    View,
    Edit,
    Delete,
    UpdateState,
    UploadFile,
    DownloadFile,
    Create,
  }
}

action_enum! {
  /// Actions on a defense event.
  DefenseAction {
    View,
    Edit,
    Delete,
    ManageState,
    Grade,
    Schedule,
    ViewCertificate,
    ViewCertificateInfo,
  }
}

action_enum! {
  /// Actions on a committee.
  CommitteeAction {
    View,
    Edit,
    Delete,
    ManageMembers,
    ScheduleDefense,
    ViewAvailability,
    ToggleStatus,
    Create,
  }
}

action_enum! {
  /// Actions on notifications.
  NotificationAction {
    View,
    Edit,
    Delete,
    MarkRead,
    Broadcast,
    ViewGlobalStats,
    CleanupOwn,
    CleanupSystem,
    Export,
    ManageEmailQueue,
  }
}

action_enum! {
  /// Actions on user accounts.
  UserAction {
    View,
    Edit,
    Delete,
    ChangePassword,
    ToggleStatus,
    ManageRoles,
    ViewStats,
    Create,
    BulkActions,
    Export,
    ViewSystemStats,
  }
}

impl ThesisAction {
  pub fn scope(self) -> Scope {
    match self {
      Self::Create => Scope::Collection,
      Self::View
      | Self::Edit
      | Self::Delete
      | Self::UpdateState
      | Self::UploadFile
      | Self::DownloadFile => Scope::Instance,
    }
  }
}

impl DefenseAction {
  pub fn scope(self) -> Scope { Scope::Instance }
}

impl CommitteeAction {
  pub fn scope(self) -> Scope {
    match self {
      Self::Create => Scope::Collection,
      Self::View
      | Self::Edit
      | Self::Delete
      | Self::ManageMembers
      | Self::ScheduleDefense
      | Self::ViewAvailability
      | Self::ToggleStatus => Scope::Instance,
    }
  }
}

impl NotificationAction {
  pub fn scope(self) -> Scope {
    match self {
      Self::View => Scope::Either,
      Self::Edit | Self::Delete | Self::MarkRead => Scope::Instance,
      Self::Broadcast
      | Self::ViewGlobalStats
      | Self::CleanupOwn
      | Self::CleanupSystem
      | Self::Export
      | Self::ManageEmailQueue => Scope::Collection,
    }
  }
}

impl UserAction {
  pub fn scope(self) -> Scope {
    match self {
      Self::Create | Self::BulkActions | Self::Export | Self::ViewSystemStats => {
        Scope::Collection
      }
      Self::View
      | Self::Edit
      | Self::Delete
      | Self::ChangePassword
      | Self::ToggleStatus
      | Self::ManageRoles
      | Self::ViewStats => Scope::Instance,
    }
  }
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// Any action, tagged with its resource family.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
  Thesis(ThesisAction),
  Defense(DefenseAction),
  Committee(CommitteeAction),
  Notification(NotificationAction),
  User(UserAction),
}

impl Action {
  pub fn family(self) -> Family {
    match self {
      Self::Thesis(_) => Family::Thesis,
      Self::Defense(_) => Family::Defense,
      Self::Committee(_) => Family::Committee,
      Self::Notification(_) => Family::Notification,
      Self::User(_) => Family::User,
    }
  }

  pub fn scope(self) -> Scope {
    match self {
      Self::Thesis(a) => a.scope(),
      Self::Defense(a) => a.scope(),
      Self::Committee(a) => a.scope(),
      Self::Notification(a) => a.scope(),
      Self::User(a) => a.scope(),
    }
  }

  /// Every action of `family`, in declaration order.
  pub fn of_family(family: Family) -> Box<dyn Iterator<Item = Action>> {
    match family {
      Family::Thesis => Box::new(ThesisAction::iter().map(Self::Thesis)),
      Family::Defense => Box::new(DefenseAction::iter().map(Self::Defense)),
      Family::Committee => Box::new(CommitteeAction::iter().map(Self::Committee)),
      Family::Notification => {
        Box::new(NotificationAction::iter().map(Self::Notification))
      }
      Family::User => Box::new(UserAction::iter().map(Self::User)),
    }
  }

  /// Every action of every family.
  pub fn all() -> impl Iterator<Item = Action> {
    Family::iter().flat_map(Self::of_family)
  }

  fn name(self) -> &'static str {
    match self {
      Self::Thesis(a) => a.into(),
      Self::Defense(a) => a.into(),
      Self::Committee(a) => a.into(),
      Self::Notification(a) => a.into(),
      Self::User(a) => a.into(),
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.family(), self.name())
  }
}

impl FromStr for Action {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let unknown = || Error::UnknownAction(s.to_owned());
    let (family, name) = s.split_once('.').ok_or_else(unknown)?;
    let family = Family::from_str(family).map_err(|_| unknown())?;

    let action = match family {
      Family::Thesis => name.parse().map(Self::Thesis),
      Family::Defense => name.parse().map(Self::Defense),
      Family::Committee => name.parse().map(Self::Committee),
      Family::Notification => name.parse().map(Self::Notification),
      Family::User => name.parse().map(Self::User),
    };
    action.map_err(|_| unknown())
  }
}

impl TryFrom<String> for Action {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Action> for String {
  fn from(action: Action) -> Self { action.to_string() }
}

impl From<ThesisAction> for Action {
  fn from(a: ThesisAction) -> Self { Self::Thesis(a) }
}

impl From<DefenseAction> for Action {
  fn from(a: DefenseAction) -> Self { Self::Defense(a) }
}

impl From<CommitteeAction> for Action {
  fn from(a: CommitteeAction) -> Self { Self::Committee(a) }
}

impl From<NotificationAction> for Action {
  fn from(a: NotificationAction) -> Self { Self::Notification(a) }
}

impl From<UserAction> for Action {
  fn from(a: UserAction) -> Self { Self::User(a) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn action_strings_round_trip() {
    for action in Action::all() {
      let parsed: Action = action.to_string().parse().unwrap();
      assert_eq!(parsed, action);
    }
  }

  #[test]
  fn known_identifiers() {
    assert_eq!(
      "defense.view_certificate_info".parse::<Action>().unwrap(),
      Action::Defense(DefenseAction::ViewCertificateInfo)
    );
    assert_eq!(
      Action::Thesis(ThesisAction::UploadFile).to_string(),
      "thesis.upload_file"
    );
  }

  #[test]
  fn unknown_identifiers_are_rejected() {
    for bad in ["thesis.grade", "tfg_view", "defense.", ".view", "payment.view"] {
      assert!(
        matches!(bad.parse::<Action>(), Err(Error::UnknownAction(_))),
        "{bad} should not parse"
      );
    }
  }

  #[test]
  fn serde_uses_the_string_form() {
    let json = serde_json::to_string(&Action::User(UserAction::ManageRoles)).unwrap();
    assert_eq!(json, r#""user.manage_roles""#);
    let back: Action = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Action::User(UserAction::ManageRoles));
  }
}
