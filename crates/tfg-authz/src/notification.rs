//! Notification permissions, kind visibility and delivery ceilings.
//!
//! Checks come in two shapes: about one notification, or about the class of
//! action with no notification in hand.

use tfg_core::{
  notification::{Notification, NotificationKind, Priority},
  role::Role,
  user::User,
};

use crate::action::NotificationAction;

pub fn authorize(
  actor: &User,
  action: NotificationAction,
  notification: Option<&Notification>,
) -> bool {
  match (action, notification) {
    // Everyone reads their own feed.
    (NotificationAction::View, None) => true,
    (NotificationAction::CleanupOwn, _) => true,
    (
      NotificationAction::Broadcast
      | NotificationAction::ViewGlobalStats
      | NotificationAction::CleanupSystem
      | NotificationAction::Export
      | NotificationAction::ManageEmailQueue,
      _,
    ) => actor.is_admin(),
    (_, None) => false,
    (_, Some(_)) if actor.is_admin() => true,
    (
      NotificationAction::View | NotificationAction::Delete | NotificationAction::MarkRead,
      Some(n),
    ) => is_owner(actor, n),
    // Regular users acknowledge or remove notifications, never rewrite them.
    (NotificationAction::Edit, Some(_)) => false,
  }
}

pub fn is_owner(actor: &User, notification: &Notification) -> bool {
  actor.is(notification.user_id)
}

/// Operational kinds are reserved for administrators. Ownership is checked
/// separately.
pub fn can_view_kind(actor: &User, kind: NotificationKind) -> bool {
  actor.is_admin() || !kind.is_restricted()
}

/// The highest priority tier pushed to `actor`.
pub fn max_priority(actor: &User) -> Priority {
  if actor.is_admin() {
    Priority::System
  } else if actor.has_role(Role::CommitteePresident) {
    Priority::Critical
  } else if actor.has_role(Role::Professor) {
    Priority::High
  } else {
    Priority::Normal
  }
}

/// Email delivery needs an address and an active account.
pub fn can_receive_email(actor: &User) -> bool {
  !actor.email.trim().is_empty() && actor.is_active
}

/// Notifications are produced by the system; only administrators author them
/// by hand.
pub fn can_create_notifications(actor: &User) -> bool { actor.is_admin() }
