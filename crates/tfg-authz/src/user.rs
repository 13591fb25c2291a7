//! User-account permissions and profile-field projection.
//!
//! Administrators may do anything to accounts except lock the system out:
//! they cannot delete, deactivate or re-role themselves, and cannot delete or
//! re-role another administrator.

use std::collections::BTreeSet;

use serde::Serialize;
use strum::{Display, IntoEnumIterator, IntoStaticStr};
use tfg_core::{
  record::UserRecord,
  role::{Role, RoleSet},
  user::{User, UserField},
};

use crate::{action::UserAction, relation::is_related_student};

/// How much of another account `actor` can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AccessLevel {
  AdminSelf,
  AdminFull,
  #[serde(rename = "self")]
  #[strum(to_string = "self")]
  Own,
  RelatedStudent,
  None,
}

const SELF_EDITABLE: [UserField; 7] = [
  UserField::Name,
  UserField::Surname,
  UserField::Phone,
  UserField::University,
  UserField::Department,
  UserField::Specialty,
  UserField::Password,
];

pub fn authorize(actor: &User, action: UserAction, target: Option<&UserRecord>) -> bool {
  match (action, target) {
    (
      UserAction::Create
      | UserAction::BulkActions
      | UserAction::Export
      | UserAction::ViewSystemStats,
      _,
    ) => actor.is_admin(),
    (_, None) => false,
    (_, Some(t)) if actor.is_admin() => !is_admin_lockout(actor, action, &t.user),
    (UserAction::View | UserAction::ViewStats, Some(t)) => can_view(actor, t),
    (UserAction::Edit | UserAction::ChangePassword, Some(t)) => actor.is(t.user.user_id),
    (
      UserAction::Delete | UserAction::ToggleStatus | UserAction::ManageRoles,
      Some(_),
    ) => false,
  }
}

/// The administrative actions an administrator may not take on `target`.
fn is_admin_lockout(actor: &User, action: UserAction, target: &User) -> bool {
  let is_self = actor.is(target.user_id);
  match action {
    UserAction::Delete | UserAction::ManageRoles => is_self || target.is_admin(),
    UserAction::ToggleStatus => is_self,
    UserAction::View
    | UserAction::Edit
    | UserAction::ChangePassword
    | UserAction::ViewStats
    | UserAction::Create
    | UserAction::BulkActions
    | UserAction::Export
    | UserAction::ViewSystemStats => false,
  }
}

/// Self, or a professor looking at one of their students.
pub fn can_view(actor: &User, target: &UserRecord) -> bool {
  actor.is_admin()
    || actor.is(target.user.user_id)
    || (actor.roles.is_professor_family() && is_related_student(actor, target))
}

pub fn can_delete(actor: &User, target: &User) -> bool {
  actor.is_admin() && !is_admin_lockout(actor, UserAction::Delete, target)
}

pub fn can_toggle_status(actor: &User, target: &User) -> bool {
  actor.is_admin() && !is_admin_lockout(actor, UserAction::ToggleStatus, target)
}

pub fn can_manage_roles(actor: &User, target: &User) -> bool {
  actor.is_admin() && !is_admin_lockout(actor, UserAction::ManageRoles, target)
}

/// Fields `actor` may change on `target`.
pub fn editable_fields(target: &User, actor: &User) -> BTreeSet<UserField> {
  if actor.is_admin() {
    UserField::iter().collect()
  } else if actor.is(target.user_id) {
    SELF_EDITABLE.into_iter().collect()
  } else {
    BTreeSet::new()
  }
}

pub fn access_level(target: &UserRecord, actor: &User) -> AccessLevel {
  let is_self = actor.is(target.user.user_id);
  if actor.is_admin() {
    return if is_self { AccessLevel::AdminSelf } else { AccessLevel::AdminFull };
  }
  if is_self {
    AccessLevel::Own
  } else if actor.roles.is_professor_family() && is_related_student(actor, target) {
    AccessLevel::RelatedStudent
  } else {
    AccessLevel::None
  }
}

/// Whether `actor` may rewrite an account's roles from `from` to `to`.
///
/// Only administrators change roles. Removing the admin role additionally
/// needs an active administrator to remain afterwards. `active_admins` is the
/// current count from the directory; `target_is_active` says whether the
/// account being changed is one of them.
pub fn can_change_role(
  from: &RoleSet,
  to: &RoleSet,
  actor: &User,
  target_is_active: bool,
  active_admins: usize,
) -> bool {
  if !actor.is_admin() {
    return false;
  }
  let demotes_admin = from.contains(Role::Admin) && !to.contains(Role::Admin);
  let remaining = if target_is_active { active_admins.saturating_sub(1) } else { active_admins };
  !demotes_admin || remaining > 0
}
