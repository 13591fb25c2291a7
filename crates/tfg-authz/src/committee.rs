//! Committee (tribunal) permissions.

use tfg_core::{
  committee::{Committee, Seat},
  defense::Defense,
  role::Role,
  user::User,
};

use crate::{
  action::CommitteeAction,
  relation::{committee_seat, is_committee_member, is_committee_president},
};

pub fn authorize(actor: &User, action: CommitteeAction, committee: Option<&Committee>) -> bool {
  match (action, committee) {
    (CommitteeAction::Create, _) => can_create(actor),
    (_, None) => false,
    (_, Some(_)) if actor.is_admin() => true,
    (CommitteeAction::View, Some(c)) => can_view(actor, c),
    (CommitteeAction::Edit, Some(c)) => can_edit(actor, c),
    // Membership and lifecycle are administrative.
    (
      CommitteeAction::Delete
      | CommitteeAction::ManageMembers
      | CommitteeAction::ToggleStatus,
      Some(_),
    ) => false,
    (CommitteeAction::ScheduleDefense, Some(c)) => can_schedule_defense(actor, c),
    (CommitteeAction::ViewAvailability, Some(c)) => is_committee_member(actor, c),
  }
}

pub fn can_create(actor: &User) -> bool {
  actor.is_admin() || actor.has_role(Role::CommitteePresident)
}

/// Professors see the committees they sit on.
pub fn can_view(actor: &User, committee: &Committee) -> bool {
  actor.is_admin()
    || (actor.roles.is_professor_family() && is_committee_member(actor, committee))
}

pub fn can_edit(actor: &User, committee: &Committee) -> bool {
  actor.is_admin()
    || (actor.has_role(Role::CommitteePresident) && is_committee_president(actor, committee))
}

pub fn can_schedule_defense(actor: &User, committee: &Committee) -> bool {
  can_edit(actor, committee)
}

pub fn role_in_committee(actor: &User, committee: &Committee) -> Option<Seat> {
  committee_seat(actor, committee)
}

/// Whether `committee` can take a new defense.
///
/// Only active committees are bookable. `conflict` is the result of the
/// directory's slot lookup for the requested time.
pub fn is_available(committee: &Committee, conflict: Option<&Defense>) -> bool {
  committee.is_active && conflict.is_none()
}
