//! Defense permissions.
//!
//! A defense is editable only while scheduled. Grading opens once it is
//! completed. Certificates become visible once generated; their metadata is
//! visible before that.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tfg_core::{committee::Seat, record::DefenseRecord, role::Role, user::User};

use crate::{
  action::DefenseAction,
  relation::{
    committee_seat, defense_committee, defense_thesis, is_thesis_owner, is_thesis_party,
    is_thesis_tutor,
  },
};

/// How an actor relates to a defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DefenseRole {
  President,
  Secretary,
  Member,
  Student,
  Tutor,
}

impl From<Seat> for DefenseRole {
  fn from(seat: Seat) -> Self {
    match seat {
      Seat::President => Self::President,
      Seat::Secretary => Self::Secretary,
      Seat::Member => Self::Member,
    }
  }
}

pub fn authorize(
  actor: &User,
  action: DefenseAction,
  record: Option<&DefenseRecord>,
  now: DateTime<Utc>,
) -> bool {
  let Some(record) = record else {
    return false;
  };
  if actor.is_admin() {
    return true;
  }
  match action {
    DefenseAction::View => can_view(actor, record),
    DefenseAction::Edit => can_edit(actor, record),
    DefenseAction::Delete => can_delete(actor, record, now),
    DefenseAction::ManageState => can_manage_state(actor, record),
    DefenseAction::Grade => can_grade(actor, record),
    DefenseAction::Schedule => can_schedule(actor, record),
    DefenseAction::ViewCertificate => can_view_certificate(actor, record),
    DefenseAction::ViewCertificateInfo => can_view_certificate_info(actor, record),
  }
}

/// Committee seats first, then thesis ownership, then tutorship.
pub fn role_of(actor: &User, record: &DefenseRecord) -> Option<DefenseRole> {
  if let Some(seat) = seat(actor, record) {
    return Some(seat.into());
  }
  let thesis = defense_thesis(record)?;
  if is_thesis_owner(actor, thesis) {
    return Some(DefenseRole::Student);
  }
  if is_thesis_tutor(actor, thesis) {
    return Some(DefenseRole::Tutor);
  }
  None
}

/// The actor's seat on the defense's committee. A record whose committee
/// does not match the defense grants no seat.
fn seat(actor: &User, record: &DefenseRecord) -> Option<Seat> {
  defense_committee(record).and_then(|committee| committee_seat(actor, committee))
}

fn is_seated(actor: &User, record: &DefenseRecord) -> bool { seat(actor, record).is_some() }

/// Student, tutors, or any committee seat.
fn is_party(actor: &User, record: &DefenseRecord) -> bool {
  defense_thesis(record).is_some_and(|thesis| is_thesis_party(actor, thesis))
    || is_seated(actor, record)
}

fn is_acting_president(actor: &User, record: &DefenseRecord) -> bool {
  actor.has_role(Role::CommitteePresident) && seat(actor, record) == Some(Seat::President)
}

pub fn can_view(actor: &User, record: &DefenseRecord) -> bool {
  actor.is_admin() || is_party(actor, record)
}

pub fn can_edit(actor: &User, record: &DefenseRecord) -> bool {
  actor.is_admin() || (record.defense.is_scheduled() && is_acting_president(actor, record))
}

/// Past-dated defenses cannot be deleted, even while still scheduled.
pub fn can_delete(actor: &User, record: &DefenseRecord, now: DateTime<Utc>) -> bool {
  actor.is_admin()
    || (record.defense.is_scheduled()
      && record.defense.scheduled_at > now
      && is_acting_president(actor, record))
}

pub fn can_manage_state(actor: &User, record: &DefenseRecord) -> bool {
  if actor.is_admin() || is_acting_president(actor, record) {
    return true;
  }
  let seated = is_seated(actor, record);
  (record.defense.is_scheduled() && seated)
    || (record.defense.is_completed() && actor.has_role(Role::Professor) && seated)
}

/// Seat holders grade, and only once the defense has taken place.
pub fn can_grade(actor: &User, record: &DefenseRecord) -> bool {
  record.defense.is_completed() && is_seated(actor, record)
}

pub fn can_schedule(actor: &User, record: &DefenseRecord) -> bool {
  actor.is_admin() || is_acting_president(actor, record)
}

pub fn can_view_certificate(actor: &User, record: &DefenseRecord) -> bool {
  actor.is_admin() || (record.defense.certificate_generated && is_party(actor, record))
}

pub fn can_view_certificate_info(actor: &User, record: &DefenseRecord) -> bool {
  actor.is_admin() || is_party(actor, record)
}
