//! Relationship predicates shared by every authorizer.
//!
//! These are the only places that decide who "sits on a committee" or "is a
//! party to a thesis". All comparisons are by id.

use tfg_core::{
  committee::{Committee, Seat},
  record::{DefenseRecord, ThesisRecord, UserRecord},
  role::Role,
  thesis::Thesis,
  user::User,
};

/// The seat `actor` occupies on `committee`, if any.
pub fn committee_seat(actor: &User, committee: &Committee) -> Option<Seat> {
  committee.seat_of(actor.user_id)
}

/// President, secretary or member of `committee`.
pub fn is_committee_member(actor: &User, committee: &Committee) -> bool {
  committee_seat(actor, committee).is_some()
}

/// Holds the president seat on `committee`.
pub fn is_committee_president(actor: &User, committee: &Committee) -> bool {
  committee_seat(actor, committee) == Some(Seat::President)
}

pub fn is_thesis_owner(actor: &User, thesis: &Thesis) -> bool {
  actor.is(thesis.student_id)
}

/// Tutor or co-tutor.
pub fn is_thesis_tutor(actor: &User, thesis: &Thesis) -> bool {
  thesis.tutor_id == Some(actor.user_id) || thesis.co_tutor_id == Some(actor.user_id)
}

/// Owner, tutor or co-tutor.
pub fn is_thesis_party(actor: &User, thesis: &Thesis) -> bool {
  is_thesis_owner(actor, thesis) || is_thesis_tutor(actor, thesis)
}

/// The committee of a hydrated defense, if the record's ids agree.
pub fn defense_committee(record: &DefenseRecord) -> Option<&Committee> {
  (record.defense.committee_id == record.committee.committee_id).then_some(&record.committee)
}

/// The thesis of a hydrated defense, if the record's ids agree.
pub fn defense_thesis(record: &DefenseRecord) -> Option<&Thesis> {
  (record.defense.thesis_id == record.thesis.thesis_id).then_some(&record.thesis)
}

/// Sits on the committee of the defense linked to this thesis.
///
/// Walks thesis → defense → committee; any missing or mismatched link means
/// "no".
pub fn sits_on_thesis_committee(actor: &User, record: &ThesisRecord) -> bool {
  let (Some(defense), Some(committee)) = (&record.defense, &record.committee) else {
    return false;
  };
  if record.thesis.defense_id != Some(defense.defense_id)
    || defense.committee_id != committee.committee_id
  {
    return false;
  }
  is_committee_member(actor, committee)
}

/// `target` is a student whose thesis `actor` tutors, co-tutors, or evaluates
/// as a committee member.
pub fn is_related_student(actor: &User, target: &UserRecord) -> bool {
  if !target.user.has_role(Role::Student) || actor.is(target.user.user_id) {
    return false;
  }
  target
    .theses
    .iter()
    .filter(|r| r.thesis.student_id == target.user.user_id)
    .any(|r| is_thesis_tutor(actor, &r.thesis) || sits_on_thesis_committee(actor, r))
}
