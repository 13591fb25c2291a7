//! Thesis (TFG) permissions.
//!
//! Most rules hinge on whether the thesis is still editable, i.e. in draft or
//! under review. Clauses are disjunctive: the first one that grants wins.

use tfg_core::{record::ThesisRecord, role::Role, thesis::ThesisState, user::User};

use crate::{
  action::ThesisAction,
  relation::{is_thesis_owner, is_thesis_tutor, sits_on_thesis_committee},
};

pub fn authorize(actor: &User, action: ThesisAction, record: Option<&ThesisRecord>) -> bool {
  match (action, record) {
    (ThesisAction::Create, _) => can_create(actor),
    (_, None) => false,
    (_, Some(_)) if actor.is_admin() => true,
    (ThesisAction::View, Some(r)) => can_view(actor, r),
    (ThesisAction::Edit, Some(r)) => can_edit(actor, r),
    (ThesisAction::Delete, Some(r)) => can_delete(actor, r),
    (ThesisAction::UpdateState, Some(r)) => can_update_state(actor, r),
    (ThesisAction::UploadFile, Some(r)) => can_upload(actor, r),
    (ThesisAction::DownloadFile, Some(r)) => can_download(actor, r),
  }
}

/// Students open new theses.
pub fn can_create(actor: &User) -> bool {
  actor.is_admin() || actor.has_role(Role::Student)
}

pub fn can_view(actor: &User, record: &ThesisRecord) -> bool {
  let thesis = &record.thesis;
  actor.is_admin()
    || is_thesis_owner(actor, thesis)
    || is_thesis_tutor(actor, thesis)
    || (actor.roles.is_professor_family() && sits_on_thesis_committee(actor, record))
}

pub fn can_edit(actor: &User, record: &ThesisRecord) -> bool {
  let thesis = &record.thesis;
  actor.is_admin()
    || (is_thesis_owner(actor, thesis) && thesis.is_editable())
    || (is_thesis_tutor(actor, thesis) && actor.has_role(Role::Professor))
}

/// Owners may only discard drafts.
pub fn can_delete(actor: &User, record: &ThesisRecord) -> bool {
  let thesis = &record.thesis;
  actor.is_admin() || (is_thesis_owner(actor, thesis) && thesis.state == ThesisState::Draft)
}

pub fn can_update_state(actor: &User, record: &ThesisRecord) -> bool {
  if actor.is_admin() {
    return true;
  }
  if !actor.roles.is_professor_family() {
    return false;
  }
  is_thesis_tutor(actor, &record.thesis)
    || (actor.has_role(Role::CommitteePresident)
      && record.thesis.state == ThesisState::Approved
      && sits_on_thesis_committee(actor, record))
}

pub fn can_upload(actor: &User, record: &ThesisRecord) -> bool {
  let thesis = &record.thesis;
  actor.is_admin() || (is_thesis_owner(actor, thesis) && thesis.is_editable())
}

/// Download implies view.
pub fn can_download(actor: &User, record: &ThesisRecord) -> bool { can_view(actor, record) }

/// Whether `actor` may move the thesis to `to`.
///
/// The review state machine must allow the move first. Then: the owner
/// submits a draft, a tutor or co-tutor sends it back for changes, the tutor
/// approves it, and a committee president seated on its committee marks it
/// defended. Administrators may make any move the state machine allows.
pub fn can_transition(actor: &User, record: &ThesisRecord, to: ThesisState) -> bool {
  let thesis = &record.thesis;
  if !thesis.state.can_transition_to(to) {
    return false;
  }
  if actor.is_admin() {
    return true;
  }
  match (thesis.state, to) {
    (ThesisState::Draft, ThesisState::UnderReview) => is_thesis_owner(actor, thesis),
    (ThesisState::UnderReview, ThesisState::Draft) => is_thesis_tutor(actor, thesis),
    (ThesisState::UnderReview, ThesisState::Approved) => {
      thesis.tutor_id == Some(actor.user_id)
    }
    (ThesisState::Approved, ThesisState::Defended) => {
      actor.has_role(Role::CommitteePresident) && sits_on_thesis_committee(actor, record)
    }
    _ => false,
  }
}
