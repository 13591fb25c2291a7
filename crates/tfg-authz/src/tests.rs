//! Decision tests for every authorizer, driven through the public policy.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tfg_core::{
  committee::{Committee, Seat},
  defense::{Defense, DefenseState},
  notification::{Notification, NotificationKind, Priority},
  record::{DefenseRecord, ThesisRecord, UserRecord},
  role::{Role, RoleSet},
  thesis::{Thesis, ThesisState},
  user::{User, UserField},
};
use uuid::Uuid;

use crate::{
  Action, Policy, Resource,
  action::{
    CommitteeAction, DefenseAction, Family, NotificationAction, ThesisAction, UserAction,
  },
  committee, defense,
  defense::DefenseRole,
  notification, relation, thesis, user,
  user::AccessLevel,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap() }

fn person(roles: impl Into<RoleSet>) -> User {
  let user_id = Uuid::new_v4();
  User {
    user_id,
    email: format!("{user_id}@uni.example"),
    display_name: "Someone".into(),
    roles: roles.into(),
    is_active: true,
    created_at: now(),
  }
}

/// A small department: a student with a thesis, tutor and co-tutor, a
/// committee of three, an unrelated professor and an administrator.
struct World {
  admin:     User,
  student:   User,
  tutor:     User,
  co_tutor:  User,
  president: User,
  secretary: User,
  member:    User,
  outsider:  User,
  committee: Committee,
}

impl World {
  fn new() -> Self {
    let president = person([Role::Professor, Role::CommitteePresident]);
    let secretary = person([Role::Professor]);
    let member = person([Role::Professor]);
    let committee = Committee {
      committee_id: Uuid::new_v4(),
      name:         "Tribunal A".into(),
      president_id: president.user_id,
      secretary_id: secretary.user_id,
      member_id:    member.user_id,
      is_active:    true,
    };
    Self {
      admin: person([Role::Admin]),
      student: person([Role::Student]),
      tutor: person([Role::Professor]),
      co_tutor: person([Role::Professor]),
      president,
      secretary,
      member,
      outsider: person([Role::Professor]),
      committee,
    }
  }

  fn thesis(&self, state: ThesisState) -> Thesis {
    Thesis {
      thesis_id:   Uuid::new_v4(),
      title:       "Distributed caches".into(),
      state,
      student_id:  self.student.user_id,
      tutor_id:    Some(self.tutor.user_id),
      co_tutor_id: Some(self.co_tutor.user_id),
      defense_id:  None,
      created_at:  now(),
    }
  }

  fn thesis_record(&self, state: ThesisState) -> ThesisRecord {
    ThesisRecord::undefended(self.thesis(state))
  }

  fn defense_record(&self, state: DefenseState, scheduled_at: DateTime<Utc>) -> DefenseRecord {
    let mut thesis = self.thesis(ThesisState::Approved);
    let defense = Defense {
      defense_id: Uuid::new_v4(),
      thesis_id: thesis.thesis_id,
      committee_id: self.committee.committee_id,
      state,
      scheduled_at,
      classroom: "A-101".into(),
      duration_minutes: 30,
      certificate_generated: false,
    };
    thesis.defense_id = Some(defense.defense_id);
    DefenseRecord { defense, thesis, committee: self.committee.clone() }
  }

  /// An approved thesis with a scheduled defense before this committee.
  fn defended_thesis_record(&self) -> ThesisRecord {
    self
      .defense_record(DefenseState::Scheduled, now() + Duration::days(7))
      .to_thesis_record()
  }

  fn notification_for(&self, owner: &User, kind: NotificationKind) -> Notification {
    Notification {
      notification_id: Uuid::new_v4(),
      user_id: owner.user_id,
      kind,
      title: "Heads up".into(),
      message: String::new(),
      is_read: false,
      created_at: now(),
    }
  }
}

fn allows(actor: &User, action: impl Into<Action>, resource: Option<Resource<'_>>) -> bool {
  Policy::at(now()).authorize(Some(actor), action.into(), resource)
}

// ─── Policy-wide ─────────────────────────────────────────────────────────────

#[test]
fn unauthenticated_actor_is_always_denied() {
  let w = World::new();
  let record = w.thesis_record(ThesisState::Draft);
  let policy = Policy::at(now());
  for action in Action::all() {
    assert!(!policy.authorize(None, action, Some(Resource::Thesis(&record))));
    assert!(!policy.authorize(None, action, None));
  }
}

#[test]
fn admin_is_granted_everything_outside_the_lockout_list() {
  let w = World::new();
  let thesis = w.thesis_record(ThesisState::Defended);
  let defense = w.defense_record(DefenseState::Cancelled, now() - Duration::days(3));
  let note = w.notification_for(&w.student, NotificationKind::Info);
  let target = UserRecord::bare(w.student.clone());

  let resources = [
    Resource::Thesis(&thesis),
    Resource::Defense(&defense),
    Resource::Committee(&w.committee),
    Resource::Notification(&note),
    Resource::User(&target),
  ];
  for resource in resources {
    for action in Action::of_family(resource.family()) {
      assert!(
        allows(&w.admin, action, Some(resource)),
        "admin denied {action} on {:?}",
        resource.family()
      );
    }
  }
}

#[test]
fn family_mismatch_is_denied() {
  let w = World::new();
  let record = w.thesis_record(ThesisState::Draft);
  assert!(!allows(&w.admin, DefenseAction::View, Some(Resource::Thesis(&record))));
  assert!(!allows(&w.student, UserAction::View, Some(Resource::Thesis(&record))));
  assert!(!allows(&w.admin, CommitteeAction::Edit, Some(Resource::Thesis(&record))));
}

#[test]
fn instance_action_without_instance_is_denied() {
  let w = World::new();
  assert!(!allows(&w.admin, ThesisAction::Edit, None));
  assert!(!allows(&w.admin, DefenseAction::View, None));
  assert!(!allows(&w.admin, CommitteeAction::Delete, None));
  assert!(!allows(&w.student, NotificationAction::MarkRead, None));
  assert!(!allows(&w.admin, UserAction::ToggleStatus, None));
}

#[test]
fn collection_actions_ignore_a_supplied_instance() {
  let w = World::new();
  let record = w.thesis_record(ThesisState::Draft);
  assert!(allows(&w.student, ThesisAction::Create, Some(Resource::Thesis(&record))));
  assert!(!allows(&w.tutor, ThesisAction::Create, Some(Resource::Thesis(&record))));
  assert!(allows(&w.president, CommitteeAction::Create, None));
}

#[test]
fn available_actions_for_an_owner_on_a_draft() {
  let w = World::new();
  let record = w.thesis_record(ThesisState::Draft);
  let actions =
    Policy::at(now()).available_actions(Some(&w.student), Some(Resource::Thesis(&record)));
  let expected: Vec<Action> = vec![
    ThesisAction::View.into(),
    ThesisAction::Edit.into(),
    ThesisAction::Delete.into(),
    ThesisAction::UploadFile.into(),
    ThesisAction::DownloadFile.into(),
    ThesisAction::Create.into(),
  ];
  assert_eq!(actions, expected.into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn available_collection_actions_for_a_student() {
  let w = World::new();
  let actions = Policy::at(now()).available_actions(Some(&w.student), None);
  assert!(actions.contains(&Action::from(ThesisAction::Create)));
  assert!(actions.contains(&Action::from(NotificationAction::View)));
  assert!(actions.contains(&Action::from(NotificationAction::CleanupOwn)));
  assert!(!actions.contains(&Action::from(NotificationAction::Broadcast)));
  assert!(!actions.contains(&Action::from(UserAction::Create)));
  assert!(actions.iter().all(|a| a.family() != Family::Defense));
}

// ─── Thesis ──────────────────────────────────────────────────────────────────

#[test]
fn download_matches_view_for_everyone() {
  let w = World::new();
  let records = [
    w.thesis_record(ThesisState::Draft),
    w.thesis_record(ThesisState::Approved),
    w.defended_thesis_record(),
  ];
  let actors = [
    &w.admin, &w.student, &w.tutor, &w.co_tutor, &w.president, &w.secretary, &w.member,
    &w.outsider,
  ];
  for record in &records {
    for actor in actors {
      assert_eq!(
        allows(actor, ThesisAction::View, Some(Resource::Thesis(record))),
        allows(actor, ThesisAction::DownloadFile, Some(Resource::Thesis(record))),
      );
    }
  }
}

#[test]
fn committee_professors_see_the_thesis_they_evaluate() {
  let w = World::new();
  let record = w.defended_thesis_record();
  assert!(thesis::can_view(&w.secretary, &record));
  assert!(thesis::can_view(&w.member, &record));
  assert!(!thesis::can_view(&w.outsider, &record));

  let undefended = w.thesis_record(ThesisState::Approved);
  assert!(!thesis::can_view(&w.secretary, &undefended));
}

#[test]
fn owner_uploads_only_while_editable() {
  let w = World::new();
  for (state, expected) in [
    (ThesisState::Draft, true),
    (ThesisState::UnderReview, true),
    (ThesisState::Approved, false),
    (ThesisState::Defended, false),
  ] {
    let record = w.thesis_record(state);
    assert_eq!(thesis::can_upload(&w.student, &record), expected, "{state}");
    assert!(!thesis::can_upload(&w.tutor, &record));
  }
}

#[test]
fn owner_deletes_only_drafts() {
  let w = World::new();
  assert!(thesis::can_delete(&w.student, &w.thesis_record(ThesisState::Draft)));
  assert!(!thesis::can_delete(&w.student, &w.thesis_record(ThesisState::UnderReview)));
  assert!(!thesis::can_delete(&w.tutor, &w.thesis_record(ThesisState::Draft)));
}

#[test]
fn tutor_edits_in_any_state_but_owner_does_not() {
  let w = World::new();
  let approved = w.thesis_record(ThesisState::Approved);
  assert!(thesis::can_edit(&w.tutor, &approved));
  assert!(thesis::can_edit(&w.co_tutor, &approved));
  assert!(!thesis::can_edit(&w.student, &approved));
  assert!(thesis::can_edit(&w.student, &w.thesis_record(ThesisState::UnderReview)));
}

#[test]
fn state_updates_by_tutor_or_seated_president_on_approved() {
  let w = World::new();
  let record = w.defended_thesis_record();
  assert!(thesis::can_update_state(&w.tutor, &record));
  assert!(thesis::can_update_state(&w.president, &record));
  assert!(!thesis::can_update_state(&w.secretary, &record));
  assert!(!thesis::can_update_state(&w.student, &record));

  let mut under_review = record.clone();
  under_review.thesis.state = ThesisState::UnderReview;
  assert!(!thesis::can_update_state(&w.president, &under_review));
}

#[test]
fn transitions_follow_the_review_workflow() {
  let w = World::new();
  let draft = w.thesis_record(ThesisState::Draft);
  assert!(thesis::can_transition(&w.student, &draft, ThesisState::UnderReview));
  assert!(!thesis::can_transition(&w.tutor, &draft, ThesisState::UnderReview));
  assert!(!thesis::can_transition(&w.admin, &draft, ThesisState::Approved));

  let review = w.thesis_record(ThesisState::UnderReview);
  assert!(thesis::can_transition(&w.co_tutor, &review, ThesisState::Draft));
  assert!(thesis::can_transition(&w.tutor, &review, ThesisState::Approved));
  assert!(!thesis::can_transition(&w.co_tutor, &review, ThesisState::Approved));
  assert!(!thesis::can_transition(&w.student, &review, ThesisState::Approved));

  let approved = w.defended_thesis_record();
  assert!(thesis::can_transition(&w.president, &approved, ThesisState::Defended));
  assert!(!thesis::can_transition(&w.member, &approved, ThesisState::Defended));
  assert!(!thesis::can_transition(&w.tutor, &approved, ThesisState::Defended));
}

// ─── Defense ─────────────────────────────────────────────────────────────────

#[test]
fn only_seat_holders_grade_and_only_once_completed() {
  let w = World::new();
  let scheduled = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  let completed = w.defense_record(DefenseState::Completed, now() - Duration::days(1));

  for seat in [&w.president, &w.secretary, &w.member] {
    assert!(!allows(seat, DefenseAction::Grade, Some(Resource::Defense(&scheduled))));
    assert!(allows(seat, DefenseAction::Grade, Some(Resource::Defense(&completed))));
  }
  for other in [&w.student, &w.tutor, &w.outsider] {
    assert!(!allows(other, DefenseAction::Grade, Some(Resource::Defense(&completed))));
  }
  assert!(!defense::can_grade(&w.admin, &scheduled));
}

#[test]
fn past_defenses_cannot_be_deleted_by_the_president() {
  let w = World::new();
  let yesterday = w.defense_record(DefenseState::Scheduled, now() - Duration::days(1));
  let tomorrow = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  let policy = Policy::at(now());

  let delete = Action::Defense(DefenseAction::Delete);
  assert!(!policy.authorize(Some(&w.president), delete, Some(Resource::Defense(&yesterday))));
  assert!(policy.authorize(Some(&w.president), delete, Some(Resource::Defense(&tomorrow))));
  assert!(!policy.authorize(Some(&w.secretary), delete, Some(Resource::Defense(&tomorrow))));
  assert!(policy.authorize(Some(&w.admin), delete, Some(Resource::Defense(&yesterday))));

  let later = Policy::at(now() + Duration::days(2));
  assert!(!later.authorize(Some(&w.president), delete, Some(Resource::Defense(&tomorrow))));
}

#[test]
fn certificate_visible_after_generation() {
  let w = World::new();
  let mut record = w.defense_record(DefenseState::Completed, now() - Duration::days(1));
  assert!(!allows(&w.student, DefenseAction::ViewCertificate, Some((&record).into())));
  assert!(allows(&w.student, DefenseAction::ViewCertificateInfo, Some((&record).into())));

  record.defense.certificate_generated = true;
  let r = Some(Resource::Defense(&record));
  assert!(allows(&w.student, DefenseAction::ViewCertificate, r));
  assert!(allows(&w.member, DefenseAction::ViewCertificate, r));
  assert!(!allows(&w.outsider, DefenseAction::ViewCertificate, r));
}

#[test]
fn president_edits_only_while_scheduled() {
  let w = World::new();
  let scheduled = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  let completed = w.defense_record(DefenseState::Completed, now() - Duration::days(1));
  assert!(defense::can_edit(&w.president, &scheduled));
  assert!(!defense::can_edit(&w.president, &completed));
  assert!(!defense::can_edit(&w.secretary, &scheduled));
}

#[test]
fn president_seat_without_the_role_does_not_act_as_president() {
  let w = World::new();
  let mut record = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  record.committee.president_id = w.secretary.user_id;
  record.committee.secretary_id = w.outsider.user_id;
  assert!(!defense::can_edit(&w.secretary, &record));
  assert!(!defense::can_schedule(&w.secretary, &record));
  assert!(defense::can_view(&w.secretary, &record));
}

#[test]
fn state_management_by_seat_and_state() {
  let w = World::new();
  let scheduled = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  let completed = w.defense_record(DefenseState::Completed, now() - Duration::days(1));
  let cancelled = w.defense_record(DefenseState::Cancelled, now() - Duration::days(1));

  assert!(defense::can_manage_state(&w.member, &scheduled));
  assert!(defense::can_manage_state(&w.member, &completed));
  assert!(!defense::can_manage_state(&w.member, &cancelled));
  assert!(defense::can_manage_state(&w.president, &cancelled));
  assert!(!defense::can_manage_state(&w.tutor, &scheduled));
}

#[test]
fn role_of_prefers_seat_then_ownership_then_tutorship() {
  let w = World::new();
  let record = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  assert_eq!(defense::role_of(&w.president, &record), Some(DefenseRole::President));
  assert_eq!(defense::role_of(&w.secretary, &record), Some(DefenseRole::Secretary));
  assert_eq!(defense::role_of(&w.member, &record), Some(DefenseRole::Member));
  assert_eq!(defense::role_of(&w.student, &record), Some(DefenseRole::Student));
  assert_eq!(defense::role_of(&w.co_tutor, &record), Some(DefenseRole::Tutor));
  assert_eq!(defense::role_of(&w.outsider, &record), None);

  let mut overlap = record.clone();
  overlap.thesis.tutor_id = Some(w.member.user_id);
  assert_eq!(defense::role_of(&w.member, &overlap), Some(DefenseRole::Member));
}

#[test]
fn thesis_parties_share_defense_visibility() {
  let w = World::new();
  let record = w.defense_record(DefenseState::Scheduled, now() + Duration::days(1));
  for party in [&w.student, &w.tutor, &w.co_tutor] {
    assert!(relation::is_thesis_party(party, &record.thesis));
    assert!(defense::can_view(party, &record));
  }
  assert!(!relation::is_thesis_party(&w.member, &record.thesis));
  assert!(defense::can_view(&w.member, &record));
  assert!(!relation::is_thesis_party(&w.outsider, &record.thesis));
  assert!(!defense::can_view(&w.outsider, &record));
}

#[test]
fn mismatched_defense_links_grant_nothing() {
  let w = World::new();
  let mut record = w.defense_record(DefenseState::Completed, now() - Duration::days(1));
  record.defense.certificate_generated = true;
  record.committee.committee_id = Uuid::new_v4();

  assert_eq!(defense::role_of(&w.member, &record), None);
  assert!(!defense::can_grade(&w.member, &record));
  assert!(!defense::can_manage_state(&w.member, &record));
  assert!(!defense::can_edit(&w.president, &record));
  assert!(!defense::can_view(&w.secretary, &record));
  // The thesis link still holds.
  assert!(defense::can_view(&w.student, &record));

  record.thesis.thesis_id = Uuid::new_v4();
  assert!(!defense::can_view_certificate(&w.student, &record));
  assert_eq!(defense::role_of(&w.tutor, &record), None);
  assert!(defense::can_view(&w.admin, &record));
}

// ─── Committee ───────────────────────────────────────────────────────────────

#[test]
fn committee_membership_and_lifecycle() {
  let w = World::new();
  let c = Some(Resource::Committee(&w.committee));

  assert!(allows(&w.secretary, CommitteeAction::View, c));
  assert!(!allows(&w.outsider, CommitteeAction::View, c));
  assert!(allows(&w.president, CommitteeAction::Edit, c));
  assert!(allows(&w.president, CommitteeAction::ScheduleDefense, c));
  assert!(!allows(&w.member, CommitteeAction::Edit, c));
  assert!(allows(&w.member, CommitteeAction::ViewAvailability, c));

  for action in [
    CommitteeAction::Delete,
    CommitteeAction::ManageMembers,
    CommitteeAction::ToggleStatus,
  ] {
    assert!(!allows(&w.president, action, c));
    assert!(allows(&w.admin, action, c));
  }
}

#[test]
fn committee_role_and_availability() {
  let w = World::new();
  assert_eq!(committee::role_in_committee(&w.member, &w.committee), Some(Seat::Member));
  assert_eq!(committee::role_in_committee(&w.student, &w.committee), None);

  let booked = w.defense_record(DefenseState::Scheduled, now());
  assert!(committee::is_available(&w.committee, None));
  assert!(!committee::is_available(&w.committee, Some(&booked.defense)));

  let mut inactive = w.committee.clone();
  inactive.is_active = false;
  assert!(!committee::is_available(&inactive, None));
}

// ─── Notification ────────────────────────────────────────────────────────────

#[test]
fn notifications_belong_to_their_recipient() {
  let w = World::new();
  let note = w.notification_for(&w.student, NotificationKind::Comment);
  let n = Some(Resource::Notification(&note));

  assert!(allows(&w.student, NotificationAction::View, n));
  assert!(allows(&w.student, NotificationAction::MarkRead, n));
  assert!(allows(&w.student, NotificationAction::Delete, n));
  assert!(!allows(&w.student, NotificationAction::Edit, n));

  for action in [
    NotificationAction::View,
    NotificationAction::MarkRead,
    NotificationAction::Delete,
  ] {
    assert!(!allows(&w.tutor, action, n));
  }
}

#[test]
fn restricted_kinds_are_for_admins() {
  let w = World::new();
  assert!(notification::can_view_kind(&w.student, NotificationKind::Defense));
  assert!(!notification::can_view_kind(&w.president, NotificationKind::Audit));
  assert!(notification::can_view_kind(&w.admin, NotificationKind::Maintenance));
}

#[test]
fn priority_ceiling_follows_the_highest_role() {
  let w = World::new();
  assert_eq!(notification::max_priority(&w.admin), Priority::System);
  assert_eq!(notification::max_priority(&w.president), Priority::Critical);
  assert_eq!(notification::max_priority(&w.tutor), Priority::High);
  assert_eq!(notification::max_priority(&w.student), Priority::Normal);
}

#[test]
fn only_admins_create_notifications() {
  let w = World::new();
  assert!(notification::can_create_notifications(&w.admin));
  for actor in [&w.president, &w.tutor, &w.student] {
    assert!(!notification::can_create_notifications(actor));
  }
}

#[test]
fn email_needs_an_address_and_an_active_account() {
  let w = World::new();
  assert!(notification::can_receive_email(&w.student));

  let mut blank = w.student.clone();
  blank.email = "   ".into();
  assert!(!notification::can_receive_email(&blank));

  let mut inactive = w.student.clone();
  inactive.is_active = false;
  assert!(!notification::can_receive_email(&inactive));
}

// ─── User ────────────────────────────────────────────────────────────────────

#[test]
fn admins_cannot_lock_themselves_out() {
  let w = World::new();
  let me = UserRecord::bare(w.admin.clone());
  let other_admin = UserRecord::bare(person([Role::Admin]));
  let student = UserRecord::bare(w.student.clone());

  for action in [UserAction::Delete, UserAction::ToggleStatus, UserAction::ManageRoles] {
    assert!(!allows(&w.admin, action, Some(Resource::User(&me))), "{action}");
    assert!(allows(&w.admin, action, Some(Resource::User(&student))), "{action}");
  }
  assert!(allows(&w.admin, UserAction::Edit, Some(Resource::User(&me))));

  assert!(!user::can_delete(&w.admin, &other_admin.user));
  assert!(!user::can_manage_roles(&w.admin, &other_admin.user));
  assert!(user::can_toggle_status(&w.admin, &other_admin.user));
}

#[test]
fn users_manage_their_own_profile() {
  let w = World::new();
  let me = UserRecord::bare(w.tutor.clone());
  let u = Some(Resource::User(&me));
  assert!(allows(&w.tutor, UserAction::View, u));
  assert!(allows(&w.tutor, UserAction::Edit, u));
  assert!(allows(&w.tutor, UserAction::ChangePassword, u));
  assert!(!allows(&w.tutor, UserAction::Delete, u));
  assert!(!allows(&w.tutor, UserAction::ManageRoles, u));
  assert!(!allows(&w.student, UserAction::Edit, u));
}

#[test]
fn professors_view_related_students_only() {
  let w = World::new();
  let target = UserRecord {
    user:   w.student.clone(),
    theses: vec![w.defended_thesis_record()],
  };

  assert!(user::can_view(&w.tutor, &target));
  assert!(user::can_view(&w.member, &target));
  assert!(!user::can_view(&w.outsider, &target));
  assert_eq!(user::access_level(&target, &w.tutor), AccessLevel::RelatedStudent);
  assert_eq!(user::access_level(&target, &w.outsider), AccessLevel::None);

  // Without theses attached, the relation cannot be established.
  let bare = UserRecord::bare(w.student.clone());
  assert!(!user::can_view(&w.tutor, &bare));
}

#[test]
fn access_levels() {
  let w = World::new();
  let admin = UserRecord::bare(w.admin.clone());
  let student = UserRecord::bare(w.student.clone());
  assert_eq!(user::access_level(&admin, &w.admin), AccessLevel::AdminSelf);
  assert_eq!(user::access_level(&student, &w.admin), AccessLevel::AdminFull);
  assert_eq!(user::access_level(&student, &w.student), AccessLevel::Own);
  assert_eq!(AccessLevel::Own.to_string(), "self");
  assert_eq!(AccessLevel::AdminSelf.to_string(), "admin-self");
}

#[test]
fn editable_fields_by_relationship() {
  let w = World::new();
  let own = user::editable_fields(&w.student, &w.student);
  assert!(own.contains(&UserField::Phone));
  assert!(own.contains(&UserField::Password));
  assert!(!own.contains(&UserField::Email));
  assert!(!own.contains(&UserField::Roles));
  assert!(!own.contains(&UserField::IsActive));
  assert!(!own.contains(&UserField::Dni));

  let by_admin = user::editable_fields(&w.student, &w.admin);
  assert!(by_admin.contains(&UserField::Roles));
  assert!(by_admin.contains(&UserField::Email));

  assert!(user::editable_fields(&w.student, &w.tutor).is_empty());
}

#[test]
fn the_last_admin_keeps_the_admin_role() {
  let w = World::new();
  let from = RoleSet::from([Role::Admin, Role::Professor]);
  let to = RoleSet::from([Role::Professor]);

  assert!(!user::can_change_role(&from, &to, &w.admin, true, 1));
  assert!(user::can_change_role(&from, &to, &w.admin, true, 2));
  assert!(user::can_change_role(&to, &from, &w.admin, true, 1));
  assert!(!user::can_change_role(&to, &from, &w.tutor, true, 5));
}

#[test]
fn demoting_an_inactive_admin_leaves_the_active_ones() {
  let w = World::new();
  let from = RoleSet::from([Role::Admin]);
  let to = RoleSet::from([Role::Professor]);

  // The acting admin is the only active one; the target is dormant.
  assert!(user::can_change_role(&from, &to, &w.admin, false, 1));
  assert!(!user::can_change_role(&from, &to, &w.admin, false, 0));
}
