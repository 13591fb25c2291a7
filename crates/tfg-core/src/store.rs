//! The `Directory` trait: the persistence collaborator of the authorization
//! core.
//!
//! The trait is implemented by storage backends (e.g. `tfg-store-sqlite`).
//! Callers load hydrated records through it, then hand them to the pure
//! decision functions in `tfg-authz`.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  committee::{Committee, NewCommittee},
  defense::{Defense, DefenseState, NewDefense},
  notification::{NewNotification, Notification},
  record::{DefenseRecord, ThesisRecord, UserRecord},
  role::RoleSet,
  thesis::{NewThesis, Thesis, ThesisState},
  user::{NewUser, User},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for the schedule-conflict lookups.
#[derive(Debug, Clone)]
pub struct SlotQuery {
  pub at:             DateTime<Utc>,
  /// Any non-cancelled defense within `at ± window_minutes` collides.
  pub window_minutes: u32,
  /// Ignore this defense (used when rescheduling it).
  pub exclude:        Option<Uuid>,
}

impl SlotQuery {
  pub fn new(at: DateTime<Utc>) -> Self {
    Self {
      at,
      window_minutes: crate::defense::DEFAULT_DURATION_MINUTES,
      exclude: None,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a directory backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes. Consistency of concurrent state changes (two members
/// completing the same defense) is the backend's job, not the caller's.
pub trait Directory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a user with the theses they own as a student.
  fn load_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<UserRecord>, Self::Error>> + Send + '_;

  fn set_user_roles(
    &self,
    id: Uuid,
    roles: RoleSet,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn set_user_active(
    &self,
    id: Uuid,
    active: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Number of active accounts holding the admin role.
  fn count_active_admins(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Committees ────────────────────────────────────────────────────────

  fn add_committee(
    &self,
    input: NewCommittee,
  ) -> impl Future<Output = Result<Committee, Self::Error>> + Send + '_;

  fn get_committee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Committee>, Self::Error>> + Send + '_;

  /// The first non-cancelled defense of `committee_id` colliding with `slot`.
  fn find_committee_conflict<'a>(
    &'a self,
    committee_id: Uuid,
    slot: &'a SlotQuery,
  ) -> impl Future<Output = Result<Option<Defense>, Self::Error>> + Send + 'a;

  /// The first non-cancelled defense in `classroom` colliding with `slot`.
  fn find_classroom_conflict<'a>(
    &'a self,
    classroom: &'a str,
    slot: &'a SlotQuery,
  ) -> impl Future<Output = Result<Option<Defense>, Self::Error>> + Send + 'a;

  // ── Theses ────────────────────────────────────────────────────────────

  fn add_thesis(
    &self,
    input: NewThesis,
  ) -> impl Future<Output = Result<Thesis, Self::Error>> + Send + '_;

  /// Retrieve a thesis with its defense and committee. Returns `None` if not
  /// found.
  fn load_thesis(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ThesisRecord>, Self::Error>> + Send + '_;

  fn set_thesis_state(
    &self,
    id: Uuid,
    state: ThesisState,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Defenses ──────────────────────────────────────────────────────────

  /// Schedule a defense and link it to its thesis.
  fn add_defense(
    &self,
    input: NewDefense,
  ) -> impl Future<Output = Result<Defense, Self::Error>> + Send + '_;

  fn load_defense(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DefenseRecord>, Self::Error>> + Send + '_;

  fn set_defense_state(
    &self,
    id: Uuid,
    state: DefenseState,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn mark_certificate_generated(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  fn add_notification(
    &self,
    input: NewNotification,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + '_;

  fn get_notification(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Notification>, Self::Error>> + Send + '_;

  fn mark_notification_read(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
