//! User accounts, the actors that the authorization core decides about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::role::{Role, RoleSet};

/// An authenticated (or authenticatable) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:      Uuid,
  pub email:        String,
  pub display_name: String,
  pub roles:        RoleSet,
  /// Inactive accounts are still evaluated by the authorizers; only email
  /// eligibility looks at this flag.
  pub is_active:    bool,
  pub created_at:   DateTime<Utc>,
}

impl User {
  pub fn has_role(&self, role: Role) -> bool { self.roles.contains(role) }

  pub fn is_admin(&self) -> bool { self.roles.is_admin() }

  /// Identity comparison by id.
  pub fn is(&self, user_id: Uuid) -> bool { self.user_id == user_id }
}

/// Input to [`crate::store::Directory::add_user`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
  pub email:        String,
  pub display_name: String,
  pub roles:        RoleSet,
  #[serde(default = "default_active")]
  pub is_active:    bool,
}

fn default_active() -> bool { true }

impl NewUser {
  pub fn new(email: impl Into<String>, roles: impl Into<RoleSet>) -> Self {
    let email = email.into();
    Self {
      display_name: email.clone(),
      email,
      roles: roles.into(),
      is_active: true,
    }
  }
}

// ─── Editable fields ─────────────────────────────────────────────────────────

/// Profile fields a caller may be allowed to change.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserField {
  Email,
  Name,
  Surname,
  Dni,
  Phone,
  University,
  Department,
  Specialty,
  Roles,
  IsActive,
  Password,
}

