//! Role tags and the set type that actors carry.
//!
//! Roles are capability tags, not a hierarchy: a professor may also hold the
//! committee-president tag, and an administrator may also be a professor.

use std::{collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::Error;

// ─── Role ────────────────────────────────────────────────────────────────────

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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
  Admin,
  Professor,
  CommitteePresident,
  Student,
}

impl Role {
  /// Parse a role tag, mapping failures onto the crate error.
  pub fn parse(s: &str) -> crate::Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownRole(s.to_owned()))
  }
}

// ─── RoleSet ─────────────────────────────────────────────────────────────────

/// The roles held by one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
  pub fn new() -> Self { Self::default() }

  pub fn contains(&self, role: Role) -> bool { self.0.contains(&role) }

  /// Returns `true` if the role was not already present.
  pub fn insert(&mut self, role: Role) -> bool { self.0.insert(role) }

  /// Returns `true` if the role was present.
  pub fn remove(&mut self, role: Role) -> bool { self.0.remove(&role) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
    self.0.iter().copied()
  }

  pub fn is_admin(&self) -> bool { self.contains(Role::Admin) }

  /// Professors and committee presidents.
  pub fn is_professor_family(&self) -> bool {
    self.contains(Role::Professor) || self.contains(Role::CommitteePresident)
  }
}

impl FromIterator<Role> for RoleSet {
  fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
  fn from(roles: [Role; N]) -> Self { roles.into_iter().collect() }
}
