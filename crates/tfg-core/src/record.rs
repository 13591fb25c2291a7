//! Hydrated records: an entity together with the related entities that
//! authorization needs, loaded by id.
//!
//! Authorizers never follow references themselves; whoever loads a resource
//! (usually a [`crate::store::Directory`]) resolves its associations up front.

use serde::{Deserialize, Serialize};

use crate::{committee::Committee, defense::Defense, thesis::Thesis, user::User};

/// A thesis with its linked defense and that defense's committee, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesisRecord {
  pub thesis:    Thesis,
  pub defense:   Option<Defense>,
  pub committee: Option<Committee>,
}

impl ThesisRecord {
  /// A thesis with no defense scheduled yet.
  pub fn undefended(thesis: Thesis) -> Self {
    Self { thesis, defense: None, committee: None }
  }
}

/// A defense with its thesis and committee. Scheduled defenses always have
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseRecord {
  pub defense:   Defense,
  pub thesis:    Thesis,
  pub committee: Committee,
}

impl DefenseRecord {
  /// The same defense seen from its thesis.
  pub fn to_thesis_record(&self) -> ThesisRecord {
    ThesisRecord {
      thesis:    self.thesis.clone(),
      defense:   Some(self.defense.clone()),
      committee: Some(self.committee.clone()),
    }
  }
}

/// A user together with the theses they own as a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
  pub user:   User,
  #[serde(default)]
  pub theses: Vec<ThesisRecord>,
}

impl UserRecord {
  /// A user with no thesis history attached.
  pub fn bare(user: User) -> Self { Self { user, theses: Vec::new() } }
}
