//! The top-level dispatch: `(actor, action, resource) → allow | deny`.
//!
//! Decisions are total: a missing actor, a missing instance for an instance
//! action, or an action from another family than the resource all deny.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tfg_core::user::User;
use tracing::{Span, field, instrument};

use crate::{
  action::{Action, Scope},
  committee, defense, notification,
  resource::Resource,
  thesis, user,
};

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of "now" for time-dependent rules.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
  #[default]
  System,
  Fixed(DateTime<Utc>),
}

impl Clock {
  pub fn now(self) -> DateTime<Utc> {
    match self {
      Self::System => Utc::now(),
      Self::Fixed(at) => at,
    }
  }
}

// ─── Policy ──────────────────────────────────────────────────────────────────

/// The policy engine. Stateless apart from its clock; cheap to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
  clock: Clock,
}

impl Policy {
  /// A policy reading the system clock.
  pub fn new() -> Self { Self::default() }

  /// A policy evaluated as if the current time were `now`.
  pub fn at(now: DateTime<Utc>) -> Self { Self { clock: Clock::Fixed(now) } }

  /// Decide whether `actor` may perform `action` on `resource`.
  ///
  /// `resource` is `None` for collection-level checks.
  #[instrument(
    level = "debug",
    skip_all,
    fields(
      action = %action,
      actor_id = field::Empty,
      resource_id = field::Empty,
      granted = field::Empty,
    )
  )]
  pub fn authorize(
    &self,
    actor: Option<&User>,
    action: Action,
    resource: Option<Resource<'_>>,
  ) -> bool {
    let span = Span::current();
    if let Some(r) = &resource {
      span.record("resource_id", field::display(r.id()));
    }

    let granted = match actor {
      Some(actor) => {
        span.record("actor_id", field::display(actor.user_id));
        self.decide(actor, action, resource)
      }
      None => false,
    };

    span.record("granted", granted);
    tracing::debug!(granted, "authorization decision");
    granted
  }

  fn decide(&self, actor: &User, action: Action, resource: Option<Resource<'_>>) -> bool {
    if action.scope() == Scope::Collection {
      return match action {
        Action::Thesis(a) => thesis::authorize(actor, a, None),
        Action::Defense(a) => defense::authorize(actor, a, None, self.clock.now()),
        Action::Committee(a) => committee::authorize(actor, a, None),
        Action::Notification(a) => notification::authorize(actor, a, None),
        Action::User(a) => user::authorize(actor, a, None),
      };
    }

    match (action, resource) {
      (Action::Thesis(a), None) => thesis::authorize(actor, a, None),
      (Action::Thesis(a), Some(Resource::Thesis(r))) => thesis::authorize(actor, a, Some(r)),
      (Action::Defense(a), None) => defense::authorize(actor, a, None, self.clock.now()),
      (Action::Defense(a), Some(Resource::Defense(r))) => {
        defense::authorize(actor, a, Some(r), self.clock.now())
      }
      (Action::Committee(a), None) => committee::authorize(actor, a, None),
      (Action::Committee(a), Some(Resource::Committee(c))) => {
        committee::authorize(actor, a, Some(c))
      }
      (Action::Notification(a), None) => notification::authorize(actor, a, None),
      (Action::Notification(a), Some(Resource::Notification(n))) => {
        notification::authorize(actor, a, Some(n))
      }
      (Action::User(a), None) => user::authorize(actor, a, None),
      (Action::User(a), Some(Resource::User(t))) => user::authorize(actor, a, Some(t)),
      // The resource belongs to another family.
      (_, Some(_)) => false,
    }
  }

  /// Every action `actor` may take.
  ///
  /// With a resource, the candidates are the actions of its family. Without
  /// one, they are the collection-level actions of every family.
  pub fn available_actions(
    &self,
    actor: Option<&User>,
    resource: Option<Resource<'_>>,
  ) -> BTreeSet<Action> {
    let candidates: Box<dyn Iterator<Item = Action>> = match &resource {
      Some(r) => Action::of_family(r.family()),
      None => Box::new(Action::all().filter(|a| a.scope() != Scope::Instance)),
    };
    candidates
      .filter(|&a| self.authorize(actor, a, resource))
      .collect()
  }
}

/// [`Policy::authorize`] against the system clock.
pub fn authorize(actor: Option<&User>, action: Action, resource: Option<Resource<'_>>) -> bool {
  Policy::new().authorize(actor, action, resource)
}

/// [`Policy::available_actions`] against the system clock.
pub fn available_actions(actor: Option<&User>, resource: Option<Resource<'_>>) -> BTreeSet<Action> {
  Policy::new().available_actions(actor, resource)
}
