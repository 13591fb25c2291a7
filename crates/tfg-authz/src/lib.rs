//! Authorization core for the capstone (TFG) tracker.
//!
//! Five authorizers (thesis, defense, committee, notification, user) answer
//! "may this actor do this to that resource". They are pure functions of the
//! actor, the action and an already-loaded resource: no I/O, no locking, no
//! errors. Anything not explicitly granted is denied.
//!
//! ```rust,ignore
//! use tfg_authz::{Action, Resource, action::ThesisAction};
//!
//! let record = directory.load_thesis(id).await?.unwrap();
//! let allowed = tfg_authz::authorize(
//!   Some(&actor),
//!   Action::Thesis(ThesisAction::UploadFile),
//!   Some(Resource::Thesis(&record)),
//! );
//! ```

pub mod action;
pub mod committee;
pub mod defense;
pub mod notification;
pub mod policy;
pub mod relation;
pub mod resource;
pub mod thesis;
pub mod user;

pub use action::{Action, Family, Scope};
pub use policy::{Clock, Policy, authorize, available_actions};
pub use resource::Resource;

#[cfg(test)]
mod tests;
