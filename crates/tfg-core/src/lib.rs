//! Core types and trait definitions for the capstone (TFG) tracker.
//!
//! This crate has no database or transport dependencies. It holds
//! the entities that the authorization core reads and the [`store::Directory`]
//! abstraction that persistence backends implement.

// `Directory` spells out `Send` futures; backends implement it with `async fn`.
#![allow(async_fn_in_trait)]

pub mod committee;
pub mod defense;
pub mod error;
pub mod notification;
pub mod record;
pub mod role;
pub mod store;
pub mod thesis;
pub mod user;

pub use error::{Error, Result};
