//! Data models for the contact desk.
//!
//! These models match the frontend TypeScript interfaces for seamless interoperability.

mod contact;
mod filters;
mod user;

pub use contact::*;
pub use filters::*;
pub use user::*;
