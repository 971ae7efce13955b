//! Bounded delegation of permissions from grantor to grantee

pub mod engine;
pub mod models;

pub use engine::DelegationEngine;
pub use models::{AssignmentOutcome, AssignmentRequest};
