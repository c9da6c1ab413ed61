//! Core domain models.
//!
//! # Responsibility
//! - Define the canonical record shapes shared by storage, services and
//!   read projections.
//! - Keep pure, side-effect-free invariant helpers next to their models.

pub mod date_key;
pub mod goal;
pub mod history;
pub mod record;
