//! Core use-case services.
//!
//! # Responsibility
//! - Run the once-per-load rollover transition.
//! - Own the in-memory snapshot and the save reconciler.
//! - Orchestrate repository calls into the APIs the UI layer consumes.

pub mod day_state;
pub mod projector;
pub mod rollover;
pub mod tracker_service;
