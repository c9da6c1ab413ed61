//! Goal domain model.
//!
//! # Responsibility
//! - Define goals, their priority levels and the daily/fixed distinction.
//! - Provide the display ordering and progress projections consumed by
//!   every goal-facing screen.
//!
//! # Invariants
//! - A fixed goal's identity persists across days; only its `done` flag is
//!   reset at rollover.
//! - Display ordering is a pure function: incomplete before complete, then
//!   priority rank, stable within rank.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Urgency level attached to every goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    High,
    Medium,
    Low,
}

impl GoalPriority {
    /// Sort rank, lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Which goal list an operation targets.
///
/// Daily goals live and die with one calendar day; fixed goals persist and
/// only have their completion flag cleared at rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    Daily,
    Fixed,
}

/// One trackable goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable id, unique within its list.
    pub id: String,
    pub text: String,
    pub done: bool,
    pub priority: GoalPriority,
}

impl Goal {
    /// Creates an incomplete goal with a generated id.
    pub fn new(text: impl Into<String>, priority: GoalPriority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            done: false,
            priority,
        }
    }

    fn preset(id: &str, text: &str, priority: GoalPriority) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            done: false,
            priority,
        }
    }
}

/// The fixed-goal set seeded on first run, before the user edits it.
pub fn default_fixed_goals() -> Vec<Goal> {
    vec![
        Goal::preset("f1", "Take medication", GoalPriority::High),
        Goal::preset("f2", "Drink 2L of water", GoalPriority::Medium),
        Goal::preset("f3", "Do 30min of exercise", GoalPriority::Medium),
        Goal::preset("f4", "Be in bed before 11pm", GoalPriority::Low),
    ]
}

/// Orders goals for display: incomplete first, then by priority rank.
///
/// The sort is stable, so goals sharing completion state and priority keep
/// their insertion order. Pure function, no side effects.
pub fn sort_goals_for_display(goals: &[Goal]) -> Vec<Goal> {
    let mut sorted = goals.to_vec();
    sorted.sort_by_key(|goal| (goal.done, goal.priority.rank()));
    sorted
}

/// Completion ratio across one or more goal lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub total: u32,
    pub completed: u32,
}

impl GoalProgress {
    /// Rounded completion percentage; zero when no goals exist.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((f64::from(self.completed) / f64::from(self.total)) * 100.0).round() as u32
    }
}

/// Combined progress over the fixed and daily lists of one day.
pub fn goal_progress(fixed: &[Goal], daily: &[Goal]) -> GoalProgress {
    let completed = fixed.iter().filter(|goal| goal.done).count()
        + daily.iter().filter(|goal| goal.done).count();
    GoalProgress {
        total: (fixed.len() + daily.len()) as u32,
        completed: completed as u32,
    }
}
