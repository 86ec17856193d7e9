//! Domain payloads stored in the typed platform caches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate numbers shown on the tutor dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_students: u32,
    pub active_sessions: u32,
    pub lessons_completed: u64,
    /// Mean exam score, 0 to 100
    pub average_score: f64,
}

/// One learner's position in their curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub learner_id: String,
    pub completed_lessons: u32,
    pub total_lessons: u32,
    pub last_activity: DateTime<Utc>,
}

impl LearnerProgress {
    /// Fraction of lessons completed, 0.0 for an empty curriculum.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_lessons == 0 {
            0.0
        } else {
            f64::from(self.completed_lessons.min(self.total_lessons)) / f64::from(self.total_lessons)
        }
    }
}
