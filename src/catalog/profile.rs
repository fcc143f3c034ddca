use crate::model::{ProgressRecord, ProgressStatus, QuizAttempt, UserProfile};

pub const RECENT_ACTIVITY_LIMIT: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileStats {
    /// Progress rows of this user, one per lesson touched.
    pub courses: usize,
    pub quizzes: usize,
    pub completed: usize,
    pub total: usize,
    /// Completed share of every learner's progress rows, in percent.
    pub avg_completion: f64,
}

impl ProfileStats {
    pub fn compute(
        own: &[ProgressRecord],
        all_statuses: &[ProgressStatus],
        quiz_attempts: usize,
    ) -> Self {
        let completed = own
            .iter()
            .filter(|r| r.status == ProgressStatus::Completed)
            .count();
        let completed_all = all_statuses
            .iter()
            .filter(|s| **s == ProgressStatus::Completed)
            .count();
        let avg_completion = if all_statuses.is_empty() {
            0.0
        } else {
            completed_all as f64 / all_statuses.len() as f64 * 100.0
        };
        Self {
            courses: own.len(),
            quizzes: quiz_attempts,
            completed,
            total: own.len(),
            avg_completion,
        }
    }

    pub fn own_completion(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// The "you vs. average" pair, both rounded to whole percent.
    pub fn you_vs_average(&self) -> (u32, u32) {
        (
            self.own_completion().round() as u32,
            self.avg_completion.round() as u32,
        )
    }
}

/// Everything the profile screen shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileSummary {
    pub profile: Option<UserProfile>,
    pub stats: ProfileStats,
    pub recent_quizzes: Vec<QuizAttempt>,
    pub recent_lessons: Vec<ProgressRecord>,
}
