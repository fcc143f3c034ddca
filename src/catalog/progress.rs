use crate::model::{ProgressRecord, ProgressStatus};

/// Rounded share of `completed` in `total`; 0 for an empty total.
pub fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub status: ProgressStatus,
}

impl ProgressSummary {
    pub fn new(completed: usize, total: usize) -> Self {
        let status = if total > 0 && completed >= total {
            ProgressStatus::Completed
        } else if completed > 0 {
            ProgressStatus::InProgress
        } else {
            ProgressStatus::NotStarted
        };
        Self {
            completed,
            total,
            percent: percentage(completed, total),
            status,
        }
    }

    /// Summary over the lessons of one course. `records` may hold rows for
    /// other courses; only `lesson_ids` count.
    pub fn for_lessons<'a>(
        lesson_ids: impl IntoIterator<Item = &'a str>,
        records: &[ProgressRecord],
    ) -> Self {
        let mut total = 0;
        let mut completed = 0;
        let mut started = false;
        for id in lesson_ids {
            total += 1;
            match records.iter().find(|r| r.lesson_id == id).map(|r| r.status) {
                Some(ProgressStatus::Completed) => completed += 1,
                Some(ProgressStatus::InProgress) => started = true,
                _ => {}
            }
        }
        let mut summary = Self::new(completed, total);
        if started && summary.status == ProgressStatus::NotStarted {
            summary.status = ProgressStatus::InProgress;
        }
        summary
    }

    pub fn from_records(records: &[ProgressRecord]) -> Self {
        Self::for_lessons(records.iter().map(|r| r.lesson_id.as_str()), records)
    }

    pub fn label(&self) -> String {
        format!("{} of {} lessons", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(lesson: &str, status: ProgressStatus) -> ProgressRecord {
        ProgressRecord {
            lesson_id: lesson.to_string(),
            lesson_title: None,
            status,
            completion_percentage: 0.0,
            updated_at: String::new(),
        }
    }

    #[test]
    fn percentage_rounds_and_handles_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn status_follows_counts() {
        assert_eq!(ProgressSummary::new(0, 4).status, ProgressStatus::NotStarted);
        assert_eq!(ProgressSummary::new(1, 4).status, ProgressStatus::InProgress);
        assert_eq!(ProgressSummary::new(4, 4).status, ProgressStatus::Completed);
        assert_eq!(ProgressSummary::new(0, 0).status, ProgressStatus::NotStarted);
        assert_eq!(ProgressStatus::InProgress.label(), "In Progress");
    }

    #[test]
    fn course_summary_ignores_other_lessons() {
        let records = vec![
            rec("a", ProgressStatus::Completed),
            rec("b", ProgressStatus::InProgress),
            rec("z", ProgressStatus::Completed),
        ];
        let s = ProgressSummary::for_lessons(["a", "b", "c"], &records);
        assert_eq!((s.completed, s.total, s.percent), (1, 3, 33));
        assert_eq!(s.status, ProgressStatus::InProgress);
        assert_eq!(s.label(), "1 of 3 lessons");

        let s = ProgressSummary::for_lessons(["b"], &records);
        assert_eq!(s.status, ProgressStatus::InProgress);
        assert_eq!(s.percent, 0);

        let s = ProgressSummary::from_records(&records);
        assert_eq!((s.completed, s.total), (2, 3));
    }
}
