//! Pure catalog logic behind the screens: filtering, progress, quiz
//! scoring, profile statistics and the contact form.

mod contact;
mod filter;
mod profile;
mod progress;
mod quiz;

pub use self::contact::{ContactDraft, EMPTY_MESSAGE_ERROR};
pub use self::filter::{ALL_CATEGORIES, CourseFilter, categories, format_category};
pub use self::profile::{ProfileStats, ProfileSummary, RECENT_ACTIVITY_LIMIT};
pub use self::progress::{ProgressSummary, percentage};
pub use self::quiz::{AnswerMark, QuizScore, QuizSession};
