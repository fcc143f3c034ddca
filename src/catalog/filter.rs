use crate::model::{Course, Difficulty};

pub const ALL_CATEGORIES: &str = "all";

/// Explore-screen filter. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub query: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(cat) = self.category.as_deref()
            && cat != ALL_CATEGORIES
            && !course.category.eq_ignore_ascii_case(cat)
        {
            return false;
        }
        if let Some(d) = self.difficulty
            && course.difficulty != d
        {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                course.title.to_lowercase().contains(&q)
                    || course.description.to_lowercase().contains(&q)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

/// `"all"` followed by the distinct categories in sorted order.
pub fn categories(courses: &[Course]) -> Vec<String> {
    let mut out: Vec<String> = courses
        .iter()
        .map(|c| c.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out.insert(0, ALL_CATEGORIES.to_string());
    out
}

pub fn format_category(category: &str) -> String {
    if category == ALL_CATEGORIES {
        return "All Lessons".to_string();
    }
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, title: &str, category: &str, difficulty: Difficulty) -> Course {
        Course {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
            category: category.to_string(),
            difficulty,
            image_url: None,
            students_enrolled: 0,
        }
    }

    fn sample() -> Vec<Course> {
        vec![
            course("1", "React for Beginners", "frontend", Difficulty::Beginner),
            course("2", "Node.js Mastery", "backend", Difficulty::Intermediate),
            course("3", "React Advanced Patterns", "frontend", Difficulty::Advanced),
        ]
    }

    #[test]
    fn category_and_difficulty_narrow_the_list() {
        let courses = sample();
        let f = CourseFilter {
            category: Some("frontend".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(f.apply(&courses).len(), 2);

        let f = CourseFilter {
            category: Some("frontend".to_string()),
            difficulty: Some(Difficulty::Advanced),
            ..CourseFilter::default()
        };
        let ids: Vec<_> = f.apply(&courses).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn all_category_and_blank_query_match_everything() {
        let courses = sample();
        let f = CourseFilter {
            category: Some(ALL_CATEGORIES.to_string()),
            query: Some("   ".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(f.apply(&courses).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let courses = sample();
        let f = CourseFilter {
            query: Some("REACT".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(f.apply(&courses).len(), 2);

        let f = CourseFilter {
            query: Some("about node".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(f.apply(&courses).len(), 1);
    }

    #[test]
    fn categories_are_sorted_unique_after_all() {
        assert_eq!(categories(&sample()), vec!["all", "backend", "frontend"]);
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn category_labels() {
        assert_eq!(format_category("all"), "All Lessons");
        assert_eq!(format_category("frontend"), "Frontend");
        assert_eq!(format_category("ai / ml"), "Ai / ml");
        assert_eq!(format_category(""), "");
    }
}
