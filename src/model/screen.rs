use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a screen can be shown without a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Gated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Home,
    Login,
    Signup,
    Explore,
    Contact,
    CourseDetail,
    Lesson,
    Quiz,
    Profile,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 10] = [
        Screen::Home,
        Screen::Login,
        Screen::Signup,
        Screen::Explore,
        Screen::Contact,
        Screen::CourseDetail,
        Screen::Lesson,
        Screen::Quiz,
        Screen::Profile,
        Screen::Settings,
    ];

    pub fn access(self) -> Access {
        match self {
            Screen::Home | Screen::Login | Screen::Signup | Screen::Explore | Screen::Contact => {
                Access::Public
            }
            Screen::CourseDetail
            | Screen::Lesson
            | Screen::Quiz
            | Screen::Profile
            | Screen::Settings => Access::Gated,
        }
    }

    pub fn requires_session(self) -> bool {
        self.access() == Access::Gated
    }

    pub fn slug(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Login => "login",
            Screen::Signup => "signup",
            Screen::Explore => "explore",
            Screen::Contact => "contact",
            Screen::CourseDetail => "course-detail",
            Screen::Lesson => "lesson",
            Screen::Quiz => "quiz",
            Screen::Profile => "profile",
            Screen::Settings => "settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Login => "Login",
            Screen::Signup => "Sign Up",
            Screen::Explore => "Explore",
            Screen::Contact => "Contact",
            Screen::CourseDetail => "Course",
            Screen::Lesson => "Lesson",
            Screen::Quiz => "Quiz",
            Screen::Profile => "Profile",
            Screen::Settings => "Settings",
        }
    }

    pub fn auth_screen(self) -> Option<AuthScreen> {
        match self {
            Screen::Login => Some(AuthScreen::Login),
            Screen::Signup => Some(AuthScreen::Signup),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Screen {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Screen::ALL
            .into_iter()
            .find(|screen| screen.slug() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown screen `{}`", s))
    }
}

/// The two screens a login prompt can hand off to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScreen {
    Login,
    Signup,
}

impl AuthScreen {
    pub fn screen(self) -> Screen {
        match self {
            AuthScreen::Login => Screen::Login,
            AuthScreen::Signup => Screen::Signup,
        }
    }
}

/// Data a screen needs to render, e.g. the course a detail view shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Course { course_id: String },
    Lesson { course_id: String, lesson_id: String },
    Quiz { course_id: String, quiz_id: String },
}

impl Payload {
    pub fn course(course_id: impl Into<String>) -> Self {
        Payload::Course {
            course_id: course_id.into(),
        }
    }

    pub fn course_id(&self) -> &str {
        match self {
            Payload::Course { course_id }
            | Payload::Lesson { course_id, .. }
            | Payload::Quiz { course_id, .. } => course_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub screen: Screen,
    pub payload: Option<Payload>,
}

impl Route {
    pub fn new(screen: Screen, payload: Option<Payload>) -> Self {
        Self { screen, payload }
    }

    pub fn home() -> Self {
        Self::new(Screen::Home, None)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::home()
    }
}

/// A gated navigation parked until a login completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAction {
    pub screen: Screen,
    pub payload: Option<Payload>,
}

impl PendingAction {
    pub fn route(&self) -> Route {
        Route::new(self.screen, self.payload.clone())
    }
}
