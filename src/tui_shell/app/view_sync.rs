use super::*;

impl App {
    /// Builds the one view for the current route, loading its data.
    pub(in crate::tui_shell) fn rebuild_view(&mut self) {
        let route = self.client.current_route().clone();
        self.view = self.build_view(&route);
    }

    fn build_view(&mut self, route: &Route) -> Box<dyn View> {
        let course_id = route.payload.as_ref().map(|p| p.course_id().to_string());
        match route.screen {
            Screen::Home => Box::new(HomeView::new(
                self.client.current_session().map(|s| s.greeting_name().to_string()),
                self.client.courses(),
            )),
            Screen::Explore => Box::new(ExploreView::new(self.client.courses())),
            Screen::Contact => Box::new(ContactView::new(self.client.contact_draft())),
            Screen::Login | Screen::Signup => {
                let which = route.screen.auth_screen().unwrap_or(AuthScreen::Login);
                Box::new(AuthView::new(
                    which,
                    self.client.auth_error().map(str::to_string),
                    self.client.pending().map(|p| p.screen.title().to_string()),
                ))
            }
            Screen::CourseDetail => match course_id {
                Some(id) => Box::new(CourseView::new(self.client.course_detail(&id))),
                None => Box::new(CourseView::new(Err(anyhow::anyhow!("no course selected")))),
            },
            Screen::Lesson => {
                let lesson_id = match &route.payload {
                    Some(Payload::Lesson { lesson_id, .. }) => Some(lesson_id.clone()),
                    _ => None,
                };
                let detail = match &course_id {
                    Some(id) => self.client.course_detail(id),
                    None => Err(anyhow::anyhow!("no course selected")),
                };
                Box::new(LessonView::new(detail, lesson_id.as_deref()))
            }
            Screen::Quiz => {
                let quiz = match &route.payload {
                    Some(Payload::Quiz { quiz_id, .. }) => self.client.quiz(quiz_id),
                    _ => Err(anyhow::anyhow!("no quiz selected")),
                };
                Box::new(QuizView::new(quiz))
            }
            Screen::Profile => Box::new(ProfileView::new(self.client.profile_summary())),
            Screen::Settings => Box::new(SettingsView::new(
                self.client.current_session().map(|s| s.email.clone()),
                self.prefs,
            )),
        }
    }
}
