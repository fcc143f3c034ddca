use crate::gate::NavOutcome;

use super::super::views::CourseItem;
use super::*;

impl App {
    pub(in crate::tui_shell) fn go(&mut self, screen: Screen, payload: Option<Payload>) {
        if self.client.request_navigation(screen, payload) == NavOutcome::Deferred {
            info!(screen = %screen, "navigation waits for login");
        }
    }

    /// `l`/`u` outside the prompt: the public auth screens, unless already in.
    pub(in crate::tui_shell) fn go_auth(&mut self, which: AuthScreen) {
        if let Some(s) = self.client.current_session() {
            let msg = format!("already logged in as {}", s.email);
            self.push_output(vec![msg]);
            return;
        }
        self.go(which.screen(), None);
    }

    pub(in crate::tui_shell) fn choose_from_prompt(&mut self, which: AuthScreen) {
        self.close_modal();
        if !self.client.choose_auth_screen(which) {
            warn!("login prompt was not showing");
        }
    }

    pub(in crate::tui_shell) fn dismiss_prompt(&mut self) {
        self.close_modal();
        self.client.dismiss_login_prompt();
    }

    pub(in crate::tui_shell) fn logout(&mut self) {
        if self.client.current_session().is_none() {
            self.push_output(vec!["not logged in".to_string()]);
            return;
        }
        self.auth_wizard = None;
        self.client.sign_out();
    }

    /// Esc outside a modal: one level up the catalog.
    pub(in crate::tui_shell) fn go_back(&mut self) {
        let route = self.client.current_route().clone();
        match route.screen {
            Screen::Lesson | Screen::Quiz => {
                let course = route.payload.as_ref().map(|p| Payload::course(p.course_id()));
                self.go(Screen::CourseDetail, course);
            }
            Screen::CourseDetail => self.go(Screen::Explore, None),
            Screen::Home => {}
            _ => self.go(Screen::Home, None),
        }
    }

    /// Enter outside a modal.
    pub(in crate::tui_shell) fn activate(&mut self) {
        match self.view().screen() {
            Screen::Explore => {
                let id = self
                    .current_view::<ExploreView>()
                    .and_then(|v| v.selected_course_id());
                match id {
                    Some(id) => self.go(Screen::CourseDetail, Some(Payload::course(id))),
                    None => self.push_output(vec!["no course selected".to_string()]),
                }
            }
            Screen::Home => {
                let id = self
                    .current_view::<HomeView>()
                    .and_then(|v| v.selected_course_id());
                match id {
                    Some(id) => self.go(Screen::CourseDetail, Some(Payload::course(id))),
                    None => self.go(Screen::Explore, None),
                }
            }
            Screen::CourseDetail => {
                let item = self
                    .current_view::<CourseView>()
                    .and_then(|v| v.selected_item());
                match item {
                    Some(CourseItem::Lesson {
                        course_id,
                        lesson_id,
                    }) => self.go(
                        Screen::Lesson,
                        Some(Payload::Lesson {
                            course_id,
                            lesson_id,
                        }),
                    ),
                    Some(CourseItem::Quiz { course_id, quiz_id }) => {
                        self.go(Screen::Quiz, Some(Payload::Quiz { course_id, quiz_id }))
                    }
                    None => {}
                }
            }
            Screen::Quiz => self.submit_quiz(),
            Screen::Login => self.start_login_wizard(),
            Screen::Signup => self.start_signup_wizard(),
            Screen::Contact => self.start_contact_form(),
            Screen::Settings => self.activate_setting(),
            Screen::Lesson | Screen::Profile => {}
        }
    }

    pub(in crate::tui_shell) fn answer_quiz(&mut self, option: usize) {
        let Some(v) = self.current_view_mut::<QuizView>() else {
            return;
        };
        if let Err(err) = v.answer_current(option) {
            self.push_error(format!("{:#}", err));
        }
    }

    fn submit_quiz(&mut self) {
        let Some(v) = self.current_view_mut::<QuizView>() else {
            return;
        };
        let Some(mut session) = v.session.take() else {
            return;
        };
        let answered = session.answered();
        let total = session.questions().len();
        let result = if session.is_submitted() {
            Ok(())
        } else if answered < total {
            Err(anyhow::anyhow!(
                "answer every question first ({}/{} answered)",
                answered,
                total
            ))
        } else {
            self.client.submit_quiz(&mut session).map(|_| ())
        };
        if let Some(v) = self.current_view_mut::<QuizView>() {
            v.session = Some(session);
        }
        if let Err(err) = result {
            self.push_error(format!("{:#}", err));
        }
    }

    pub(in crate::tui_shell) fn search_courses(&mut self) {
        let initial = self
            .current_view::<ExploreView>()
            .and_then(|v| v.filter.query.clone());
        self.open_text_input_modal(
            "Search",
            "search> ",
            TextInputAction::ExploreSearch,
            initial,
            vec!["Matches course titles and descriptions. Empty clears.".to_string()],
        );
    }
}
