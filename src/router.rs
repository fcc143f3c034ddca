use crate::model::{Payload, Route, Screen};
use crate::observe::{Observable, Subscription};

/// Holds the one route that is currently shown. It applies whatever it is
/// told; access checks happen before a call reaches it.
pub struct PageRouter {
    current: Observable<Route>,
}

impl PageRouter {
    pub fn new() -> Self {
        Self {
            current: Observable::new(Route::home()),
        }
    }

    pub fn navigate(&mut self, screen: Screen, payload: Option<Payload>) {
        self.current.set(Route::new(screen, payload));
    }

    pub fn current(&self) -> &Route {
        self.current.get()
    }

    pub fn screen(&self) -> Screen {
        self.current.get().screen
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.current.get().payload.as_ref()
    }

    pub fn subscribe(&self, f: impl FnMut(&Route) + 'static) -> Subscription {
        self.current.subscribe(f)
    }
}

impl Default for PageRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn starts_home_and_applies_any_route() {
        let mut router = PageRouter::new();
        assert_eq!(router.screen(), Screen::Home);

        router.navigate(Screen::CourseDetail, None);
        assert_eq!(router.screen(), Screen::CourseDetail);
        assert!(router.payload().is_none());

        router.navigate(Screen::CourseDetail, Some(Payload::course("7")));
        assert_eq!(router.payload().map(|p| p.course_id()), Some("7"));
    }

    #[test]
    fn subscribers_see_each_distinct_route() {
        let mut router = PageRouter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            router.subscribe(move |r| seen.borrow_mut().push(r.screen))
        };

        router.navigate(Screen::Explore, None);
        router.navigate(Screen::Explore, None);
        router.navigate(Screen::Home, None);
        assert_eq!(*seen.borrow(), vec![Screen::Explore, Screen::Home]);
    }
}
