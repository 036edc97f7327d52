//! Navigation collaborator.

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Unauthenticated entry point.
    Login,
}

pub trait Navigator {
    fn redirect(&self, route: Route);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn redirect(&self, route: Route) {
        (**self).redirect(route);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn redirects(&self) -> Vec<Route> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: Route) {
        tracing::debug!(?route, "redirect");
        self.redirects.borrow_mut().push(route);
    }
}
