use uuid::Uuid;

/// Screens of the app. Only the record id travels between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Create,
    Detail { doc_id: Uuid },
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Track Hafalan",
            Route::Create => "Tambah Hafalan",
            Route::Detail { .. } => "Detail Hafalan",
        }
    }
}

/// Stack navigator rooted at the home screen.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    pub fn navigate(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pops the current screen. The root is never popped.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
