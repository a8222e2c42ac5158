use crate::window::{Backend, Window, WindowSettings};
use crate::{initialize_tracing, Run};

/// An application that displays a single [`Window`].
///
/// ## Logging/Tracing
///
/// Running an application installs a global `tracing_subscriber` Subscriber
/// that honors `RUST_LOG`. The subscriber is installed with `try_init()`, so
/// a subscriber installed before running the application is kept instead.
///
/// The `tracing-output` Cargo feature controls whether the subscriber is
/// installed. It is included in `default-features`.
#[derive(Debug, Default)]
pub struct Application {
    window: Window,
}

impl Application {
    /// Returns an application whose window is titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_settings(WindowSettings::new(title))
    }

    /// Returns an application whose window opens with `settings`.
    #[must_use]
    pub fn with_settings(settings: WindowSettings) -> Self {
        Self {
            window: Window::new(settings),
        }
    }

    /// Returns the application's window.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Returns exclusive access to the application's window.
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }
}

impl Run for Application {
    fn run(self, backend: &mut dyn Backend) -> crate::Result {
        initialize_tracing();
        self.window.run(backend)
    }
}
