//! Types for displaying a [`WidgetTree`] in a window.

use figures::units::Px;
use figures::{Point, Rect, Size};

use crate::surface::{HeadlessSurface, Surface, SurfaceCommand};
use crate::widget::WidgetId;
use crate::widgets::VerticalSizer;
use crate::{Error, Run, WidgetTree};

/// The attributes used to open a [`Window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    /// The title shown by the window's decorations.
    pub title: String,
    /// The size of the window's content area.
    pub size: Size<Px>,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::new("Window")
    }
}

impl WindowSettings {
    /// Returns settings for a 640x480 window titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: Size::new(Px::new(640), Px::new(480)),
        }
    }

    /// Sets the initial size of the window and returns self.
    #[must_use]
    pub fn with_size(mut self, size: Size<Px>) -> Self {
        self.size = size;
        self
    }
}

/// A platform integration that provides frames to draw into.
///
/// A backend is initialized once, then asked for frames until
/// [`new_frame`](Self::new_frame) returns false, and finally shut down.
pub trait Backend {
    /// Creates the platform window described by `settings`.
    fn init(&mut self, settings: &WindowSettings) -> crate::Result;
    /// Prepares the next frame. Returns false when the window has been closed.
    fn new_frame(&mut self) -> bool;
    /// Returns the current size of the window's content area.
    fn display_size(&self) -> Size<Px>;
    /// Returns the surface the current frame is drawn to.
    fn surface(&mut self) -> &mut dyn Surface;
    /// Displays the frame that was drawn to [`surface`](Self::surface).
    fn present(&mut self);
    /// Destroys the platform window.
    fn shutdown(&mut self);
}

/// A [`Backend`] that draws a fixed number of frames to a [`HeadlessSurface`].
///
/// This backend is useful for tests and for running an application without
/// a display.
#[derive(Debug, Clone)]
pub struct NullBackend {
    surface: HeadlessSurface,
    frames_remaining: usize,
    frames_presented: usize,
    last_frame: Vec<SurfaceCommand>,
    available: bool,
    initialized: bool,
}

impl NullBackend {
    /// Returns a backend that produces `frames` frames before reporting that
    /// its window was closed.
    #[must_use]
    pub fn new(frames: usize) -> Self {
        Self {
            surface: HeadlessSurface::default(),
            frames_remaining: frames,
            frames_presented: 0,
            last_frame: Vec::new(),
            available: true,
            initialized: false,
        }
    }

    /// Returns a backend that fails to initialize.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(0)
        }
    }

    /// Draws to `surface` and returns self.
    ///
    /// Initializing the backend resizes the surface to the window's size.
    #[must_use]
    pub fn with_surface(mut self, surface: HeadlessSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Returns the surface frames are drawn to.
    #[must_use]
    pub fn headless(&self) -> &HeadlessSurface {
        &self.surface
    }

    /// Returns exclusive access to the surface frames are drawn to.
    pub fn headless_mut(&mut self) -> &mut HeadlessSurface {
        &mut self.surface
    }

    /// Returns the number of frames presented so far.
    #[must_use]
    pub const fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    /// Returns the commands drawn in the most recently presented frame.
    #[must_use]
    pub fn last_frame(&self) -> &[SurfaceCommand] {
        &self.last_frame
    }

    /// Returns true between [`Backend::init`] and [`Backend::shutdown`].
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Backend for NullBackend {
    fn init(&mut self, settings: &WindowSettings) -> crate::Result {
        if !self.available {
            return Err(Error::BackendUnavailable);
        }
        self.surface.set_display_size(settings.size);
        self.initialized = true;
        tracing::debug!(title = %settings.title, "null backend initialized");
        Ok(())
    }

    fn new_frame(&mut self) -> bool {
        if self.frames_remaining == 0 {
            return false;
        }
        self.frames_remaining -= 1;
        true
    }

    fn display_size(&self) -> Size<Px> {
        self.surface.display_size()
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    fn present(&mut self) {
        if self.surface.depth() > 0 {
            tracing::warn!(depth = self.surface.depth(), "frame presented with open regions");
        }
        self.last_frame = self.surface.take_commands();
        self.frames_presented += 1;
    }

    fn shutdown(&mut self) {
        self.initialized = false;
    }
}

/// A window that lays out its frames with a root [`VerticalSizer`].
#[derive(Debug)]
pub struct Window {
    settings: WindowSettings,
    tree: WidgetTree,
    root: WidgetId,
    frames: Vec<WidgetId>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(WindowSettings::default())
    }
}

impl Window {
    /// Returns a window with no frames.
    #[must_use]
    pub fn new(settings: WindowSettings) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.push(VerticalSizer::new());
        Self {
            settings,
            tree,
            root,
            frames: Vec::new(),
        }
    }

    /// Returns the title of this window.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.settings.title
    }

    /// Returns the current size of this window's content area.
    #[must_use]
    pub const fn size(&self) -> Size<Px> {
        self.settings.size
    }

    /// Returns the settings this window opens with.
    #[must_use]
    pub const fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Returns the tree holding this window's widgets.
    #[must_use]
    pub const fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Returns exclusive access to the tree holding this window's widgets.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Returns the sizer that lays out this window's frames.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        self.root
    }

    /// Returns the frames registered with this window, in the order they
    /// were added.
    #[must_use]
    pub fn frames(&self) -> &[WidgetId] {
        &self.frames
    }

    /// Registers `frame` and stacks it below the existing frames with a
    /// weight of 1.
    pub fn add_frame(&mut self, frame: WidgetId) -> crate::Result {
        self.add_frame_weighted(frame, 1)
    }

    /// Registers `frame` and stacks it below the existing frames with
    /// `weight`.
    pub fn add_frame_weighted(&mut self, frame: WidgetId, weight: i32) -> crate::Result {
        self.tree.add_weighted(self.root, frame, weight)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Unregisters `frame`. Returns false if it was not registered.
    ///
    /// The frame stays in [`Self::tree`].
    pub fn remove_frame(&mut self, frame: WidgetId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|id| *id != frame);
        let detached = match self.tree.remove_child(self.root, frame) {
            Ok(detached) => detached,
            Err(err) => {
                tracing::warn!(%err, "window has no root sizer");
                false
            }
        };
        detached || self.frames.len() != before
    }

    /// Creates the platform window through `backend`.
    pub fn init(&mut self, backend: &mut dyn Backend) -> crate::Result {
        backend.init(&self.settings)
    }

    /// Destroys the platform window through `backend`.
    pub fn deinit(&mut self, backend: &mut dyn Backend) {
        backend.shutdown();
    }

    /// Starts a new frame. Returns false when the window has been closed.
    ///
    /// The window adopts the backend's display size, so resizing the platform
    /// window resizes the layout on the next frame.
    pub fn render_begin(&mut self, backend: &mut dyn Backend) -> bool {
        if !backend.new_frame() {
            return false;
        }
        let size = backend.display_size();
        if size != self.settings.size {
            tracing::debug!(?size, "window resized");
            self.settings.size = size;
        }
        true
    }

    /// Lays out and draws every frame to `surface`.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let rect = Rect::new(Point::new(Px::new(0), Px::new(0)), self.settings.size);
        if let Err(err) = self.tree.draw_at(self.root, rect, surface) {
            tracing::error!(%err, "window has no root sizer");
        }
    }

    /// Finishes the current frame.
    pub fn render_end(&mut self, backend: &mut dyn Backend) {
        backend.present();
    }
}

impl Run for Window {
    fn run(mut self, backend: &mut dyn Backend) -> crate::Result {
        self.init(backend)?;
        let mut frames = 0_usize;
        while self.render_begin(backend) {
            self.render(backend.surface());
            self.render_end(backend);
            frames += 1;
        }
        self.deinit(backend);
        tracing::info!(frames, title = %self.settings.title, "window closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use figures::units::Px;
    use figures::{Point, Rect, Size};

    use super::{Backend, NullBackend, Window, WindowSettings};
    use crate::surface::SurfaceCommand;
    use crate::widgets::{ChildFrame, Label};
    use crate::{Error, Run};

    fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect<Px> {
        Rect::new(
            Point::new(Px::new(x), Px::new(y)),
            Size::new(Px::new(width), Px::new(height)),
        )
    }

    #[test]
    fn default_settings() {
        let window = Window::default();
        assert_eq!(window.title(), "Window");
        assert_eq!(window.size(), Size::new(Px::new(640), Px::new(480)));
        assert!(window.frames().is_empty());
    }

    #[test]
    fn frames_share_the_window() {
        let mut window = Window::default();
        let top = window.tree_mut().push_named("top", ChildFrame::new()).unwrap();
        let bottom = window
            .tree_mut()
            .push_named("bottom", ChildFrame::new())
            .unwrap();
        window.add_frame(top).unwrap();
        window.add_frame(bottom).unwrap();

        let mut backend = NullBackend::new(2);
        window.run(&mut backend).unwrap();
        assert_eq!(backend.frames_presented(), 2);
        assert!(!backend.is_initialized());
        assert_eq!(
            backend.last_frame(),
            [
                SurfaceCommand::BeginChild {
                    id: String::from("top"),
                    rect: rect(0, 0, 640, 238),
                    open: true,
                },
                SurfaceCommand::EndChild,
                SurfaceCommand::BeginChild {
                    id: String::from("bottom"),
                    rect: rect(0, 242, 640, 238),
                    open: true,
                },
                SurfaceCommand::EndChild,
            ]
        );
    }

    #[test]
    fn resizes_follow_the_backend() {
        let mut window = Window::new(
            WindowSettings::new("resize").with_size(Size::new(Px::new(100), Px::new(100))),
        );
        let label = window.tree_mut().push(Label::new("hi"));
        window.add_frame_weighted(label, 2).unwrap();

        let mut backend = NullBackend::new(1);
        window.init(&mut backend).unwrap();
        backend
            .headless_mut()
            .set_display_size(Size::new(Px::new(300), Px::new(50)));

        assert!(window.render_begin(&mut backend));
        window.render(backend.surface());
        window.render_end(&mut backend);
        assert_eq!(window.size(), Size::new(Px::new(300), Px::new(50)));
        assert_eq!(window.tree().rect(label), Some(rect(0, 0, 300, 50)));
        assert!(!window.render_begin(&mut backend));
    }

    #[test]
    fn removing_frames() {
        let mut window = Window::default();
        let frame = window.tree_mut().push(ChildFrame::new());
        assert_eq!(window.add_frame_weighted(frame, 0), Err(Error::InvalidWeight(0)));
        assert!(window.frames().is_empty());

        window.add_frame(frame).unwrap();
        assert!(window.remove_frame(frame));
        assert!(!window.remove_frame(frame));
        assert!(window.frames().is_empty());
        assert!(window.tree().children(window.root()).is_empty());
        assert!(window.tree().contains(frame));
    }

    #[test]
    fn removing_frames_without_a_root() {
        let mut window = Window::default();
        let frame = window.tree_mut().push(ChildFrame::new());
        window.add_frame(frame).unwrap();

        let root = window.root();
        assert!(window.tree_mut().remove(root).is_some());
        assert!(window.remove_frame(frame));
        assert!(window.frames().is_empty());
        assert!(!window.remove_frame(frame));
    }

    #[test]
    fn unavailable_backend() {
        let mut backend = NullBackend::unavailable();
        assert_eq!(Window::default().run(&mut backend), Err(Error::BackendUnavailable));
        assert_eq!(backend.frames_presented(), 0);
    }
}
