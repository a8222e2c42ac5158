//! The rendering surface widgets draw into.
//!
//! The layout engine never draws pixels itself. It asks a [`Surface`] for the
//! current style spacing and content region, and widgets open and close named
//! regions on it while drawing. [`HeadlessSurface`] implements the trait in
//! memory and records every call, which is what tests and the null backend
//! use.

use ahash::AHashSet;
use figures::units::Px;
use figures::{Point, Rect, Size};

/// Options for a top-level region opened by a
/// [`Frame`](crate::widgets::Frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFlags {
    /// Whether the region shows a title bar and border.
    pub decorated: bool,
    /// Whether the user may resize the region.
    pub resizable: bool,
}

/// Options for a nested region opened by a
/// [`ChildFrame`](crate::widgets::ChildFrame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildFlags {
    /// Whether a border is drawn around the region.
    pub borders: bool,
}

impl Default for ChildFlags {
    fn default() -> Self {
        Self { borders: true }
    }
}

/// A rendering surface provided by an immediate-mode UI library.
pub trait Surface {
    /// Returns the spacing the active style places between adjacent items.
    fn item_spacing(&self) -> Size<Px>;

    /// Returns the content area of the innermost open region, in the same
    /// coordinate space widgets are positioned in.
    fn content_region(&self) -> Rect<Px>;

    /// Opens a top-level region named `id` covering `rect`.
    ///
    /// Returns false if the region is collapsed or clipped and its contents
    /// should not be emitted. [`Surface::end_frame`] must be called either way.
    fn begin_frame(&mut self, id: &str, rect: Rect<Px>, flags: FrameFlags) -> bool;

    /// Closes the region opened by the matching [`Surface::begin_frame`].
    fn end_frame(&mut self);

    /// Opens a region named `id` nested inside the current region.
    ///
    /// Returns false if the region's contents should not be emitted.
    /// [`Surface::end_child`] must be called either way.
    fn begin_child(&mut self, id: &str, rect: Rect<Px>, flags: ChildFlags) -> bool;

    /// Closes the region opened by the matching [`Surface::begin_child`].
    fn end_child(&mut self);

    /// Emits a line of text into the current region.
    fn text(&mut self, text: &str);
}

/// A call made on a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// [`Surface::begin_frame`] was called.
    BeginFrame {
        /// The region's id.
        id: String,
        /// The region's bounds.
        rect: Rect<Px>,
        /// Whether the region was reported as open.
        open: bool,
    },
    /// [`Surface::end_frame`] was called.
    EndFrame,
    /// [`Surface::begin_child`] was called.
    BeginChild {
        /// The region's id.
        id: String,
        /// The region's bounds.
        rect: Rect<Px>,
        /// Whether the region was reported as open.
        open: bool,
    },
    /// [`Surface::end_child`] was called.
    EndChild,
    /// [`Surface::text`] was called.
    Text(String),
}

/// An in-memory [`Surface`] that records every call made on it.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    display: Size<Px>,
    spacing: Size<Px>,
    padding: Size<Px>,
    collapsed: AHashSet<String>,
    regions: Vec<Rect<Px>>,
    commands: Vec<SurfaceCommand>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Size::new(Px::new(640), Px::new(480)))
    }
}

impl HeadlessSurface {
    /// Returns a surface for a display of `size`, using the default style:
    /// 8x4 item spacing and 8x8 region padding.
    #[must_use]
    pub fn new(size: Size<Px>) -> Self {
        Self {
            display: size,
            spacing: Size::new(Px::new(8), Px::new(4)),
            padding: Size::new(Px::new(8), Px::new(8)),
            collapsed: AHashSet::new(),
            regions: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Sets the item spacing and returns self.
    #[must_use]
    pub fn with_item_spacing(mut self, spacing: Size<Px>) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the padding between a region's edge and its content, and returns
    /// self.
    #[must_use]
    pub fn with_padding(mut self, padding: Size<Px>) -> Self {
        self.padding = padding;
        self
    }

    /// Marks the region `id` as collapsed and returns self. Beginning a
    /// collapsed region reports false.
    #[must_use]
    pub fn with_collapsed(mut self, id: impl Into<String>) -> Self {
        self.collapsed.insert(id.into());
        self
    }

    /// Returns the size of the display.
    #[must_use]
    pub const fn display_size(&self) -> Size<Px> {
        self.display
    }

    /// Updates the size of the display.
    pub fn set_display_size(&mut self, size: Size<Px>) {
        self.display = size;
    }

    /// Returns the number of regions currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    /// Returns every call recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Removes and returns every call recorded so far.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    fn open(&mut self, id: &str, rect: Rect<Px>) -> bool {
        self.regions.push(rect);
        !self.collapsed.contains(id)
    }

    fn close(&mut self) {
        if self.regions.pop().is_none() {
            tracing::warn!("region closed without a matching begin");
        }
    }
}

impl Surface for HeadlessSurface {
    fn item_spacing(&self) -> Size<Px> {
        self.spacing
    }

    fn content_region(&self) -> Rect<Px> {
        let Some(region) = self.regions.last() else {
            return Rect::new(Point::new(Px::new(0), Px::new(0)), self.display);
        };
        let (pad_x, pad_y) = (self.padding.width.get(), self.padding.height.get());
        let width = (region.size.width.get() - pad_x * 2).max(0);
        let height = (region.size.height.get() - pad_y * 2).max(0);
        Rect::new(
            Point::new(
                Px::new(region.origin.x.get() + pad_x),
                Px::new(region.origin.y.get() + pad_y),
            ),
            Size::new(Px::new(width), Px::new(height)),
        )
    }

    fn begin_frame(&mut self, id: &str, rect: Rect<Px>, _flags: FrameFlags) -> bool {
        let open = self.open(id, rect);
        self.commands.push(SurfaceCommand::BeginFrame {
            id: id.to_string(),
            rect,
            open,
        });
        open
    }

    fn end_frame(&mut self) {
        self.close();
        self.commands.push(SurfaceCommand::EndFrame);
    }

    fn begin_child(&mut self, id: &str, rect: Rect<Px>, _flags: ChildFlags) -> bool {
        let open = self.open(id, rect);
        self.commands.push(SurfaceCommand::BeginChild {
            id: id.to_string(),
            rect,
            open,
        });
        open
    }

    fn end_child(&mut self) {
        self.close();
        self.commands.push(SurfaceCommand::EndChild);
    }

    fn text(&mut self, text: &str) {
        self.commands.push(SurfaceCommand::Text(text.to_string()));
    }
}
