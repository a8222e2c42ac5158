use std::fmt::{self, Debug};

use figures::units::Px;
use figures::Rect;

use crate::context::DrawContext;
use crate::surface::ChildFlags;
use crate::widget::Widget;

type RenderFn = Box<dyn FnMut(&mut DrawContext<'_>)>;

/// A widget that opens a region nested inside the current one.
///
/// The region uses the widget's name as its id. This is the usual leaf of a
/// sizer layout: the sizer positions it, and the callback installed with
/// [`ChildFrame::on_render`] fills it.
pub struct ChildFrame {
    flags: ChildFlags,
    render: Option<RenderFn>,
}

impl Default for ChildFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChildFrame {
    /// Returns a bordered child frame with no content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: ChildFlags::default(),
            render: None,
        }
    }

    /// Sets the region flags and returns self.
    #[must_use]
    pub fn with_flags(mut self, flags: ChildFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the callback that emits this frame's content and returns self.
    #[must_use]
    pub fn on_render<F>(mut self, render: F) -> Self
    where
        F: FnMut(&mut DrawContext<'_>) + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    /// Returns the region flags.
    #[must_use]
    pub const fn flags(&self) -> ChildFlags {
        self.flags
    }
}

impl Debug for ChildFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildFrame")
            .field("flags", &self.flags)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl Widget for ChildFrame {
    fn render_begin(&mut self, context: &mut DrawContext<'_>) -> bool {
        let name = context.name().clone();
        let rect = context.rect();
        context.surface().begin_child(&name, rect, self.flags)
    }

    fn render(&mut self, context: &mut DrawContext<'_>) {
        if let Some(render) = &mut self.render {
            render(context);
        }
    }

    fn render_end(&mut self, context: &mut DrawContext<'_>) {
        context.surface().end_child();
    }

    fn content_bounds(&mut self, context: &mut DrawContext<'_>) -> Option<Rect<Px>> {
        Some(context.content_rect())
    }
}
