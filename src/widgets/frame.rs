use std::fmt::{self, Debug};

use figures::units::Px;
use figures::Rect;

use crate::context::DrawContext;
use crate::names::generate_identifier;
use crate::surface::FrameFlags;
use crate::widget::Widget;

type RenderFn = Box<dyn FnMut(&mut DrawContext<'_>)>;

/// A widget that opens a top-level region on the surface.
///
/// The region is placed at the frame's position and size. Content is emitted
/// by the callback installed with [`Frame::on_render`], and children are
/// stretched to cover the region's content area.
pub struct Frame {
    flags: FrameFlags,
    suffix: String,
    render: Option<RenderFn>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Returns an undecorated, fixed-size frame with no content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: FrameFlags::default(),
            suffix: generate_identifier(4),
            render: None,
        }
    }

    /// Sets the region flags and returns self.
    #[must_use]
    pub fn with_flags(mut self, flags: FrameFlags) -> Self {
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
    pub const fn flags(&self) -> FrameFlags {
        self.flags
    }

    /// Returns the id used for this frame's region on the surface.
    ///
    /// Two frames sharing a name still open distinct regions, because the id
    /// carries a random suffix chosen when the frame was created.
    #[must_use]
    pub fn surface_id(&self, name: &str) -> String {
        format!("{name}_{}", self.suffix)
    }
}

impl Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("flags", &self.flags)
            .field("suffix", &self.suffix)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl Widget for Frame {
    fn render_begin(&mut self, context: &mut DrawContext<'_>) -> bool {
        let id = self.surface_id(context.name());
        let rect = context.rect();
        context.surface().begin_frame(&id, rect, self.flags)
    }

    fn render(&mut self, context: &mut DrawContext<'_>) {
        if let Some(render) = &mut self.render {
            render(context);
        }
    }

    fn render_end(&mut self, context: &mut DrawContext<'_>) {
        context.surface().end_frame();
    }

    fn content_bounds(&mut self, context: &mut DrawContext<'_>) -> Option<Rect<Px>> {
        Some(context.content_rect())
    }
}

#[cfg(test)]
mod tests {
    use figures::units::Px;
    use figures::{Point, Rect, Size};

    use super::Frame;
    use crate::surface::{FrameFlags, HeadlessSurface, SurfaceCommand};
    use crate::WidgetTree;

    #[test]
    fn undecorated_and_fixed_by_default() {
        assert_eq!(
            FrameFlags::default(),
            FrameFlags {
                decorated: false,
                resizable: false,
            }
        );
        assert_eq!(Frame::new().flags(), FrameFlags::default());

        let flags = FrameFlags {
            decorated: true,
            resizable: true,
        };
        assert_eq!(Frame::default().with_flags(flags).flags(), flags);
    }

    #[test]
    fn frames_sharing_a_name_open_distinct_regions() {
        let mut tree = WidgetTree::new();
        let first = tree.push_named("main", Frame::new()).unwrap();
        let second = tree.push_named("main", Frame::new()).unwrap();

        let mut surface = HeadlessSurface::default();
        let bounds = Rect::new(
            Point::new(Px::new(0), Px::new(0)),
            Size::new(Px::new(10), Px::new(10)),
        );
        tree.draw_at(first, bounds, &mut surface).unwrap();
        tree.draw_at(second, bounds, &mut surface).unwrap();

        let ids = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                SurfaceCommand::BeginFrame { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(ids.len(), 2);
        for id in &ids {
            let suffix = id.strip_prefix("main_").unwrap();
            assert_eq!(suffix.len(), 4);
            assert!(suffix.chars().all(|ch| ch.is_ascii_alphanumeric()));
        }
        assert_ne!(ids[0], ids[1]);
    }
}
