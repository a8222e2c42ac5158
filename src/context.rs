//! The context widgets draw with.

use figures::units::Px;
use figures::{Point, Rect, Size};

use crate::surface::Surface;
use crate::Name;

/// The state available to a [`Widget`](crate::widget::Widget) while it is
/// being drawn.
pub struct DrawContext<'context> {
    surface: &'context mut dyn Surface,
    name: &'context Name,
    rect: Rect<Px>,
}

impl<'context> DrawContext<'context> {
    pub(crate) fn new(
        surface: &'context mut dyn Surface,
        name: &'context Name,
        rect: Rect<Px>,
    ) -> Self {
        Self {
            surface,
            name,
            rect,
        }
    }

    /// Returns the name of the widget being drawn.
    #[must_use]
    pub fn name(&self) -> &Name {
        self.name
    }

    /// Returns the bounds assigned to the widget being drawn.
    #[must_use]
    pub const fn rect(&self) -> Rect<Px> {
        self.rect
    }

    /// Returns the position of the widget being drawn.
    #[must_use]
    pub const fn position(&self) -> Point<Px> {
        self.rect.origin
    }

    /// Returns the size of the widget being drawn.
    #[must_use]
    pub const fn size(&self) -> Size<Px> {
        self.rect.size
    }

    /// Returns the surface being drawn to.
    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Emits a line of text into the current region.
    pub fn text(&mut self, text: &str) {
        self.surface.text(text);
    }

    /// Returns the spacing the surface's style places between items.
    #[must_use]
    pub fn item_spacing(&self) -> Size<Px> {
        self.surface.item_spacing()
    }

    /// Returns the top-left corner of the current region's content area.
    #[must_use]
    pub fn content_min(&self) -> Point<Px> {
        self.surface.content_region().origin
    }

    /// Returns the bottom-right corner of the current region's content area.
    #[must_use]
    pub fn content_max(&self) -> Point<Px> {
        let region = self.surface.content_region();
        Point::new(
            region.origin.x + region.size.width,
            region.origin.y + region.size.height,
        )
    }

    /// Returns the size of the current region's content area.
    #[must_use]
    pub fn content_size(&self) -> Size<Px> {
        self.surface.content_region().size
    }

    /// Returns the current region's content area.
    #[must_use]
    pub fn content_rect(&self) -> Rect<Px> {
        self.surface.content_region()
    }
}
