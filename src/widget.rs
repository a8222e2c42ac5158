//! Types for creating widgets that participate in a [`WidgetTree`](crate::WidgetTree).

use std::fmt::Debug;

use alot::LotId;
use figures::units::Px;
use figures::Rect;

use crate::context::DrawContext;
use crate::widgets::StackingSizer;

/// A node in a widget tree that emits content onto a
/// [`Surface`](crate::surface::Surface).
///
/// Drawing a widget is a three-phase protocol:
///
/// 1. [`render_begin`](Self::render_begin) acquires a drawing region.
/// 2. If it succeeded, [`render`](Self::render) emits this widget's own
///    content, then every child is drawn in insertion order.
/// 3. [`render_end`](Self::render_end) releases the region. It is called
///    whenever `render_begin` was called, regardless of its result.
pub trait Widget: Debug + 'static {
    /// Acquires the drawing context for this widget. Returning false skips
    /// [`Self::render`] and all children.
    #[allow(unused_variables)]
    fn render_begin(&mut self, context: &mut DrawContext<'_>) -> bool {
        true
    }

    /// Emits this widget's own content.
    #[allow(unused_variables)]
    fn render(&mut self, context: &mut DrawContext<'_>) {}

    /// Releases the drawing context acquired in [`Self::render_begin`].
    #[allow(unused_variables)]
    fn render_end(&mut self, context: &mut DrawContext<'_>) {}

    /// Returns the region this widget's children should fill.
    ///
    /// When this returns a rectangle, every child is resized to cover it before
    /// being drawn. Returning `None` leaves the children's geometry untouched.
    #[allow(unused_variables)]
    fn content_bounds(&mut self, context: &mut DrawContext<'_>) -> Option<Rect<Px>> {
        None
    }
}

/// A handle to a widget stored in a [`WidgetTree`](crate::WidgetTree).
///
/// Handles do not own the widget they refer to. Once a widget is removed from
/// its tree, every handle to it becomes stale and is ignored while drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(pub(crate) LotId);

/// The kinds of values a [`WidgetTree`](crate::WidgetTree) can hold.
#[derive(Debug)]
pub enum WidgetInstance {
    /// A widget that draws content.
    Widget(Box<dyn Widget>),
    /// A sizer that lays out its children.
    Sizer(StackingSizer),
}

impl WidgetInstance {
    /// Returns the sizer, if this instance is one.
    #[must_use]
    pub fn as_sizer(&self) -> Option<&StackingSizer> {
        match self {
            WidgetInstance::Sizer(sizer) => Some(sizer),
            WidgetInstance::Widget(_) => None,
        }
    }

    /// Returns the sizer exclusively, if this instance is one.
    #[must_use]
    pub fn as_sizer_mut(&mut self) -> Option<&mut StackingSizer> {
        match self {
            WidgetInstance::Sizer(sizer) => Some(sizer),
            WidgetInstance::Widget(_) => None,
        }
    }
}

/// A type that can be inserted into a [`WidgetTree`](crate::WidgetTree).
pub trait MakeWidget: Sized {
    /// Returns this value as a [`WidgetInstance`].
    fn make_widget(self) -> WidgetInstance;
}

impl<T> MakeWidget for T
where
    T: Widget,
{
    fn make_widget(self) -> WidgetInstance {
        WidgetInstance::Widget(Box::new(self))
    }
}

impl MakeWidget for StackingSizer {
    fn make_widget(self) -> WidgetInstance {
        WidgetInstance::Sizer(self)
    }
}

impl MakeWidget for WidgetInstance {
    fn make_widget(self) -> WidgetInstance {
        self
    }
}
