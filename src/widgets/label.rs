use crate::context::DrawContext;
use crate::widget::Widget;

/// A widget that emits a line of text into the current region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// The text to display.
    pub contents: String,
}

impl Label {
    /// Returns a label displaying `contents`.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl Widget for Label {
    fn render(&mut self, context: &mut DrawContext<'_>) {
        context.text(&self.contents);
    }
}
