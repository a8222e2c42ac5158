//! Built-in [`Widget`](crate::widget::Widget) implementations.

mod child_frame;
mod frame;
mod label;
pub mod stack;

pub use child_frame::ChildFrame;
pub use frame::Frame;
pub use label::Label;
pub use stack::{Direction, HorizontalSizer, Sizing, Slot, StackingSizer, VerticalSizer};
