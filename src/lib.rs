#![doc = include_str!("../.crate-docs.md")]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod app;
pub mod context;
mod names;
pub mod surface;
mod timer;
mod tree;
pub mod widget;
pub mod widgets;
pub mod window;

use std::error::Error as StdError;
use std::fmt::{self, Display};

pub use figures;
pub use names::Name;

pub use self::app::Application;
pub use self::timer::Timer;
pub use self::tree::WidgetTree;

/// A result alias that defaults to the result type commonly used throughout
/// this crate.
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// A type that can be run as an application.
pub trait Run: Sized {
    /// Runs the provided type until its backend stops producing frames.
    fn run(self, backend: &mut dyn window::Backend) -> crate::Result;
}

/// An error caused by invalid use of a widget tree.
///
/// These are caller bugs: they are reported immediately at the call site and
/// never raised while laying out or drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A flexible weight less than 1 was provided.
    InvalidWeight(i32),
    /// A negative fixed size was provided.
    InvalidFixedSize(i32),
    /// An empty name was assigned to a widget.
    EmptyName,
    /// The widget id does not refer to a widget in the tree. It was either
    /// removed or belongs to another tree.
    UnknownWidget(widget::WidgetId),
    /// A weight or fixed size was provided for a parent that is not a sizer.
    NotASizer(widget::WidgetId),
    /// Attaching the child would make a widget its own ancestor.
    Cycle {
        /// The widget that would have received the child.
        parent: widget::WidgetId,
        /// The child that was being attached.
        child: widget::WidgetId,
    },
    /// The rendering backend could not be initialized.
    BackendUnavailable,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidWeight(weight) => {
                write!(f, "weight must be greater than 0, got {weight}")
            }
            Error::InvalidFixedSize(size) => {
                write!(f, "fixed size must not be negative, got {size}")
            }
            Error::EmptyName => f.write_str("name cannot be empty"),
            Error::UnknownWidget(id) => write!(f, "widget {id:?} is not in this tree"),
            Error::NotASizer(id) => write!(f, "widget {id:?} is not a sizer"),
            Error::Cycle { parent, child } => {
                write!(f, "adding {child:?} to {parent:?} would create a cycle")
            }
            Error::BackendUnavailable => f.write_str("the rendering backend is unavailable"),
        }
    }
}

impl StdError for Error {}

fn initialize_tracing() {
    #[cfg(feature = "tracing-output")]
    {
        use tracing::Level;
        use tracing_subscriber::filter::LevelFilter;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;
        use tracing_subscriber::EnvFilter;

        #[cfg(debug_assertions)]
        const MAX_LEVEL: Level = Level::INFO;
        #[cfg(not(debug_assertions))]
        const MAX_LEVEL: Level = Level::ERROR;

        let _result = tracing_subscriber::fmt::fmt()
            .with_max_level(MAX_LEVEL)
            .finish()
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::from_level(MAX_LEVEL).into())
                    .from_env_lossy(),
            )
            .try_init();
    }
}
