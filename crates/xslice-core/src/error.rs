//! Error types for registry and widget operations

use core::fmt;

use thiserror_no_std::Error;

use crate::ui::PageId;

/// Errors reported by [`Gui`](crate::Gui) operations.
///
/// Every failure is also logged at the point where it is detected, so
/// callers that only care about the neutral outcome may drop the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuiError {
    /// The page id was never added to the GUI
    #[error("Page {0:?} not found")]
    PageNotFound(PageId),

    /// The element reference does not resolve to a live element
    #[error("Element reference does not resolve")]
    InvalidRef,

    /// The element exists but is a different widget kind
    #[error("Type mismatch (expected {expected}, found {found})")]
    TypeMismatch {
        /// Widget kind the operation requires
        expected: &'static str,
        /// Widget kind actually stored in the element
        found: &'static str,
    },

    /// A fixed-capacity collection is full
    #[error("Capacity exceeded (max: {max})")]
    CapacityExceeded {
        /// Maximum number of entries
        max: usize,
    },

    /// The font id was never registered
    #[error("Font {0:?} not found")]
    FontNotFound(crate::ui::FontId),

    /// A configuration blob failed to encode or decode
    #[error("Invalid configuration blob")]
    Config,
}

/// Result type for registry and widget operations
pub type GuiResult<T> = Result<T, GuiError>;

/// Failure while drawing an element.
///
/// Either the element itself could not be resolved, or the display target
/// rejected a primitive.
#[derive(Debug)]
pub enum DrawError<E> {
    Gui(GuiError),
    Display(E),
}

impl<E> From<GuiError> for DrawError<E> {
    fn from(err: GuiError) -> Self {
        DrawError::Gui(err)
    }
}

impl<E: fmt::Debug> fmt::Display for DrawError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Gui(err) => write!(f, "{}", err),
            DrawError::Display(err) => write!(f, "Display error: {:?}", err),
        }
    }
}
