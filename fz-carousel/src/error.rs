use thiserror::Error;

use crate::gesture::PointerId;

/// Reasons a carousel request could not be carried out.
///
/// None of these are fatal. Public navigation methods log them at `debug`
/// and turn them into no-ops; `try_*` variants hand them to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    #[error("carousel has no slides")]
    Empty,

    #[error("slide or viewport measurements are not available yet")]
    NotMeasured,

    #[error("slide index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("dragging is disabled")]
    DragDisabled,

    #[error("a drag gesture is already in progress")]
    AlreadyDragging,

    #[error("no drag gesture is in progress")]
    GestureInactive,

    #[error("pointer {got:?} does not own the active gesture ({expected:?})")]
    PointerMismatch { expected: PointerId, got: PointerId },
}

pub type Result<T> = std::result::Result<T, CarouselError>;
