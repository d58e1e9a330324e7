use thiserror::Error;

/// Misuse of the [`StackOfOpenElements`](crate::StackOfOpenElements).
///
/// Lookups that find nothing are not errors; these only cover calls the
/// tree builder should never make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// `pop` on an empty stack. The calling algorithm popped an element it
    /// had not checked was open.
    #[error("pop from an empty stack of open elements")]
    EmptyStack,

    /// `insert_at` past the top of the stack.
    #[error("cannot insert at position {position} in a stack of {len} elements")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Stack length at the time of the call.
        len: usize,
    },
}
