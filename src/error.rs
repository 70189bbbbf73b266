use std::error::Error;
use std::fmt;

/// Numeric status codes shared by every operation outcome.
///
/// These are the stable, language-neutral codes an embedding can report.
/// Each error type in this module maps onto them through its `code` method;
/// a successful operation corresponds to [`code::SUCCESS`].
pub mod code {
    /// The operation completed and transferred exactly one message.
    pub const SUCCESS: i32 = 1;

    /// A non-blocking send found the buffer at capacity.
    pub const CHANNEL_FULL: i32 = 0;

    /// A non-blocking receive found the buffer empty.
    ///
    /// Intentionally aliased with [`CHANNEL_FULL`]; callers disambiguate by
    /// the operation they invoked.
    pub const CHANNEL_EMPTY: i32 = 0;

    /// A precondition violation, such as selecting over an empty list.
    pub const GEN_ERROR: i32 = -1;

    /// The channel was closed at the time of the operation, or closed while
    /// the operation was queued.
    pub const CLOSED_ERROR: i32 = -2;

    /// Destroy was attempted on a channel that is not yet closed.
    pub const DESTROY_ERROR: i32 = -3;
}

/// Error returned by a blocking send on a channel that is, or became, closed.
///
/// Carries the undelivered value back to the caller.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        code::CLOSED_ERROR
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendError(..)")
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sending on a closed channel")
    }
}

impl<T> Error for SendError<T> {}

/// Error returned by a non-blocking send.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TrySendError<T> {
    /// The buffer is at capacity; the value is handed back.
    Full(T),
    /// The channel is closed; the value is handed back.
    Closed(T),
}

impl<T> TrySendError<T> {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            TrySendError::Full(_) => code::CHANNEL_FULL,
            TrySendError::Closed(_) => code::CLOSED_ERROR,
        }
    }

    /// Consumes the error, returning the value that was not sent.
    pub fn into_inner(self) -> T {
        match self {
            TrySendError::Full(value) | TrySendError::Closed(value) => value,
        }
    }
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => write!(f, "Full(..)"),
            TrySendError::Closed(_) => write!(f, "Closed(..)"),
        }
    }
}

impl<T> fmt::Display for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => write!(f, "sending on a full channel"),
            TrySendError::Closed(_) => write!(f, "sending on a closed channel"),
        }
    }
}

impl<T> Error for TrySendError<T> {}

/// Error returned by a blocking receive on a channel that is, or became,
/// closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecvError;

impl RecvError {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        code::CLOSED_ERROR
    }
}

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiving on a closed channel")
    }
}

impl Error for RecvError {}

/// Error returned by a non-blocking receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// The buffer holds no messages.
    Empty,
    /// The channel is closed.
    Closed,
}

impl TryRecvError {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            TryRecvError::Empty => code::CHANNEL_EMPTY,
            TryRecvError::Closed => code::CLOSED_ERROR,
        }
    }
}

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryRecvError::Empty => write!(f, "receiving on an empty channel"),
            TryRecvError::Closed => write!(f, "receiving on a closed channel"),
        }
    }
}

impl Error for TryRecvError {}

/// Error returned by `close` on a channel that is already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseError;

impl CloseError {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        code::CLOSED_ERROR
    }
}

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "closing an already closed channel")
    }
}

impl Error for CloseError {}

/// Error returned by `destroy` on a channel that has not been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyError;

impl DestroyError {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        code::DESTROY_ERROR
    }
}

impl fmt::Display for DestroyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "destroying a channel that is still open")
    }
}

impl Error for DestroyError {}

/// Error returned by `select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// A channel in the operation list was, or became, closed. `index` is
    /// its position in the list.
    Closed {
        /// Position of the closed channel in the caller's operation list.
        index: usize,
    },
    /// The operation list was empty.
    NoOperations,
}

impl SelectError {
    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            SelectError::Closed { .. } => code::CLOSED_ERROR,
            SelectError::NoOperations => code::GEN_ERROR,
        }
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::Closed { index } => {
                write!(f, "channel {} in the select list is closed", index)
            }
            SelectError::NoOperations => write!(f, "select on an empty operation list"),
        }
    }
}

impl Error for SelectError {}
