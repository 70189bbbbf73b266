//! Buffered message channels with blocking send/receive, an explicit
//! close/destroy lifecycle, and a multi-way select operation.
//!
//! # Key Features
//!
//! - **Bounded buffering**: Every channel owns a fixed-capacity FIFO; a
//!   capacity of zero is rejected at construction.
//! - **Blocking and non-blocking operations**: `send`/`recv` queue the
//!   caller until served; `try_send`/`try_recv` report full/empty instead.
//! - **Deterministic wakeup**: Each successful operation serves exactly one
//!   queued waiter of the opposite direction, in FIFO registration order,
//!   and performs the waiter's operation on its behalf before waking it.
//! - **Explicit lifecycle**: `close` wakes every queued caller with a closed
//!   error and fails all future operations; `destroy` releases buffered
//!   messages once the channel is closed.
//! - **Select**: [`select`] waits until exactly one of several proposed
//!   send/receive operations on distinct channels becomes possible and
//!   performs it; registrations on the losing channels are reclaimed lazily.
//!
//! # Example
//!
//! ```rust
//! use runnel::{select, Channel, SelectOp};
//! use std::thread;
//!
//! let ch = Channel::new(2);
//! ch.send(1).unwrap();
//!
//! let worker = {
//!     let ch = ch.clone();
//!     thread::spawn(move || ch.recv().unwrap())
//! };
//! assert_eq!(worker.join().unwrap(), 1);
//!
//! let a: Channel<i32> = Channel::new(1);
//! let b = Channel::new(1);
//! b.send(7).unwrap();
//!
//! let done = select(vec![SelectOp::Recv(&a), SelectOp::Recv(&b)]).unwrap();
//! assert_eq!((done.index, done.value), (1, Some(7)));
//! ```

#![warn(missing_docs)]

mod channel;
mod error;
mod request;
mod select;
mod signal;
mod waiters;

pub use channel::Channel;
pub use error::{
    code, CloseError, DestroyError, RecvError, SelectError, SendError, TryRecvError, TrySendError,
};
pub use select::{select, SelectOp, Selected};
