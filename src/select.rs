use crate::channel::{Attempt, Channel};
use crate::error::SelectError;
use crate::request::{Direction, OpSlot, Outcome, Payload, Request};
use std::sync::Arc;

/// One proposed operation in a [`select`] call.
pub enum SelectOp<'a, T> {
    /// Send the value into the channel.
    Send(&'a Channel<T>, T),
    /// Receive a value from the channel.
    Recv(&'a Channel<T>),
}

/// The operation a [`select`] call completed.
#[derive(Debug)]
pub struct Selected<T> {
    /// Position of the completed operation in the caller's list.
    pub index: usize,
    /// The received value, when the completed operation was a receive.
    pub value: Option<T>,
}

/// Blocks until exactly one of the proposed operations can be performed,
/// performs it, and reports which one fired.
///
/// Operations are attempted in list order, so the lowest-index ready channel
/// wins the initial pass. If none is ready, a registration is left on every
/// channel that could not serve and the calling thread sleeps; the first
/// channel that can serve one of the registrations performs that operation
/// and wakes the caller. At most one operation ever fires. Registrations on
/// the losing channels go stale and are discarded by those channels as they
/// surface.
///
/// A closed channel anywhere in the list is terminal for the whole call:
/// the error names that channel's position. Listing the same channel more
/// than once is permitted; still exactly one operation fires.
pub fn select<T>(ops: Vec<SelectOp<'_, T>>) -> Result<Selected<T>, SelectError> {
    if ops.is_empty() {
        return Err(SelectError::NoOperations);
    }

    let mut channels = Vec::with_capacity(ops.len());
    let mut directions = Vec::with_capacity(ops.len());
    let mut slots = Vec::with_capacity(ops.len());
    for op in ops {
        let (channel, direction, value) = match op {
            SelectOp::Send(channel, value) => (channel, Direction::Send, Some(value)),
            SelectOp::Recv(channel) => (channel, Direction::Recv, None),
        };
        channels.push(channel);
        directions.push(direction);
        slots.push(OpSlot { direction, value });
    }

    let request = Arc::new(Request::new(Payload::Select(slots)));

    let mut must_wait = true;
    for (index, channel) in channels.iter().enumerate() {
        match channel.scan_select(&request, index, directions[index]) {
            Attempt::Queued => {}
            Attempt::Decided => {
                must_wait = false;
                break;
            }
            // Another channel fired mid-scan; its signal is on the way.
            Attempt::Lost => break,
        }
    }
    if must_wait {
        request.sem.wait();
    }

    let mut req = request.state.lock().unwrap();
    match req.completion() {
        Some(done) => match done.outcome {
            Outcome::Delivered => Ok(Selected {
                index: done.index,
                value: req.take_recv_value(done.index),
            }),
            Outcome::Closed => Err(SelectError::Closed { index: done.index }),
        },
        None => Err(SelectError::Closed { index: 0 }),
    }
}
