use crate::signal::Signal;
use std::sync::Mutex;

/// Direction of a proposed channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Send,
    Recv,
}

/// How a completed request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The operation was performed against a channel buffer.
    Delivered,
    /// A closed channel terminated the request.
    Closed,
}

/// Outcome of a request plus the index of the channel that decided it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Completion {
    pub(crate) outcome: Outcome,
    pub(crate) index: usize,
}

/// One select operation's direction and payload slot.
///
/// A send slot starts out holding the value to deposit; a receive slot
/// starts empty and is filled by the serving channel.
pub(crate) struct OpSlot<T> {
    pub(crate) direction: Direction,
    pub(crate) value: Option<T>,
}

/// Operation-specific data carried by a request.
pub(crate) enum Payload<T> {
    /// Single blocking send: the value awaiting deposit.
    Send(Option<T>),
    /// Single blocking receive: the slot a server fills.
    Recv(Option<T>),
    /// Select: one slot per operation in the caller's list.
    Select(Vec<OpSlot<T>>),
}

/// Mutable request fields, guarded by the request lock.
pub(crate) struct RequestState<T> {
    /// True until exactly one agent serves or cancels the request. Flipped
    /// only while holding the lock; the flip is the serialization point
    /// deciding which channel's operation fires.
    pub(crate) valid: bool,
    payload: Payload<T>,
    completion: Option<Completion>,
}

/// The shared record coordinating one blocking call, single-channel or
/// select.
///
/// Shared between the owning caller and one queue entry per channel the call
/// is registered with; every entry holds its own `Arc` clone, so the record
/// is freed by whichever side drops the last reference: the owner returning,
/// or the final stale entry being popped from some queue.
pub(crate) struct Request<T> {
    /// Fired at most once, by the agent that completes the request.
    pub(crate) sem: Signal,
    pub(crate) state: Mutex<RequestState<T>>,
}

impl<T> Request<T> {
    pub(crate) fn new(payload: Payload<T>) -> Request<T> {
        Request {
            sem: Signal::new(),
            state: Mutex::new(RequestState {
                valid: true,
                payload,
                completion: None,
            }),
        }
    }
}

impl<T> RequestState<T> {
    /// Takes the value a send-direction registration is waiting to deposit.
    ///
    /// Returns `None` if the value is already gone, meaning the request was
    /// served.
    pub(crate) fn take_send_value(&mut self, index: usize) -> Option<T> {
        match &mut self.payload {
            Payload::Send(value) => value.take(),
            Payload::Select(slots) => match slots.get_mut(index) {
                Some(slot) if slot.direction == Direction::Send => slot.value.take(),
                _ => None,
            },
            Payload::Recv(_) => None,
        }
    }

    /// Stores a value delivered to the receive-direction registration at
    /// `index`, handing it back if the slot cannot accept it.
    pub(crate) fn fill_recv_slot(&mut self, index: usize, value: T) -> Result<(), T> {
        match &mut self.payload {
            Payload::Recv(slot) => {
                *slot = Some(value);
                Ok(())
            }
            Payload::Select(slots) => match slots.get_mut(index) {
                Some(slot) if slot.direction == Direction::Recv && slot.value.is_none() => {
                    slot.value = Some(value);
                    Ok(())
                }
                _ => Err(value),
            },
            Payload::Send(_) => Err(value),
        }
    }

    /// Takes the value a completed receive left behind at `index`.
    pub(crate) fn take_recv_value(&mut self, index: usize) -> Option<T> {
        match &mut self.payload {
            Payload::Recv(slot) => slot.take(),
            Payload::Select(slots) => slots.get_mut(index).and_then(|slot| slot.value.take()),
            Payload::Send(_) => None,
        }
    }

    /// Marks the request served or cancelled and records who decided it.
    pub(crate) fn complete(&mut self, outcome: Outcome, index: usize) {
        self.valid = false;
        self.completion = Some(Completion { outcome, index });
    }

    pub(crate) fn completion(&self) -> Option<Completion> {
        self.completion
    }
}
