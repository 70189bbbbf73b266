use crate::error::{CloseError, DestroyError, RecvError, SendError, TryRecvError, TrySendError};
use crate::request::{Direction, Outcome, Payload, Request};
use crate::waiters::WaiterQueue;
use runnel_buffer::RingBuffer;
use std::sync::{Arc, Mutex};

/// Channel state behind the lock. The buffer, both waiter queues and the
/// closed flag are only ever touched while holding it.
struct State<T> {
    buffer: RingBuffer<T>,
    send_waiters: WaiterQueue<T>,
    recv_waiters: WaiterQueue<T>,
    closed: bool,
}

/// Result of one select-scan step against a single channel.
pub(crate) enum Attempt {
    /// This channel completed the request: the operation fired or the
    /// channel's closure terminated the whole call. The completion record
    /// says which.
    Decided,
    /// Another channel completed the request first; its signal fires.
    Lost,
    /// The buffer could not serve the operation; a registration was queued.
    Queued,
}

/// A buffered, thread-safe message channel with an explicit lifecycle.
///
/// A channel holds a fixed-capacity FIFO of messages. Send and receive come
/// in blocking and non-blocking flavors; blocked callers are queued per
/// direction and served strictly in registration order. `close` wakes every
/// queued caller with a closed error and makes all future operations fail;
/// `destroy` releases buffered messages once the channel is closed.
///
/// Handles are cheap to clone and share the same channel.
pub struct Channel<T> {
    state: Arc<Mutex<State<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> Channel<T> {
    /// Creates a channel with a buffer of exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Unbuffered rendezvous channels are not
    /// supported.
    pub fn new(capacity: usize) -> Channel<T> {
        assert!(capacity > 0, "channel capacity must be greater than zero");
        Channel {
            state: Arc::new(Mutex::new(State {
                buffer: RingBuffer::new(capacity),
                send_waiters: WaiterQueue::new(),
                recv_waiters: WaiterQueue::new(),
                closed: false,
            })),
        }
    }

    /// Sends a value, blocking while the buffer is full.
    ///
    /// On a full buffer the calling thread is queued and sleeps until a
    /// receive frees a slot, at which point the receiver deposits the value
    /// on its behalf. The error carries the value back when the channel is
    /// closed, or closes while the call is queued.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let request = {
            let mut state = self.state.lock().unwrap();
            if state.closed {
                return Err(SendError(value));
            }
            match state.buffer.push(value) {
                Ok(()) => {
                    state.serve_receiver();
                    return Ok(());
                }
                Err(value) => {
                    let request = Arc::new(Request::new(Payload::Send(Some(value))));
                    state.send_waiters.register(request.clone(), 0);
                    request
                }
            }
        };

        request.sem.wait();

        // A server that delivered the value took it out of the request; a
        // value still in place means the channel closed first.
        let mut req = request.state.lock().unwrap();
        match req.take_send_value(0) {
            None => Ok(()),
            Some(value) => Err(SendError(value)),
        }
    }

    /// Receives a value, blocking while the buffer is empty.
    ///
    /// On an empty buffer the calling thread is queued and sleeps until a
    /// send arrives; the sender hands the message over directly.
    pub fn recv(&self) -> Result<T, RecvError> {
        let request = {
            let mut state = self.state.lock().unwrap();
            if state.closed {
                return Err(RecvError);
            }
            if let Some(value) = state.buffer.pop() {
                state.serve_sender();
                return Ok(value);
            }
            let request = Arc::new(Request::new(Payload::Recv(None)));
            state.recv_waiters.register(request.clone(), 0);
            request
        };

        request.sem.wait();

        let mut req = request.state.lock().unwrap();
        match req.take_recv_value(0) {
            Some(value) => Ok(value),
            None => Err(RecvError),
        }
    }

    /// Attempts to send without blocking.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(TrySendError::Closed(value));
        }
        match state.buffer.push(value) {
            Ok(()) => {
                state.serve_receiver();
                Ok(())
            }
            Err(value) => Err(TrySendError::Full(value)),
        }
    }

    /// Attempts to receive without blocking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(TryRecvError::Closed);
        }
        match state.buffer.pop() {
            Some(value) => {
                state.serve_sender();
                Ok(value)
            }
            None => Err(TryRecvError::Empty),
        }
    }

    /// Closes the channel.
    ///
    /// Every queued sender, receiver and select registration is woken with a
    /// closed error; all future operations fail immediately. Closing an
    /// already closed channel reports the error with no side effects.
    pub fn close(&self) -> Result<(), CloseError> {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(CloseError);
        }
        state.closed = true;
        State::drain_closed(&mut state.send_waiters);
        State::drain_closed(&mut state.recv_waiters);
        Ok(())
    }

    /// Releases every buffered message.
    ///
    /// The channel must already be closed; an open channel is left untouched
    /// and fully usable. Once a channel is closed its waiter queues are
    /// empty and stay that way, so only buffered messages remain to drop.
    pub fn destroy(&self) -> Result<(), DestroyError> {
        let mut state = self.state.lock().unwrap();
        if !state.closed {
            return Err(DestroyError);
        }
        debug_assert!(state.send_waiters.is_empty());
        debug_assert!(state.recv_waiters.is_empty());
        state.buffer.clear();
        Ok(())
    }

    /// Returns the fixed capacity the channel was created with.
    pub fn capacity(&self) -> usize {
        self.state.lock().unwrap().buffer.capacity()
    }

    /// Returns the number of buffered messages.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().buffer.len()
    }

    /// Returns `true` if the buffer holds no messages.
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().buffer.is_empty()
    }

    /// Returns `true` if the buffer is at capacity.
    pub fn is_full(&self) -> bool {
        self.state.lock().unwrap().buffer.is_full()
    }

    /// Returns `true` once the channel has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }

    /// One step of a select scan: attempt operation `index` against this
    /// channel, queueing a registration if the buffer cannot serve it now.
    ///
    /// The request lock is taken while the channel lock is held; the
    /// validity check and the buffer operation happen inside that critical
    /// section, so no other channel can fire the same request concurrently.
    pub(crate) fn scan_select(
        &self,
        request: &Arc<Request<T>>,
        index: usize,
        direction: Direction,
    ) -> Attempt {
        let mut state = self.state.lock().unwrap();
        let mut req = request.state.lock().unwrap();
        if !req.valid {
            return Attempt::Lost;
        }
        if state.closed {
            req.complete(Outcome::Closed, index);
            return Attempt::Decided;
        }
        match direction {
            Direction::Send => {
                if state.buffer.is_full() {
                    state.send_waiters.register(request.clone(), index);
                    return Attempt::Queued;
                }
                let Some(value) = req.take_send_value(index) else {
                    return Attempt::Lost;
                };
                let deposited = state.buffer.push(value);
                debug_assert!(deposited.is_ok());
                req.complete(Outcome::Delivered, index);
                drop(req);
                state.serve_receiver();
                Attempt::Decided
            }
            Direction::Recv => match state.buffer.pop() {
                None => {
                    state.recv_waiters.register(request.clone(), index);
                    Attempt::Queued
                }
                Some(value) => {
                    let kept = req.fill_recv_slot(index, value);
                    debug_assert!(kept.is_ok());
                    req.complete(Outcome::Delivered, index);
                    drop(req);
                    state.serve_sender();
                    Attempt::Decided
                }
            },
        }
    }
}

impl<T> State<T> {
    /// Hands the buffered head to the oldest live queued receiver, if any.
    ///
    /// Called after every successful deposit. Stale entries surfacing at the
    /// head are discarded; at most one live waiter is served per event.
    fn serve_receiver(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        loop {
            let Some(waiter) = self.recv_waiters.pop() else {
                return;
            };
            let mut req = waiter.request.state.lock().unwrap();
            if !req.valid {
                continue;
            }
            let Some(value) = self.buffer.pop() else {
                return;
            };
            let kept = req.fill_recv_slot(waiter.index, value);
            debug_assert!(kept.is_ok());
            req.complete(Outcome::Delivered, waiter.index);
            drop(req);
            waiter.request.sem.notify();
            return;
        }
    }

    /// Deposits the oldest live queued sender's value into the freed slot,
    /// if any. Called after every successful take; the mirror image of
    /// [`State::serve_receiver`].
    fn serve_sender(&mut self) {
        if self.buffer.is_full() {
            return;
        }
        loop {
            let Some(waiter) = self.send_waiters.pop() else {
                return;
            };
            let mut req = waiter.request.state.lock().unwrap();
            if !req.valid {
                continue;
            }
            let Some(value) = req.take_send_value(waiter.index) else {
                continue;
            };
            let deposited = self.buffer.push(value);
            debug_assert!(deposited.is_ok());
            req.complete(Outcome::Delivered, waiter.index);
            drop(req);
            waiter.request.sem.notify();
            return;
        }
    }

    /// Close-time drain: every still-valid registration is completed with
    /// the closed outcome and its own index; no buffer operation occurs.
    /// Stale entries are simply dropped.
    fn drain_closed(queue: &mut WaiterQueue<T>) {
        while let Some(waiter) = queue.pop() {
            let mut req = waiter.request.state.lock().unwrap();
            if !req.valid {
                continue;
            }
            req.complete(Outcome::Closed, waiter.index);
            drop(req);
            waiter.request.sem.notify();
        }
    }
}
