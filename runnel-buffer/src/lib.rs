//! Fixed-capacity FIFO storage for runnel channels.
//!
//! ## Features
//!
//! - `RingBuffer`: Exact-capacity FIFO ring over a boxed slice.
//!
//! The ring is not internally synchronized. A channel owns one and mutates it
//! under its own lock, so every operation here takes `&mut self`.
//!
//! ## Usage
//!
//! ```rust
//! use runnel_buffer::RingBuffer;
//!
//! let mut ring = RingBuffer::new(2);
//! assert!(ring.push(1).is_ok());
//! assert!(ring.push(2).is_ok());
//! assert_eq!(ring.push(3), Err(3));
//! assert_eq!(ring.pop(), Some(1));
//! ```

#![warn(missing_docs)]

pub mod ring;

pub use ring::RingBuffer;
