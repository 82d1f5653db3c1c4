//! static-fifo - fixed-capacity FIFO ring buffer
//!
//! A first-in-first-out queue over an inline `[T; N]` array. The capacity is a
//! const generic, so the core type never allocates.
//!
//! - **RingBuffer**: bulk push/pull/read, single-element push/pop, dropping,
//!   overwrite-on-full, cursor-independent equality
//! - **Iteration**: borrowing oldest-to-newest view
//! - **Unchecked access**: opt-in raw slot access for hot paths
//! - **Stage**: policy-driven producer/consumer wrapper with counters and tracing
//!
//! # Quick Start
//!
//! ```
//! use static_fifo::RingBuffer;
//!
//! let mut fifo = RingBuffer::<i32, 4>::from_slice(&[1, 2, 3]);
//! assert_eq!(fifo.push_slice(&[4, 5], false), 0); // does not fit, nothing written
//! assert_eq!(fifo.push_slice(&[4, 5], true), 2); // evicts the oldest
//!
//! let mut out = [0; 4];
//! assert_eq!(fifo.pull(&mut out), 4);
//! assert_eq!(out, [2, 3, 4, 5]);
//! ```
//!
//! Not thread-safe: every mutating method takes `&mut self`, and sharing a
//! buffer across threads needs a lock supplied by the caller.

pub mod config;
pub mod errors;
pub mod fifo;
pub mod iter;
pub mod stage;
pub mod telemetry;
pub mod unchecked;

pub use config::{OverflowPolicy, StageConfig};
pub use errors::FifoError;
pub use fifo::RingBuffer;
pub use iter::Iter;
pub use stage::{Stage, StageStats};
pub use unchecked::UncheckedAccess;
