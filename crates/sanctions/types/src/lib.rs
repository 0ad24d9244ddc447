//! Sanction Domain Types
//!
//! This crate defines the domain types for community sanctions, time-boxed
//! votes held as discussion threads that may end in an automated
//! enactment (for example a block) when the proposal passes.
//!
//! # Key Concepts
//!
//! - **Topic identifier**: the opaque, case-insensitive token carried in a
//!   discussion thread's title. It names exactly one sanction.
//! - **Sanction**: the record bound to a topic. Its tally is frozen once the
//!   voting window expires, and it can only be enacted after expiring.
//! - **Votes**: derived from thread replies. This crate never stores them; it
//!   only describes the aggregated tally.
//! - **Notification decisions**: the explicit three-valued outcome consulted
//!   by the notification boundary before dispatch.
//!
//! # Architecture
//!
//! This is a pure types crate with no runtime dependencies. All types
//! implement `Clone`, `Debug`, `Serialize`, `Deserialize`.

#![deny(unsafe_code)]

mod actor;
mod errors;
mod notification;
mod receipt;
mod sanction;
mod thread;
mod topic_id;
mod vote;

pub use actor::*;
pub use errors::*;
pub use notification::*;
pub use receipt::*;
pub use sanction::*;
pub use thread::*;
pub use topic_id::*;
pub use vote::*;
