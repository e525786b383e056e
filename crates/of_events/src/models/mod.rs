//! # Event Models
//!
//! - `event` - typed event record and the columns the queries read
//! - `collection` - the immutable, ordered set of records under analysis

pub mod collection;
pub mod event;

pub use collection::EventCollection;
pub use event::{EventField, EventRecord, RawRecord};
