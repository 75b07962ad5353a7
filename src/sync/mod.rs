//! State synchronization between peers.
//!
//! Peers stay consistent by replaying the same moves through the same
//! deterministic resolver. Snapshots are only for catching a peer up (late
//! join, reconnect), never for merging individual moves.
//!
//! Two encodings of the same record list are provided: JSON text for the
//! room transport and bincode for compact storage or binary channels.

mod synchronizer;

pub use synchronizer::{StateSynchronizer, SyncRecord};
