pub mod escape;
pub mod share;
pub mod snapshot;
pub mod token;

pub use share::{query_value, share_link};
pub use snapshot::{SnapshotError, parse_snapshot, serialize_snapshot};
pub use token::{DecodeError, decode, encode};
