//! Checklist state engine.
//!
//! Holds a tree of categories and items, applies user mutations, persists
//! snapshots through a [`io::gateway::PersistenceGateway`], and encodes the
//! whole state into a URL-safe token for sharing.

pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
pub mod util;

pub use io::session::Session;
pub use model::{Category, Checklist, EngineConfig, Item};
pub use ops::command::Command;
pub use parse::token::{DecodeError, decode, encode};
