pub mod config_io;
pub mod diagnostics;
pub mod gateway;
pub mod loader;
pub mod recovery;
pub mod session;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use gateway::{FileGateway, GatewayError, MemoryGateway, PersistenceGateway};
pub use loader::{LoadSource, Loaded, load_state};
