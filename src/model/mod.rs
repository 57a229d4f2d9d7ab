pub mod checklist;
pub mod config;
pub mod defaults;

pub use checklist::*;
pub use config::*;
pub use defaults::{default_checklist, is_protected};
