pub mod checklist_ops;
pub mod command;
pub mod id;
pub mod reorder;

pub use checklist_ops::StoreError;
pub use id::{IdSource, RandomIds, SequentialIds, generate_id};
pub use reorder::ReorderEvent;
