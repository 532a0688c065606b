pub mod pool;
pub mod repository;

pub use repository::{Entity, FieldList, InsertRow, Repository, SparseUpdate};
