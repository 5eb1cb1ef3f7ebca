pub mod memory;
pub mod query_builder;
pub mod store;
pub mod supabase;

pub use memory::MemoryStore;
pub use query_builder::QueryBuilder;
pub use store::{DiamanteStore, SharedStore, StoreError};
pub use supabase::SupabaseStore;
