pub mod devolver;
pub mod list;
pub mod serve;
