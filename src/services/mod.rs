pub mod troca_service;

pub use troca_service::{ActionSuccess, PageData, TrocaService};
