pub mod action;
pub mod load;

// Re-export handler functions for use in routing
pub use action::post as solicitar_troca_post;
pub use load::get as solicitar_troca_get;
