// One module per page route, plus service-level endpoints
pub mod solicitar_troca;
pub mod system;
