pub mod prom_response;
pub mod retry;
