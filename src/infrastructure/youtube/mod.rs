pub mod api;
pub mod client;
