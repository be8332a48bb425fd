pub mod api;
pub mod config;
pub mod request_handler;
pub mod router;
pub mod server;
pub mod sharding;
pub mod source;
