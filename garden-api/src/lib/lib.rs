pub mod config;
pub mod inbound;
