// src/driver/mod.rs
pub mod display;
pub mod http_client;
pub mod network;
pub mod time_source;
