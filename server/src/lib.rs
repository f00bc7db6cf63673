pub extern crate actix_web;

pub mod config;
pub mod error;
pub mod execution;
pub mod handlers;
pub mod server;
