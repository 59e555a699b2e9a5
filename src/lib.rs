#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod metrics;
pub mod player;
pub mod preferences;
pub mod round;
pub mod routes;
pub mod session;
pub mod startup;
pub mod websocket;
