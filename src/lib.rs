pub mod config;
pub mod domain;
pub mod logging;
pub mod messages;
pub mod network;
pub mod repository;
pub mod scope;
pub mod session;
pub mod ui;
