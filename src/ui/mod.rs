//! Screens and the MVI engine they run on.

pub mod cart;
pub mod home;
pub mod mvi;
pub mod saved;
pub mod search;
