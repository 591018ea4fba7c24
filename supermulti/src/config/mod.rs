//! Configuration module

pub mod env;
pub mod protection;
pub mod strategy;

pub use env::*;
pub use protection::*;
pub use strategy::*;
