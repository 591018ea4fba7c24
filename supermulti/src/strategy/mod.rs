//! Strategy engine module
//!
//! Provides the strategy trait, the indicator catalog, declarative signal
//! predicates and the SuperMulti variants.

pub mod base;
pub mod frame;
pub mod predicate;
pub mod signal;
pub mod super_multi;
pub mod variant;

pub use base::*;
pub use frame::*;
pub use predicate::*;
pub use signal::*;
pub use super_multi::*;
pub use variant::*;
