//! Strategy parameters: declarations, defaults and hyperopt binding

pub mod catalog;
pub mod decl;
pub mod values;

pub use catalog::*;
pub use decl::*;
pub use values::*;
