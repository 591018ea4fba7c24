//! Entry protections evaluated against an external trade ledger

pub mod ledger;
pub mod policy;

pub use ledger::*;
pub use policy::*;
