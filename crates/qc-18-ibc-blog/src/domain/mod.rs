//! # Domain Module
//!
//! Core domain types for the IBC Blog subsystem.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod packet;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use packet::*;
pub use value_objects::*;
