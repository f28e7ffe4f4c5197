//! Public data types for the relay

pub mod generation;

pub use generation::*;
