//! Upstream provider adapters

pub mod kie;
