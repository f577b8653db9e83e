//! Adapter implementations for identity ports.

pub mod memory;
pub mod postgres;
