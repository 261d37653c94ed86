//! Outer adapters: CSV encoding and the batch driver used by the binary.

pub mod batch;
pub mod csv;
