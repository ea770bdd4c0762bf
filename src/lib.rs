//! Seed — Fibonacci-gated growth of a labeled text corpus
//!
//! Descriptions accumulate under descriptors, descriptors attach to assets,
//! and every collection levels up when its size lands on a Fibonacci number.

pub mod error;
pub mod fibonacci;
pub mod seed;
pub mod storage;

pub use error::{Result, SeedError};
pub use seed::{Asset, Descriptor, Level, MainSeed};
pub use storage::{SeedStore, StoreConfig};
