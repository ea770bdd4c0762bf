//! Seed model — descriptors, assets and the MainSeed that owns them
//!
//! Every counted collection carries a `(next_fib, level_up)` pair derived
//! from its size. Raw records go through `load`, which either repairs stale
//! pairs or, in strict mode, rejects them.

mod level;
mod descriptor;
mod asset;
mod main_seed;

pub use level::Level;
pub use descriptor::{Descriptor, DescriptorRecord};
pub use asset::{Asset, AssetRecord};
pub use main_seed::{BrokenLink, MainSeed, MainSeedRecord};

/// `next_fib` of an empty collection, used when a record omits the field
pub(crate) fn default_next_fib() -> u64 {
    1
}
