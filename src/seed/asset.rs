//! Asset — a subject (character, place, object) tagged with descriptors

use super::level::{self, Level, LevelFields};
use super::default_next_fib;
use crate::error::{Result, SeedError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const FIELDS: LevelFields<'static> = LevelFields {
    next_fib: "next_fib",
    level_up: "level_up",
    unit: "descriptors",
};

/// Raw, unvalidated form of an asset as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetRecord {
    pub name: String,
    #[serde(default = "default_next_fib")]
    pub next_fib: u64,
    #[serde(default)]
    pub descriptors: BTreeSet<String>,
    #[serde(default)]
    pub level_up: bool,
    #[serde(default)]
    pub strict: bool,
}

/// A named subject holding descriptor names.
///
/// `level_up` flips on whenever the descriptor count lands on a Fibonacci
/// number; uneven assets are the ones worth prompting for more detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    name: String,
    descriptors: BTreeSet<String>,
    next_fib: u64,
    level_up: bool,
    strict: bool,
}

impl Asset {
    pub fn new(name: &str) -> Self {
        let level = Level::of(0);
        Self {
            name: name.to_lowercase(),
            descriptors: BTreeSet::new(),
            next_fib: level.next_fib,
            level_up: level.level_up,
            strict: false,
        }
    }

    pub fn load(record: AssetRecord) -> Result<Self> {
        let AssetRecord {
            name,
            mut next_fib,
            descriptors,
            mut level_up,
            strict,
        } = record;

        // Lower-case first: "Hair" and "hair" are one descriptor.
        let descriptors: BTreeSet<String> = descriptors.iter().map(|d| d.to_lowercase()).collect();

        level::reconcile(
            &FIELDS,
            descriptors.len(),
            &mut next_fib,
            &mut level_up,
            strict,
        )?;

        Ok(Self {
            name: name.to_lowercase(),
            descriptors,
            next_fib,
            level_up,
            strict,
        })
    }

    pub fn dump(&self) -> AssetRecord {
        AssetRecord {
            name: self.name.clone(),
            next_fib: self.next_fib,
            descriptors: self.descriptors.clone(),
            level_up: self.level_up,
            strict: self.strict,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::load(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.dump())?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptors(&self) -> &BTreeSet<String> {
        &self.descriptors
    }

    /// Descriptors read as hashtags
    pub fn hashtags(&self) -> &BTreeSet<String> {
        &self.descriptors
    }

    pub fn next_fib(&self) -> u64 {
        self.next_fib
    }

    pub fn level_up(&self) -> bool {
        self.level_up
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn num_descriptors(&self) -> usize {
        self.descriptors.len()
    }

    pub fn has_descriptor(&self, descriptor_name: &str) -> bool {
        self.descriptors.contains(&descriptor_name.to_lowercase())
    }

    pub fn add_descriptor(&mut self, descriptor_name: &str) {
        self.descriptors.insert(descriptor_name.to_lowercase());
        self.set_level();
    }

    /// Remove a descriptor name; fails when it is not present
    pub fn remove_descriptor(&mut self, descriptor_name: &str) -> Result<()> {
        let descriptor_name = descriptor_name.to_lowercase();
        if !self.descriptors.remove(&descriptor_name) {
            return Err(SeedError::DescriptorNotLinked {
                asset: self.name.clone(),
                descriptor: descriptor_name,
            });
        }
        self.set_level();
        Ok(())
    }

    /// The descriptor count is not a Fibonacci number
    pub fn is_uneven(&self) -> bool {
        !self.level_up
    }

    fn set_level(&mut self) {
        let level = Level::of(self.descriptors.len());
        self.next_fib = level.next_fib;
        self.level_up = level.level_up;
    }
}
