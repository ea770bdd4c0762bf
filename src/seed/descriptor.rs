//! Descriptor — a hashtag that accumulates Fibonacci-length descriptions
//!
//! A descriptor can be shared by several assets. It only tracks asset names;
//! the assets themselves live in the owning `MainSeed`.

use super::level::{self, Level, LevelFields};
use super::default_next_fib;
use crate::error::{Result, SeedError};
use crate::fibonacci;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const FIELDS: LevelFields<'static> = LevelFields {
    next_fib: "next_fib",
    level_up: "level_up",
    unit: "descriptions",
};

/// Raw, unvalidated form of a descriptor as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptorRecord {
    pub name: String,
    #[serde(default = "default_next_fib")]
    pub next_fib: u64,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub level_up: bool,
    #[serde(default)]
    pub asset_links: BTreeSet<String>,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    descriptions: Vec<String>,
    next_fib: u64,
    level_up: bool,
    asset_links: BTreeSet<String>,
    strict: bool,
}

impl Descriptor {
    /// Create an empty descriptor
    pub fn new(name: &str) -> Self {
        let level = Level::of(0);
        Self {
            name: name.to_lowercase(),
            descriptions: Vec::new(),
            next_fib: level.next_fib,
            level_up: level.level_up,
            asset_links: BTreeSet::new(),
            strict: false,
        }
    }

    /// Build a descriptor from raw data, validating and sanitizing it
    pub fn load(record: DescriptorRecord) -> Result<Self> {
        // Word counts are content; strictness never relaxes them.
        for description in &record.descriptions {
            check_length(description)?;
        }

        let DescriptorRecord {
            name,
            mut next_fib,
            descriptions,
            mut level_up,
            asset_links,
            strict,
        } = record;

        level::reconcile(
            &FIELDS,
            descriptions.len(),
            &mut next_fib,
            &mut level_up,
            strict,
        )?;

        Ok(Self {
            name: name.to_lowercase(),
            descriptions: descriptions.iter().map(|d| d.to_lowercase()).collect(),
            next_fib,
            level_up,
            asset_links: asset_links.iter().map(|a| a.to_lowercase()).collect(),
            strict,
        })
    }

    pub fn dump(&self) -> DescriptorRecord {
        DescriptorRecord {
            name: self.name.clone(),
            next_fib: self.next_fib,
            descriptions: self.descriptions.clone(),
            level_up: self.level_up,
            asset_links: self.asset_links.clone(),
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

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn next_fib(&self) -> u64 {
        self.next_fib
    }

    pub fn level_up(&self) -> bool {
        self.level_up
    }

    pub fn asset_links(&self) -> &BTreeSet<String> {
        &self.asset_links
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn num_descriptions(&self) -> usize {
        self.descriptions.len()
    }

    /// Whether the lower-cased `description` is already stored
    pub fn contains(&self, description: &str) -> bool {
        let description = description.to_lowercase();
        self.descriptions.iter().any(|d| *d == description)
    }

    /// Append a description. Its word count must be a Fibonacci number.
    ///
    /// Duplicates are not rejected here; `MainSeed::add_description` does that.
    pub fn add_description(&mut self, description: &str) -> Result<()> {
        check_length(description)?;
        self.descriptions.push(description.to_lowercase());
        self.set_level();
        Ok(())
    }

    /// Remove the first matching description
    pub fn remove_description(&mut self, description: &str) -> Result<()> {
        let description = description.to_lowercase();
        let index = self
            .descriptions
            .iter()
            .position(|d| *d == description)
            .ok_or_else(|| SeedError::DescriptionNotFound {
                descriptor: self.name.clone(),
                description,
            })?;
        self.descriptions.remove(index);
        self.set_level();
        Ok(())
    }

    pub fn link_asset(&mut self, asset_name: &str) {
        self.asset_links.insert(asset_name.to_lowercase());
    }

    /// Drop an asset link. Unknown names are ignored.
    pub fn remove_link(&mut self, asset_name: &str) {
        self.asset_links.remove(&asset_name.to_lowercase());
    }

    /// Not linked to any asset
    pub fn is_dangling(&self) -> bool {
        self.asset_links.is_empty()
    }

    pub fn is_multi_asset_linked(&self) -> bool {
        self.asset_links.len() > 1
    }

    /// The description count is not a Fibonacci number
    pub fn is_uneven(&self) -> bool {
        !self.level_up
    }

    fn set_level(&mut self) {
        let level = Level::of(self.descriptions.len());
        self.next_fib = level.next_fib;
        self.level_up = level.level_up;
    }
}

/// Reject blank descriptions and word counts off the Fibonacci sequence.
fn check_length(description: &str) -> Result<usize> {
    let words = fibonacci::num_words(description);
    if words == 0 || !fibonacci::is_fibonacci(words as i64) {
        return Err(SeedError::FailedDescriptionLength {
            words,
            description: description.to_string(),
        });
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> DescriptorRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_new_descriptor() {
        let desc = Descriptor::new("Hair");
        assert_eq!(desc.name(), "hair");
        assert_eq!(desc.next_fib(), 1);
        assert!(desc.is_dangling());
        assert_eq!(desc.num_descriptions(), 0);
    }

    #[test]
    fn test_add_description() {
        let mut desc = Descriptor::new("hair");

        desc.add_description("Red").unwrap();
        assert!(desc.descriptions().contains(&"red".to_string()));
        assert_eq!((desc.next_fib(), desc.level_up()), (2, true));

        desc.add_description("blue sky").unwrap();
        assert_eq!((desc.next_fib(), desc.level_up()), (3, true));

        desc.add_description("white").unwrap();
        assert_eq!((desc.next_fib(), desc.level_up()), (5, true));

        desc.add_description("three word phrase").unwrap();
        assert_eq!(desc.num_descriptions(), 4);
        assert_eq!((desc.next_fib(), desc.level_up()), (5, false));
        assert!(desc.is_uneven());
    }

    #[test]
    fn test_add_description_wrong_length() {
        let mut desc = Descriptor::new("hair");
        let err = desc.add_description("black shoes and socks").unwrap_err();
        assert!(matches!(err, SeedError::FailedDescriptionLength { words: 4, .. }));
        assert_eq!(desc.num_descriptions(), 0);
        assert_eq!(desc.next_fib(), 1);
    }

    #[test]
    fn test_add_blank_description() {
        let mut desc = Descriptor::new("hair");
        assert!(matches!(
            desc.add_description("   "),
            Err(SeedError::FailedDescriptionLength { words: 0, .. })
        ));
    }

    #[test]
    fn test_remove_description() {
        let mut desc = Descriptor::new("hair");
        desc.add_description("red").unwrap();
        desc.add_description("blue sky").unwrap();

        desc.remove_description("RED").unwrap();
        assert_eq!(desc.descriptions(), ["blue sky".to_string()]);
        assert_eq!((desc.next_fib(), desc.level_up()), (2, true));

        let err = desc.remove_description("red").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_descriptor_sharing() {
        let mut desc = Descriptor::new("hair");
        assert!(!desc.is_multi_asset_linked());

        desc.link_asset("character1");
        assert!(!desc.is_multi_asset_linked());

        // Linking twice is a no-op
        desc.link_asset("Character1");
        assert_eq!(desc.asset_links().len(), 1);

        desc.link_asset("setting1");
        assert!(desc.is_multi_asset_linked());

        desc.remove_link("character1");
        assert!(!desc.is_multi_asset_linked());

        desc.remove_link("setting1");
        desc.remove_link("setting1");
        assert!(desc.is_dangling());
    }

    #[test]
    fn test_load_normalizes() {
        let desc = Descriptor::load(record(
            r#"{"name":"EYES","descriptions":["Green"],"next_fib":2,"level_up":true,"asset_links":["Billy"]}"#,
        ))
        .unwrap();
        assert_eq!(desc.name(), "eyes");
        assert_eq!(desc.descriptions(), ["green".to_string()]);
        assert!(desc.asset_links().contains("billy"));
    }

    #[test]
    fn test_load_strict_rejects_stale_level() {
        let err = Descriptor::load(record(
            r#"{"name":"eyes","descriptions":["green","blue"],"next_fib":2,"level_up":true,"strict":true}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, SeedError::SeedValidation(ref m) if m.contains("next_fib: 2 for 2 descriptions")));
    }

    #[test]
    fn test_load_sanitizes_stale_level() {
        let desc = Descriptor::load(record(
            r#"{"name":"eyes","descriptions":["green","blue","grey","hazel"],"next_fib":2,"level_up":true}"#,
        ))
        .unwrap();
        assert_eq!((desc.next_fib(), desc.level_up()), (5, false));
    }

    #[test]
    fn test_load_rejects_bad_description_even_when_lenient() {
        let err = Descriptor::load(record(
            r#"{"name":"eyes","descriptions":["one two three four"],"next_fib":2,"level_up":true}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, SeedError::FailedDescriptionLength { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Descriptor::from_json(r#"{"name":"eyes","colour":"green"}"#).unwrap_err();
        assert!(matches!(err, SeedError::Json(_)));
    }

    #[test]
    fn test_round_trip() {
        let mut desc = Descriptor::new("hair");
        desc.add_description("red").unwrap();
        desc.link_asset("billy");

        let json = desc.to_json().unwrap();
        let reloaded = Descriptor::from_json(&json).unwrap();
        assert_eq!(reloaded, desc);
        assert_eq!(reloaded.dump(), desc.dump());
    }
}
