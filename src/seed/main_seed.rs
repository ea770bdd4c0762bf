//! MainSeed — the aggregate root that owns every descriptor and asset
//!
//! Assets relate to each other only through shared descriptors: two siblings
//! share a "parents" descriptor, two cities share a "state" descriptor. The
//! seed keeps both sides of every asset ↔ descriptor link in step and tracks
//! a global level pair for each of its two maps.

use super::asset::{Asset, AssetRecord};
use super::descriptor::{Descriptor, DescriptorRecord};
use super::level::{self, Level, LevelFields};
use super::default_next_fib;
use crate::error::{Result, SeedError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

const DESC_FIELDS: LevelFields<'static> = LevelFields {
    next_fib: "global_desc_next_fib",
    level_up: "global_desc_level_up",
    unit: "descriptors",
};

const ASSET_FIELDS: LevelFields<'static> = LevelFields {
    next_fib: "global_assets_next_fib",
    level_up: "global_assets_level_up",
    unit: "assets",
};

/// Raw, unvalidated form of a whole seed as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MainSeedRecord {
    #[serde(default)]
    pub global_descriptors: BTreeMap<String, DescriptorRecord>,
    #[serde(default)]
    pub global_desc_level_up: bool,
    #[serde(default = "default_next_fib")]
    pub global_desc_next_fib: u64,
    #[serde(default)]
    pub global_assets: BTreeMap<String, AssetRecord>,
    #[serde(default)]
    pub global_assets_level_up: bool,
    #[serde(default = "default_next_fib")]
    pub global_assets_next_fib: u64,
    #[serde(default)]
    pub strict: bool,
}

/// An asset ↔ descriptor reference that only one side knows about
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrokenLink {
    pub asset: String,
    pub descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainSeed {
    global_descriptors: BTreeMap<String, Descriptor>,
    global_assets: BTreeMap<String, Asset>,
    desc_level: Level,
    assets_level: Level,
    strict: bool,
}

impl Default for MainSeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MainSeed {
    /// Create an empty, non-strict seed
    pub fn new() -> Self {
        Self {
            global_descriptors: BTreeMap::new(),
            global_assets: BTreeMap::new(),
            desc_level: Level::of(0),
            assets_level: Level::of(0),
            strict: false,
        }
    }

    /// Build a seed from raw data.
    ///
    /// Every descriptor and asset is loaded first, each under its own `strict`
    /// flag, then the four global derived fields are checked under the seed's.
    /// A map key must name the entity stored under it.
    pub fn load(record: MainSeedRecord) -> Result<Self> {
        let MainSeedRecord {
            global_descriptors,
            mut global_desc_level_up,
            mut global_desc_next_fib,
            global_assets,
            mut global_assets_level_up,
            mut global_assets_next_fib,
            strict,
        } = record;

        let mut descriptors = BTreeMap::new();
        for (key, raw) in global_descriptors {
            let key = key.to_lowercase();
            let descriptor = Descriptor::load(raw)?;
            check_key("descriptor", &key, descriptor.name())?;
            if descriptors.insert(key.clone(), descriptor).is_some() {
                return Err(SeedError::DuplicateName { kind: "descriptor", name: key });
            }
        }

        let mut assets = BTreeMap::new();
        for (key, raw) in global_assets {
            let key = key.to_lowercase();
            let asset = Asset::load(raw)?;
            check_key("asset", &key, asset.name())?;
            if assets.insert(key.clone(), asset).is_some() {
                return Err(SeedError::DuplicateName { kind: "asset", name: key });
            }
        }

        level::reconcile(
            &DESC_FIELDS,
            descriptors.len(),
            &mut global_desc_next_fib,
            &mut global_desc_level_up,
            strict,
        )?;
        level::reconcile(
            &ASSET_FIELDS,
            assets.len(),
            &mut global_assets_next_fib,
            &mut global_assets_level_up,
            strict,
        )?;

        let seed = Self {
            global_descriptors: descriptors,
            global_assets: assets,
            desc_level: Level {
                next_fib: global_desc_next_fib,
                level_up: global_desc_level_up,
            },
            assets_level: Level {
                next_fib: global_assets_next_fib,
                level_up: global_assets_level_up,
            },
            strict,
        };

        for link in seed.broken_links() {
            warn!(
                "One-sided link between asset {} and descriptor {}",
                link.asset, link.descriptor
            );
        }
        Ok(seed)
    }

    pub fn dump(&self) -> MainSeedRecord {
        MainSeedRecord {
            global_descriptors: self
                .global_descriptors
                .iter()
                .map(|(name, d)| (name.clone(), d.dump()))
                .collect(),
            global_desc_level_up: self.desc_level.level_up,
            global_desc_next_fib: self.desc_level.next_fib,
            global_assets: self
                .global_assets
                .iter()
                .map(|(name, a)| (name.clone(), a.dump()))
                .collect(),
            global_assets_level_up: self.assets_level.level_up,
            global_assets_next_fib: self.assets_level.next_fib,
            strict: self.strict,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::load(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.dump())?)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Strictness only matters the next time this seed is loaded from raw data.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn descriptors(&self) -> &BTreeMap<String, Descriptor> {
        &self.global_descriptors
    }

    pub fn assets(&self) -> &BTreeMap<String, Asset> {
        &self.global_assets
    }

    pub fn descriptor(&self, name: &str) -> Option<&Descriptor> {
        self.global_descriptors.get(&name.to_lowercase())
    }

    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.global_assets.get(&name.to_lowercase())
    }

    pub fn num_descriptors(&self) -> usize {
        self.global_descriptors.len()
    }

    pub fn num_assets(&self) -> usize {
        self.global_assets.len()
    }

    pub fn desc_next_fib(&self) -> u64 {
        self.desc_level.next_fib
    }

    pub fn desc_level_up(&self) -> bool {
        self.desc_level.level_up
    }

    pub fn assets_next_fib(&self) -> u64 {
        self.assets_level.next_fib
    }

    pub fn assets_level_up(&self) -> bool {
        self.assets_level.level_up
    }

    /// Get or create a descriptor
    pub fn ensure_descriptor(&mut self, name: &str) -> &mut Descriptor {
        let count = self.global_descriptors.len() + 1;
        match self.global_descriptors.entry(name.to_lowercase()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Creating descriptor {}", entry.key());
                self.desc_level = Level::of(count);
                let descriptor = Descriptor::new(entry.key());
                entry.insert(descriptor)
            }
        }
    }

    /// Get or create an asset
    pub fn ensure_asset(&mut self, name: &str) -> &mut Asset {
        let count = self.global_assets.len() + 1;
        match self.global_assets.entry(name.to_lowercase()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Creating asset {}", entry.key());
                self.assets_level = Level::of(count);
                let asset = Asset::new(entry.key());
                entry.insert(asset)
            }
        }
    }

    /// Link an existing descriptor to an existing asset, on both sides
    pub fn link_descriptor(&mut self, asset_name: &str, descriptor_name: &str) -> Result<()> {
        let asset_name = asset_name.to_lowercase();
        let descriptor_name = descriptor_name.to_lowercase();

        let asset = self
            .global_assets
            .get_mut(&asset_name)
            .ok_or_else(|| SeedError::AssetNotFound(asset_name.clone()))?;
        let descriptor = self
            .global_descriptors
            .get_mut(&descriptor_name)
            .ok_or_else(|| SeedError::DescriptorNotFound(descriptor_name.clone()))?;

        asset.add_descriptor(&descriptor_name);
        descriptor.link_asset(&asset_name);
        Ok(())
    }

    /// Undo `link_descriptor`; fails when the asset does not hold the descriptor
    pub fn unlink_descriptor(&mut self, asset_name: &str, descriptor_name: &str) -> Result<()> {
        let asset_name = asset_name.to_lowercase();
        let descriptor_name = descriptor_name.to_lowercase();

        let asset = self
            .global_assets
            .get_mut(&asset_name)
            .ok_or_else(|| SeedError::AssetNotFound(asset_name.clone()))?;
        let descriptor = self
            .global_descriptors
            .get_mut(&descriptor_name)
            .ok_or_else(|| SeedError::DescriptorNotFound(descriptor_name.clone()))?;

        asset.remove_descriptor(&descriptor_name)?;
        descriptor.remove_link(&asset_name);
        Ok(())
    }

    /// Add a description to a descriptor, creating the descriptor if needed.
    ///
    /// Returns `false` without touching anything when the lower-cased text is
    /// already present.
    pub fn add_description(&mut self, descriptor_name: &str, description: &str) -> Result<bool> {
        let description = description.to_lowercase();
        let descriptor = self.ensure_descriptor(descriptor_name);

        if descriptor.contains(&description) {
            debug!(
                "Description {:?} has already been added to descriptor {}",
                description,
                descriptor.name()
            );
            return Ok(false);
        }
        descriptor.add_description(&description)?;
        Ok(true)
    }

    pub fn remove_description(&mut self, descriptor_name: &str, description: &str) -> Result<()> {
        let descriptor_name = descriptor_name.to_lowercase();
        self.global_descriptors
            .get_mut(&descriptor_name)
            .ok_or(SeedError::DescriptorNotFound(descriptor_name))?
            .remove_description(description)
    }

    /// Grow descriptor, asset and their link in one call.
    ///
    /// Both entities are created before the description is checked, so a
    /// rejected description still leaves them in place.
    pub fn add_description_to_asset(
        &mut self,
        asset_name: &str,
        descriptor_name: &str,
        description: &str,
    ) -> Result<bool> {
        let asset_name = asset_name.to_lowercase();
        let descriptor_name = descriptor_name.to_lowercase();

        self.ensure_descriptor(&descriptor_name);
        self.ensure_asset(&asset_name);

        let added = self.add_description(&descriptor_name, description)?;
        self.link_descriptor(&asset_name, &descriptor_name)?;
        Ok(added)
    }

    /// Map each descriptor shared with another asset to that asset's name.
    ///
    /// When several assets share one descriptor the last in name order wins;
    /// `shared_descriptor_assets` keeps all of them.
    pub fn asset_relations(&self, asset_name: &str) -> Result<BTreeMap<String, String>> {
        let (name, asset) = self.lookup_asset(asset_name)?;

        let mut relations = BTreeMap::new();
        for (other_name, other) in &self.global_assets {
            if *other_name == name {
                continue;
            }
            for descriptor_name in other.descriptors() {
                if asset.descriptors().contains(descriptor_name) {
                    relations.insert(descriptor_name.clone(), other_name.clone());
                }
            }
        }
        Ok(relations)
    }

    /// Map each shared descriptor to every other asset holding it
    pub fn shared_descriptor_assets(
        &self,
        asset_name: &str,
    ) -> Result<BTreeMap<String, BTreeSet<String>>> {
        let (name, asset) = self.lookup_asset(asset_name)?;

        let mut shared: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (other_name, other) in &self.global_assets {
            if *other_name == name {
                continue;
            }
            for descriptor_name in other.descriptors().intersection(asset.descriptors()) {
                shared
                    .entry(descriptor_name.clone())
                    .or_default()
                    .insert(other_name.clone());
            }
        }
        Ok(shared)
    }

    /// Every description under every descriptor of the asset, flattened
    pub fn export_asset_descriptions(&self, asset_name: &str) -> Result<Vec<String>> {
        let (_, asset) = self.lookup_asset(asset_name)?;

        let mut all_descriptions = Vec::new();
        for descriptor_name in asset.descriptors() {
            let descriptor = self
                .global_descriptors
                .get(descriptor_name)
                .ok_or_else(|| SeedError::DescriptorNotFound(descriptor_name.clone()))?;
            all_descriptions.extend(descriptor.descriptions().iter().cloned());
        }
        Ok(all_descriptions)
    }

    /// Assets whose descriptor count is off the Fibonacci sequence
    pub fn uneven_assets(&self) -> Vec<&Asset> {
        self.global_assets.values().filter(|a| a.is_uneven()).collect()
    }

    /// Descriptors whose description count is off the Fibonacci sequence
    pub fn uneven_descriptors(&self) -> Vec<&Descriptor> {
        self.global_descriptors
            .values()
            .filter(|d| d.is_uneven())
            .collect()
    }

    pub fn dangling_descriptors(&self) -> Vec<&Descriptor> {
        self.global_descriptors
            .values()
            .filter(|d| d.is_dangling())
            .collect()
    }

    /// Links recorded on only one side, or pointing at a missing entity.
    ///
    /// Only raw data can produce these; the mutating operations keep both
    /// sides in step.
    pub fn broken_links(&self) -> Vec<BrokenLink> {
        let mut broken = BTreeSet::new();

        for (asset_name, asset) in &self.global_assets {
            for descriptor_name in asset.descriptors() {
                let linked_back = self
                    .global_descriptors
                    .get(descriptor_name)
                    .is_some_and(|d| d.asset_links().contains(asset_name));
                if !linked_back {
                    broken.insert(BrokenLink {
                        asset: asset_name.clone(),
                        descriptor: descriptor_name.clone(),
                    });
                }
            }
        }

        for (descriptor_name, descriptor) in &self.global_descriptors {
            for asset_name in descriptor.asset_links() {
                let linked_back = self
                    .global_assets
                    .get(asset_name)
                    .is_some_and(|a| a.descriptors().contains(descriptor_name));
                if !linked_back {
                    broken.insert(BrokenLink {
                        asset: asset_name.clone(),
                        descriptor: descriptor_name.clone(),
                    });
                }
            }
        }

        broken.into_iter().collect()
    }

    pub fn summary(&self) -> String {
        let descriptions: usize = self
            .global_descriptors
            .values()
            .map(|d| d.num_descriptions())
            .sum();
        format!(
            "MainSeed | {} assets (next {}, level_up={}) | {} descriptors (next {}, level_up={}) | {} descriptions | strict={}",
            self.num_assets(),
            self.assets_level.next_fib,
            self.assets_level.level_up,
            self.num_descriptors(),
            self.desc_level.next_fib,
            self.desc_level.level_up,
            descriptions,
            self.strict
        )
    }

    fn lookup_asset(&self, asset_name: &str) -> Result<(String, &Asset)> {
        let name = asset_name.to_lowercase();
        match self.global_assets.get(&name) {
            Some(asset) => Ok((name, asset)),
            None => Err(SeedError::AssetNotFound(name)),
        }
    }
}

/// Both sides are already lower-cased
fn check_key(kind: &'static str, key: &str, name: &str) -> Result<()> {
    if key != name {
        return Err(SeedError::NameMismatch {
            kind,
            key: key.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adding_assets() {
        let mut seed = MainSeed::new();
        assert_eq!(seed.assets_next_fib(), 1);

        seed.ensure_asset("DoesNotExist-1");
        assert_eq!(seed.num_assets(), 1);
        assert_eq!(seed.assets_next_fib(), 2);
        assert!(seed.assets_level_up());

        // Re-adding changes nothing
        seed.ensure_asset("doesnotexist-1");
        assert_eq!(seed.num_assets(), 1);
        assert_eq!(seed.assets_next_fib(), 2);

        seed.ensure_asset("DoesNotExist-2");
        assert_eq!((seed.assets_next_fib(), seed.assets_level_up()), (3, true));

        seed.ensure_asset("DoesNotExist-3");
        assert_eq!((seed.assets_next_fib(), seed.assets_level_up()), (5, true));

        seed.ensure_asset("DoesNotExist-4");
        assert_eq!((seed.assets_next_fib(), seed.assets_level_up()), (5, false));
    }

    #[test]
    fn test_adding_descriptors() {
        let mut seed = MainSeed::new();
        assert_eq!(seed.desc_next_fib(), 1);

        for (i, expected) in [(1, 2), (2, 3), (3, 5), (4, 5), (5, 8)] {
            seed.ensure_descriptor(&format!("desc-{i}"));
            assert_eq!(seed.num_descriptors(), i);
            assert_eq!(seed.desc_next_fib(), expected);
        }
        assert!(seed.desc_level_up());
        assert_eq!(seed.ensure_descriptor("DESC-1").name(), "desc-1");
        assert_eq!(seed.num_descriptors(), 5);
    }

    #[test]
    fn test_adding_description_to_asset() {
        let mut seed = MainSeed::new();
        assert!(seed.asset("billy").is_none());

        assert!(seed
            .add_description_to_asset("billy", "soldier", "middle-aged")
            .unwrap());
        assert_eq!(seed.num_assets(), 1);
        assert_eq!(seed.num_descriptors(), 1);
        assert_eq!(seed.desc_next_fib(), 2);
        assert!(seed
            .descriptor("soldier")
            .unwrap()
            .descriptions()
            .contains(&"middle-aged".to_string()));

        // Same call again is a no-op
        assert!(!seed
            .add_description_to_asset("Billy", "Soldier", "Middle-Aged")
            .unwrap());
        assert_eq!(seed.num_assets(), 1);
        assert_eq!(seed.descriptor("soldier").unwrap().num_descriptions(), 1);
        assert_eq!(seed.desc_next_fib(), 2);

        seed.add_description_to_asset("billy", "desc-test-1", "test")
            .unwrap();
        assert_eq!(seed.desc_next_fib(), 3);
        assert_eq!(seed.asset("billy").unwrap().num_descriptors(), 2);
        assert!(seed.descriptor("desc-test-1").unwrap().asset_links().contains("billy"));
    }

    #[test]
    fn test_invalid_description() {
        let mut seed = MainSeed::new();
        let err = seed
            .add_description_to_asset("phoenix", "desert", "this is not fibonacci num in length")
            .unwrap_err();
        assert!(matches!(err, SeedError::FailedDescriptionLength { words: 7, .. }));

        // Entities created before the check stay, but nothing is linked
        assert!(seed.asset("phoenix").unwrap().descriptors().is_empty());
        assert_eq!(seed.descriptor("desert").unwrap().num_descriptions(), 0);
    }

    #[test]
    fn test_link_requires_both_sides() {
        let mut seed = MainSeed::new();
        seed.ensure_descriptor("hair");
        assert!(matches!(
            seed.link_descriptor("billy", "hair"),
            Err(SeedError::AssetNotFound(_))
        ));
        seed.ensure_asset("billy");
        assert!(matches!(
            seed.link_descriptor("billy", "eyes"),
            Err(SeedError::DescriptorNotFound(_))
        ));
        seed.link_descriptor("Billy", "Hair").unwrap();
        assert!(seed.broken_links().is_empty());
    }

    #[test]
    fn test_unlink_descriptor() {
        let mut seed = MainSeed::new();
        seed.add_description_to_asset("billy", "hair", "red").unwrap();

        seed.unlink_descriptor("billy", "hair").unwrap();
        assert!(seed.descriptor("hair").unwrap().is_dangling());
        assert!(seed.asset("billy").unwrap().descriptors().is_empty());

        let err = seed.unlink_descriptor("billy", "hair").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_asset_relations() {
        let mut seed = MainSeed::new();
        seed.add_description_to_asset("brother", "siblings", "close").unwrap();
        seed.add_description_to_asset("sister", "siblings", "close").unwrap();
        seed.add_description_to_asset("sister", "hair", "red").unwrap();

        let brother = seed.asset_relations("brother").unwrap();
        let sister = seed.asset_relations("SISTER").unwrap();
        assert_eq!(brother.get("siblings").map(String::as_str), Some("sister"));
        assert_eq!(sister.get("siblings").map(String::as_str), Some("brother"));
        assert_eq!(sister.len(), 1);

        assert!(matches!(
            seed.asset_relations("bogus_asset"),
            Err(SeedError::AssetNotFound(_))
        ));
    }

    #[test]
    fn test_relations_last_writer_wins() {
        let mut seed = MainSeed::new();
        for asset in ["alice", "bob", "carol"] {
            seed.add_description_to_asset(asset, "team", "blue").unwrap();
        }

        let relations = seed.asset_relations("alice").unwrap();
        assert_eq!(relations.get("team").map(String::as_str), Some("carol"));

        let shared = seed.shared_descriptor_assets("alice").unwrap();
        let team: Vec<_> = shared["team"].iter().map(String::as_str).collect();
        assert_eq!(team, ["bob", "carol"]);
    }

    #[test]
    fn test_export_asset_descriptions() {
        let mut seed = MainSeed::new();
        let short = "TeSt1 TestOne";
        let longer = "This is a much longer sentence that will demonstrate the fibonacci number usage";

        seed.add_description_to_asset("character1", "desc1", short).unwrap();
        seed.add_description_to_asset("character1", "desc1", longer).unwrap();
        assert_eq!(seed.descriptor("desc1").unwrap().next_fib(), 3);
        seed.add_description_to_asset("character1", "desc2", "red").unwrap();

        let exported = seed.export_asset_descriptions("character1").unwrap();
        assert_eq!(exported.len(), 3);
        assert!(exported.contains(&short.to_lowercase()));
        assert!(exported.contains(&longer.to_lowercase()));

        assert!(seed.export_asset_descriptions("nobody").is_err());
    }

    #[test]
    fn test_remove_description() {
        let mut seed = MainSeed::new();
        seed.add_description("hair", "red").unwrap();
        seed.remove_description("Hair", "RED").unwrap();
        assert_eq!(seed.descriptor("hair").unwrap().num_descriptions(), 0);
        assert!(matches!(
            seed.remove_description("eyes", "red"),
            Err(SeedError::DescriptorNotFound(_))
        ));
    }

    #[test]
    fn test_uneven_and_dangling() {
        let mut seed = MainSeed::new();
        for name in ["a", "b", "c", "d"] {
            seed.add_description_to_asset("billy", name, "word").unwrap();
        }
        seed.ensure_descriptor("loose");

        let uneven: Vec<_> = seed.uneven_assets().iter().map(|a| a.name()).collect();
        assert_eq!(uneven, ["billy"]);
        assert!(seed.uneven_descriptors().is_empty());

        let dangling: Vec<_> = seed.dangling_descriptors().iter().map(|d| d.name()).collect();
        assert_eq!(dangling, ["loose"]);
    }

    #[test]
    fn test_round_trip() {
        let mut seed = MainSeed::new();
        seed.add_description_to_asset("billy", "soldier", "middle-aged").unwrap();
        seed.add_description_to_asset("anna", "soldier", "tall").unwrap();
        seed.set_strict(true);

        let reloaded = MainSeed::from_json(&seed.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, seed);
        assert!(reloaded.is_strict());
    }

    #[test]
    fn test_strict_seed_repairs_lenient_children() {
        let json = r#"{
            "global_descriptors": {"hair": {"name": "hair", "descriptions": ["red"], "next_fib": 1, "strict": false}},
            "global_desc_level_up": true,
            "global_desc_next_fib": 2,
            "global_assets_level_up": true,
            "strict": true
        }"#;
        let seed = MainSeed::from_json(json).unwrap();
        let hair = seed.descriptor("hair").unwrap();
        assert_eq!((hair.next_fib(), hair.level_up()), (2, true));
        assert!(!hair.is_strict());
        assert!(seed.is_strict());

        // The seed's own pair is still checked strictly
        let stale_globals = json.replace(r#""global_desc_next_fib": 2"#, r#""global_desc_next_fib": 3"#);
        let err = MainSeed::from_json(&stale_globals).unwrap_err();
        assert!(
            matches!(err, SeedError::SeedValidation(ref m) if m.contains("global_desc_next_fib: 3 for 1 descriptors")),
            "{err}"
        );
    }

    #[test]
    fn test_strict_child_in_lenient_seed() {
        let json = r#"{
            "global_assets": {"billy": {"name": "billy", "next_fib": 5, "strict": true}},
            "global_assets_level_up": true,
            "global_assets_next_fib": 2
        }"#;
        let err = MainSeed::from_json(json).unwrap_err();
        assert!(matches!(err, SeedError::SeedValidation(ref m) if m.contains("next_fib: 5 for 0 descriptors")));
    }

    #[test]
    fn test_ensure_keeps_existing_entities() {
        let mut seed = MainSeed::new();
        seed.add_description("hair", "red").unwrap();
        let level = (seed.desc_next_fib(), seed.desc_level_up());

        let hair = seed.ensure_descriptor("HAIR");
        assert_eq!(hair.descriptions(), ["red"]);
        hair.add_description("long red").unwrap();
        assert_eq!(seed.descriptor("hair").unwrap().num_descriptions(), 2);
        assert_eq!((seed.desc_next_fib(), seed.desc_level_up()), level);

        seed.ensure_asset("billy").add_descriptor("hair");
        assert!(seed.ensure_asset("Billy").has_descriptor("hair"));
        assert_eq!(seed.num_assets(), 1);
        assert_eq!((seed.assets_next_fib(), seed.assets_level_up()), (2, true));
    }

    #[test]
    fn test_key_must_match_name() {
        let json = r#"{"global_assets": {"billy": {"name": "william"}}}"#;
        let err = MainSeed::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            SeedError::NameMismatch { kind: "asset", ref key, ref name } if key == "billy" && name == "william"
        ));

        // Case alone is not a mismatch
        let json = r#"{"global_descriptors": {"Hair": {"name": "HAIR"}}}"#;
        let seed = MainSeed::from_json(json).unwrap();
        assert_eq!(seed.descriptor("hair").unwrap().name(), "hair");
    }

    #[test]
    fn test_duplicate_keys_after_lowercasing() {
        let json = r#"{"global_assets": {"Billy": {"name": "billy"}, "billy": {"name": "billy"}}}"#;
        assert!(matches!(
            MainSeed::from_json(json),
            Err(SeedError::DuplicateName { kind: "asset", .. })
        ));
    }
}
