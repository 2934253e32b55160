use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::models::{
    DroughtTolerance::{self, High, Low, Medium},
    MatchKind, TraitMatch, TraitRecord,
};

/// Curated trait table shared read-only by every request
static CURATED: LazyLock<Arc<TraitTable>> =
    LazyLock::new(|| Arc::new(TraitTable::new(curated_entries())));

/// Friendly names for curated keys, used when the catalog is bypassed
static DISPLAY_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("olea europaea", "Olive Tree"),
        ("lavandula angustifolia", "Lavender"),
        ("rosmarinus officinalis", "Rosemary"),
        ("salvia officinalis", "Sage"),
        ("thymus vulgaris", "Thyme"),
        ("origanum vulgare", "Oregano"),
        ("nerium oleander", "Oleander"),
        ("myrtus communis", "Myrtle"),
        ("laurus nobilis", "Bay Laurel"),
    ])
});

const MEDITERRANEAN: &[&str] = &["mediterranean"];
const TEMPERATE: &[&str] = &["temperate"];
const TROPICAL: &[&str] = &["tropical"];
const TROPICAL_MEDITERRANEAN: &[&str] = &["tropical", "mediterranean"];

fn record(
    drought: DroughtTolerance,
    sun: u8,
    humidity: u8,
    temp_min: f64,
    temp_max: f64,
    native_regions: &'static [&'static str],
) -> TraitRecord {
    TraitRecord {
        drought,
        sun,
        humidity,
        temp_min,
        temp_max,
        native_regions,
    }
}

fn curated_entries() -> Vec<(&'static str, TraitRecord)> {
    vec![
        // Trees
        ("olea europaea", record(High, 9, 4, -10.0, 40.0, MEDITERRANEAN)),
        ("pinus halepensis", record(High, 9, 3, -15.0, 40.0, MEDITERRANEAN)),
        ("quercus ilex", record(High, 8, 5, -15.0, 40.0, MEDITERRANEAN)),
        ("cupressus sempervirens", record(High, 9, 4, -15.0, 40.0, MEDITERRANEAN)),
        // Herbs
        ("lavandula angustifolia", record(High, 8, 3, -15.0, 35.0, MEDITERRANEAN)),
        ("rosmarinus officinalis", record(High, 8, 4, -10.0, 40.0, MEDITERRANEAN)),
        ("salvia officinalis", record(High, 8, 4, -15.0, 35.0, MEDITERRANEAN)),
        ("thymus vulgaris", record(High, 8, 3, -20.0, 35.0, MEDITERRANEAN)),
        ("origanum vulgare", record(High, 7, 4, -15.0, 35.0, MEDITERRANEAN)),
        // Shrubs
        ("nerium oleander", record(High, 9, 4, -10.0, 45.0, MEDITERRANEAN)),
        ("myrtus communis", record(High, 8, 5, -10.0, 40.0, MEDITERRANEAN)),
        ("cistus", record(High, 9, 3, -10.0, 40.0, MEDITERRANEAN)),
        ("laurus nobilis", record(Medium, 7, 5, -10.0, 35.0, MEDITERRANEAN)),
        // Garden plants
        ("rosa", record(Medium, 7, 6, -20.0, 35.0, TEMPERATE)),
        ("geranium", record(Medium, 6, 5, -5.0, 30.0, TEMPERATE)),
        ("bougainvillea", record(High, 9, 4, 0.0, 40.0, TROPICAL_MEDITERRANEAN)),
        // Vegetables
        ("allium", record(Medium, 6, 5, -15.0, 30.0, TEMPERATE)),
        ("ocimum basilicum", record(Low, 7, 6, 10.0, 35.0, TROPICAL)),
        ("petroselinum crispum", record(Medium, 5, 6, -5.0, 30.0, TEMPERATE)),
    ]
}

/// Lowercases and collapses runs of whitespace to single spaces
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Friendly name for a curated key, or the key itself when none is mapped
pub fn display_name(scientific_name: &str) -> String {
    let normalized = normalize_name(scientific_name);
    DISPLAY_NAMES
        .get(normalized.as_str())
        .map(|name| name.to_string())
        .unwrap_or_else(|| scientific_name.to_string())
}

/// Immutable mapping from normalized scientific name to traits
///
/// Iteration follows insertion order so containment matching is reproducible.
#[derive(Debug, Clone)]
pub struct TraitTable {
    entries: Vec<(String, TraitRecord)>,
    index: HashMap<String, usize>,
}

impl TraitTable {
    /// Builds a table, normalizing keys; the first entry for a key wins
    pub fn new<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, TraitRecord)>) -> Self {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (key, record) in entries {
            let key = normalize_name(key.as_ref());
            if key.is_empty() || table.index.contains_key(&key) {
                continue;
            }
            table.index.insert(key.clone(), table.entries.len());
            table.entries.push((key, record));
        }

        table
    }

    /// The process-wide curated table
    pub fn curated() -> Arc<TraitTable> {
        Arc::clone(&CURATED)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraitRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    fn get(&self, key: &str) -> Option<(&str, &TraitRecord)> {
        self.index.get(key).map(|&i| {
            let (key, record) = &self.entries[i];
            (key.as_str(), record)
        })
    }

    /// Resolves a noisy scientific name: exact key, then genus key, then containment
    ///
    /// Containment accepts an entry when the name contains the key or the key
    /// contains the name's genus token. The second half lets short genus tokens
    /// match unrelated keys; it is kept as is.
    pub fn lookup(&self, scientific_name: &str) -> TraitMatch<'_> {
        let normalized = normalize_name(scientific_name);
        if normalized.is_empty() {
            return TraitMatch::Absent;
        }

        if let Some((key, record)) = self.get(&normalized) {
            return TraitMatch::Found {
                key,
                record,
                via: MatchKind::Exact,
            };
        }

        let genus = normalized.split(' ').next().unwrap_or_default();
        if let Some((key, record)) = self.get(genus) {
            return TraitMatch::Found {
                key,
                record,
                via: MatchKind::Genus,
            };
        }

        self.iter()
            .find(|(key, _)| normalized.contains(key) || key.contains(genus))
            .map(|(key, record)| TraitMatch::Found {
                key,
                record,
                via: MatchKind::Containment,
            })
            .unwrap_or(TraitMatch::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_table() -> TraitTable {
        TraitTable::new(vec![
            ("olea europaea", record(High, 9, 4, -10.0, 40.0, MEDITERRANEAN)),
            ("Allium", record(Medium, 6, 5, -15.0, 30.0, TEMPERATE)),
            ("cistus", record(High, 9, 3, -10.0, 40.0, MEDITERRANEAN)),
        ])
    }

    fn matched_key<'a>(result: TraitMatch<'a>) -> Option<(&'a str, MatchKind)> {
        match result {
            TraitMatch::Found { key, via, .. } => Some((key, via)),
            TraitMatch::Absent => None,
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Olea   Europaea "), "olea europaea");
        assert_eq!(normalize_name("OLEA\teuropaea"), "olea europaea");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_exact_match_after_normalization() {
        let table = stub_table();
        assert_eq!(
            matched_key(table.lookup("Olea Europaea")),
            Some(("olea europaea", MatchKind::Exact))
        );
    }

    #[test]
    fn test_genus_match() {
        let table = stub_table();
        assert_eq!(
            matched_key(table.lookup("Allium schoenoprasum")),
            Some(("allium", MatchKind::Genus))
        );
    }

    #[test]
    fn test_containment_of_curated_key() {
        let table = stub_table();
        assert_eq!(
            matched_key(table.lookup("Halimiocistus sahucii")),
            Some(("cistus", MatchKind::Containment))
        );
    }

    #[test]
    fn test_containment_of_genus_token() {
        let table = stub_table();
        // "olea" is contained in the curated key "olea europaea"
        assert_eq!(
            matched_key(table.lookup("Olea capensis")),
            Some(("olea europaea", MatchKind::Containment))
        );
    }

    #[test]
    fn test_no_match_is_absent() {
        let table = stub_table();
        assert_eq!(table.lookup("Quercus robur"), TraitMatch::Absent);
        assert_eq!(table.lookup("   "), TraitMatch::Absent);
    }

    #[test]
    fn test_short_genus_matches_first_containing_key() {
        let table = TraitTable::curated();
        // "ro" is a substring of "europaea", the first curated key
        assert_eq!(
            matched_key(table.lookup("Ro sp.")),
            Some(("olea europaea", MatchKind::Containment))
        );
    }

    #[test]
    fn test_curated_table_keeps_insertion_order() {
        let table = TraitTable::curated();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).take(3).collect();
        assert_eq!(keys, vec!["olea europaea", "pinus halepensis", "quercus ilex"]);
        assert_eq!(table.len(), 19);
    }

    #[test]
    fn test_curated_lookup_of_cultivar() {
        let table = TraitTable::curated();
        assert_eq!(
            matched_key(table.lookup("Nerium oleander var. album")),
            Some(("nerium oleander", MatchKind::Containment))
        );
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let table = TraitTable::new(vec![
            ("rosa", record(Medium, 7, 6, -20.0, 35.0, TEMPERATE)),
            ("ROSA", record(Low, 1, 1, 0.0, 1.0, TEMPERATE)),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("rosa").record().unwrap().sun, 7);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name("olea europaea"), "Olive Tree");
        assert_eq!(display_name("Laurus Nobilis"), "Bay Laurel");
        assert_eq!(display_name("pinus halepensis"), "pinus halepensis");
    }
}
