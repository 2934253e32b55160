use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier assigned by the plant catalog, unique per catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogId(pub u64);

impl Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog search hit of unknown horticultural fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCandidate {
    pub id: CatalogId,
    pub common_name: Option<String>,
    /// Arbitrary casing and whitespace, resolved against the trait table
    pub scientific_name: String,
    pub family: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroughtTolerance {
    Low,
    Medium,
    High,
}

impl DroughtTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroughtTolerance::Low => "low",
            DroughtTolerance::Medium => "medium",
            DroughtTolerance::High => "high",
        }
    }
}

impl std::fmt::Display for DroughtTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DroughtTolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(DroughtTolerance::Low),
            "medium" => Ok(DroughtTolerance::Medium),
            "high" => Ok(DroughtTolerance::High),
            other => Err(format!("unknown drought tolerance '{}'", other)),
        }
    }
}

/// Curated horticultural profile for one species or genus
#[derive(Debug, Clone, PartialEq)]
pub struct TraitRecord {
    pub drought: DroughtTolerance,
    /// Sun requirement, 1-10
    pub sun: u8,
    /// Humidity preference, 1-10
    pub humidity: u8,
    pub temp_min: f64,
    pub temp_max: f64,
    pub native_regions: &'static [&'static str],
}

// ============================================================================
// Trefle API Types
// ============================================================================

/// Raw response from GET /plants/search
#[derive(Debug, Clone, Deserialize)]
pub struct TrefleSearchResponse {
    #[serde(default)]
    pub data: Vec<TreflePlant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreflePlant {
    pub id: u64,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TreflePlant {
    /// Converts to a candidate, dropping records that carry no scientific name
    pub fn into_candidate(self) -> Option<CatalogCandidate> {
        let scientific_name = self
            .scientific_name
            .filter(|name| !name.trim().is_empty())?;

        Some(CatalogCandidate {
            id: CatalogId(self.id),
            common_name: self.common_name.filter(|n| !n.trim().is_empty()),
            scientific_name,
            family: self.family.filter(|f| !f.trim().is_empty()),
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
        })
    }
}
