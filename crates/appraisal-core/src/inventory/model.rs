use serde::{Deserialize, Serialize};

use crate::types::SquareFeet;

/// Current wire-format version of the inventory document. An external
/// migration step upgrades older saved trees before handing them to the
/// engine.
pub const SCHEMA_VERSION: u32 = 1;

/// The full improvements inventory: a tree of Parcel → Building → Area.
///
/// Square footage lives only on Areas; parcel- and building-level totals are
/// always derived bottom-up and never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub schema_version: u32,
    pub parcels: Vec<Parcel>,
}

/// A taxable land unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_parcel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub buildings: Vec<Building>,
}

/// A structure on a parcel. A building with zero areas has zero derived
/// square footage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    /// Free text; may be "N/A".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_remodeled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction_type: Option<ConstructionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityGrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub areas: Vec<Area>,
}

/// The unit that carries square footage and use classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub use_type: UseType,
    pub sf: SquareFeet,
    pub sf_type: SfType,
    /// Overrides the owning building's year for this area only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built_override: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Use classification for an area. `Custom` carries its free-text label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseType {
    Office,
    #[default]
    Warehouse,
    Retail,
    Apartment,
    Industrial,
    Flex,
    Sfr,
    Custom(String),
}

impl UseType {
    /// Bucket key used by the square-footage rollups: the canonical label for
    /// closed variants, the free text for custom areas.
    pub fn bucket_key(&self) -> &str {
        match self {
            UseType::Office => "office",
            UseType::Warehouse => "warehouse",
            UseType::Retail => "retail",
            UseType::Apartment => "apartment",
            UseType::Industrial => "industrial",
            UseType::Flex => "flex",
            UseType::Sfr => "sfr",
            UseType::Custom(label) => label,
        }
    }
}

impl std::fmt::Display for UseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UseType::Office => write!(f, "Office"),
            UseType::Warehouse => write!(f, "Warehouse"),
            UseType::Retail => write!(f, "Retail"),
            UseType::Apartment => write!(f, "Apartment"),
            UseType::Industrial => write!(f, "Industrial"),
            UseType::Flex => write!(f, "Flex"),
            UseType::Sfr => write!(f, "Single-Family Residential"),
            UseType::Custom(label) => write!(f, "{label}"),
        }
    }
}

/// How an area's square footage is measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SfType {
    #[default]
    #[serde(rename = "GBA")]
    Gba,
    #[serde(rename = "NRA")]
    Nra,
    #[serde(rename = "other")]
    Other(String),
}

/// Building construction system, as captured in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    SteelFrame,
    ReinforcedConcrete,
    Masonry,
    WoodFrame,
    Metal,
    TiltUp,
    PrefabMetal,
}

/// Construction quality grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityGrade {
    Low,
    Fair,
    #[default]
    Average,
    Good,
    Excellent,
    Luxury,
}

/// Observed condition of a building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionRating {
    Excellent,
    Good,
    #[default]
    Average,
    Fair,
    Poor,
}

impl Area {
    /// Effective construction year for this area: its own override when set,
    /// otherwise the owning building's year.
    pub fn effective_year(&self, building_year: Option<i32>) -> Option<i32> {
        self.year_built_override.or(building_year)
    }
}

impl Building {
    /// Derived square footage: the sum of this building's areas.
    pub fn total_sf(&self) -> SquareFeet {
        self.areas.iter().map(|a| a.sf).sum()
    }

    /// Earliest effective year across areas, falling back to the building's
    /// own year when no area resolves one.
    pub fn earliest_effective_year(&self) -> Option<i32> {
        self.areas
            .iter()
            .filter_map(|a| a.effective_year(self.year_built))
            .min()
            .or(self.year_built)
    }

    /// The use type of the largest area by square footage. Ties keep the
    /// first area in inventory order.
    pub fn dominant_use_type(&self) -> Option<&UseType> {
        let mut dominant: Option<&Area> = None;
        for area in &self.areas {
            match dominant {
                Some(best) if area.sf <= best.sf => {}
                _ => dominant = Some(area),
            }
        }
        dominant.map(|a| &a.use_type)
    }
}

impl Inventory {
    /// Look up a building anywhere in the tree, with its owning parcel.
    pub fn find_building(&self, building_id: &str) -> Option<(&Parcel, &Building)> {
        self.parcels.iter().find_map(|p| {
            p.buildings
                .iter()
                .find(|b| b.id == building_id)
                .map(|b| (p, b))
        })
    }
}
