//! Stratum identity: region, sex and location enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::FeatureVector;
use crate::errors::{EdoError, ErrorInfo};

fn unknown_label(kind: &str, value: &str) -> EdoError {
    EdoError::Schema(
        ErrorInfo::new("unknown-category", format!("unknown {kind} label"))
            .with_context(kind, value),
    )
}

macro_rules! regions {
    ($($variant:ident => $label:literal),+ $(,)?) => {
        /// Closed set of regions: the 36 Nigerian states plus FCT Abuja.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum Region {
            $(
                #[doc = $label]
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Region {
            /// Every region in canonical (alphabetical, FCT last) order.
            pub const ALL: &'static [Region] = &[$(Region::$variant),+];

            /// Display label used in tables.
            pub const fn label(self) -> &'static str {
                match self {
                    $(Region::$variant => $label),+
                }
            }
        }
    };
}

regions! {
    Abia => "Abia",
    Adamawa => "Adamawa",
    AkwaIbom => "Akwa Ibom",
    Anambra => "Anambra",
    Bauchi => "Bauchi",
    Bayelsa => "Bayelsa",
    Benue => "Benue",
    Borno => "Borno",
    CrossRiver => "Cross River",
    Delta => "Delta",
    Ebonyi => "Ebonyi",
    Edo => "Edo",
    Ekiti => "Ekiti",
    Enugu => "Enugu",
    Gombe => "Gombe",
    Imo => "Imo",
    Jigawa => "Jigawa",
    Kaduna => "Kaduna",
    Kano => "Kano",
    Katsina => "Katsina",
    Kebbi => "Kebbi",
    Kogi => "Kogi",
    Kwara => "Kwara",
    Lagos => "Lagos",
    Nasarawa => "Nasarawa",
    Niger => "Niger",
    Ogun => "Ogun",
    Ondo => "Ondo",
    Osun => "Osun",
    Oyo => "Oyo",
    Plateau => "Plateau",
    Rivers => "Rivers",
    Sokoto => "Sokoto",
    Taraba => "Taraba",
    Yobe => "Yobe",
    Zamfara => "Zamfara",
    FctAbuja => "FCT Abuja",
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = EdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.label() == trimmed)
            .ok_or_else(|| unknown_label("region", s))
    }
}

/// Sex category of a stratum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Both categories in draw order.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Table label.
    pub const fn label(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = EdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            _ => Err(unknown_label("sex", s)),
        }
    }
}

/// Location category of a stratum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Urban area; receives the urban bonus during synthesis.
    Urban,
    /// Rural area.
    Rural,
}

impl Location {
    /// Both categories in draw order.
    pub const ALL: [Location; 2] = [Location::Urban, Location::Rural];

    /// Table label.
    pub const fn label(self) -> &'static str {
        match self {
            Location::Urban => "urban",
            Location::Rural => "rural",
        }
    }

    /// Whether the stratum is urban.
    pub const fn is_urban(self) -> bool {
        matches!(self, Location::Urban)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Location {
    type Err = EdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "urban" => Ok(Location::Urban),
            "rural" => Ok(Location::Rural),
            _ => Err(unknown_label("location", s)),
        }
    }
}

/// Identity of a (region, sex, location) stratum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StratumKey {
    /// Region the stratum belongs to.
    pub region: Region,
    /// Sex category.
    pub sex: Sex,
    /// Location category.
    pub location: Location,
}

impl StratumKey {
    /// Creates a new key.
    pub const fn new(region: Region, sex: Sex, location: Location) -> Self {
        Self {
            region,
            sex,
            location,
        }
    }

    /// Enumerates every key for `regions` in synthesis order.
    pub fn enumerate(regions: &[Region]) -> Vec<StratumKey> {
        let mut keys = Vec::with_capacity(regions.len() * 4);
        for &region in regions {
            for sex in Sex::ALL {
                for location in Location::ALL {
                    keys.push(StratumKey::new(region, sex, location));
                }
            }
        }
        keys
    }
}

impl fmt::Display for StratumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.sex, self.location)
    }
}

/// Row-level view shared by individual and cleaned records.
///
/// Stages that only need stratum membership, features and the outcome (the
/// aggregator, the modeling frame) accept any implementor.
pub trait StratumRecord {
    /// Stratum the row belongs to.
    fn stratum(&self) -> StratumKey;

    /// Continuous features of the row.
    fn features(&self) -> &FeatureVector;

    /// Binary outcome of the row.
    fn outcome(&self) -> bool;
}
