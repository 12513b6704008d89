//! Physical addresses of companies, warehouses and vehicles.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::validation::ensure_not_blank;
use crate::model::ValueObject;

/// Continental region used for coarse location classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    Asia,
    NorthAmerica,
    SouthAmerica,
    Australia,
    Antarctica,
}

/// Street address. Every text field must be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    region: Region,
    country: String,
    city: String,
    street: String,
    building: String,
}

impl Location {
    pub fn new(
        region: Region,
        country: impl Into<String>,
        city: impl Into<String>,
        street: impl Into<String>,
        building: impl Into<String>,
    ) -> DomainResult<Self> {
        let location = Self {
            region,
            country: country.into(),
            city: city.into(),
            street: street.into(),
            building: building.into(),
        };
        ensure_not_blank("country", &location.country)?;
        ensure_not_blank("city", &location.city)?;
        ensure_not_blank("street", &location.street)?;
        ensure_not_blank("building", &location.building)?;
        Ok(location)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn building(&self) -> &str {
        &self.building
    }
}

impl ValueObject for Location {}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} {}, {}, {}",
            self.street, self.building, self.city, self.country
        )
    }
}

#[derive(Deserialize)]
struct RawLocation {
    region: Region,
    country: String,
    city: String,
    street: String,
    building: String,
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawLocation::deserialize(deserializer)?;
        Location::new(raw.region, raw.country, raw.city, raw.street, raw.building)
            .map_err(serde::de::Error::custom)
    }
}
