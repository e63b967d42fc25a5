//! Country and visa definitions consumed by the eligibility engine.
//!
//! The catalog is pure data: a list of countries, each carrying its visa
//! pathways tagged by purpose. Adding a country means adding an entry (in code
//! via [`VisaCatalog::standard`] or in a JSON document loaded at startup), never
//! touching the engine.

mod standard;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::Purpose;

/// One scoring criterion of a visa and its maximum points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointCategory {
    pub category: String,
    pub available: u32,
    pub details: String,
}

impl PointCategory {
    pub fn new(category: &str, available: u32, details: &str) -> Self {
        Self {
            category: category.to_string(),
            available,
            details: details.to_string(),
        }
    }
}

/// Static rule set for a country's visa pathway serving one purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDefinition {
    pub purpose: Purpose,
    pub name: String,
    pub description: String,
    pub base_score: f64,
    pub min_funds: u64,
    /// Explicit spouse increment; derived from `min_funds` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_funds: Option<u64>,
    /// Explicit per-dependent increment; derived from `min_funds` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_funds: Option<u64>,
    pub processing_time: String,
    pub points: Vec<PointCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Country-specific documents appended to the standard requirement list.
    #[serde(default)]
    pub requirements: Vec<String>,
    pub visas: Vec<VisaDefinition>,
}

impl CountryEntry {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(query))
    }

    pub fn visas_for(&self, purpose: Purpose) -> impl Iterator<Item = &VisaDefinition> {
        self.visas.iter().filter(move |visa| visa.purpose == purpose)
    }

    pub fn purposes(&self) -> Vec<Purpose> {
        Purpose::ALL
            .into_iter()
            .filter(|purpose| self.visas_for(*purpose).next().is_some())
            .collect()
    }
}

/// Lightweight listing for populating the country picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub name: String,
    pub aliases: Vec<String>,
    pub purposes: Vec<Purpose>,
}

/// Immutable, validated country/visa table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaCatalog {
    countries: Vec<CountryEntry>,
}

impl VisaCatalog {
    /// Build a catalog after checking every entry.
    pub fn new(countries: Vec<CountryEntry>) -> Result<Self, CatalogError> {
        let catalog = Self { countries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Built-in table for Australia, Canada and the United Kingdom.
    pub fn standard() -> Self {
        Self {
            countries: standard::countries(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: VisaCatalog = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.countries
    }

    /// Resolve a country by canonical name or alias, ignoring case.
    pub fn lookup(&self, country: &str) -> Option<&CountryEntry> {
        self.countries.iter().find(|entry| entry.matches(country))
    }

    pub fn visas_for(&self, country: &str, purpose: Purpose) -> Vec<&VisaDefinition> {
        self.lookup(country)
            .map(|entry| entry.visas_for(purpose).collect())
            .unwrap_or_default()
    }

    pub fn countries(&self) -> Vec<CountrySummary> {
        self.countries
            .iter()
            .map(|entry| CountrySummary {
                name: entry.name.clone(),
                aliases: entry.aliases.clone(),
                purposes: entry.purposes(),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();

        for entry in &self.countries {
            if entry.name.trim().is_empty() {
                return Err(CatalogError::EmptyCountryName);
            }

            for key in std::iter::once(&entry.name).chain(entry.aliases.iter()) {
                if !seen.insert(key.trim().to_ascii_lowercase()) {
                    return Err(CatalogError::DuplicateCountry(key.clone()));
                }
            }

            for visa in &entry.visas {
                if !(0.0..=1.0).contains(&visa.base_score) {
                    return Err(CatalogError::BaseScoreOutOfRange {
                        country: entry.name.clone(),
                        visa: visa.name.clone(),
                        value: visa.base_score,
                    });
                }
                if visa.points.is_empty() {
                    return Err(CatalogError::NoPointCategories {
                        country: entry.name.clone(),
                        visa: visa.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for VisaCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains a country without a name")]
    EmptyCountryName,
    #[error("country name or alias '{0}' appears more than once")]
    DuplicateCountry(String),
    #[error("{country} / {visa}: base score {value} must be between 0 and 1")]
    BaseScoreOutOfRange {
        country: String,
        visa: String,
        value: f64,
    },
    #[error("{country} / {visa}: visa defines no point categories")]
    NoPointCategories { country: String, visa: String },
}
