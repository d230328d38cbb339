//! Best-effort mapping of geocoder region strings onto canonical state names.
//!
//! Geocoders disagree on formatting and sometimes answer in a regional
//! script, so resolution runs through three tiers in priority order:
//!
//! 1. exact alias-table hit (case-sensitive, regional-script keys are exact);
//! 2. case-insensitive equality with a canonical name;
//! 3. bidirectional case-insensitive substring test, first canonical name in
//!    enumeration order wins.
//!
//! Anything else resolves to `None` and the caller leaves the field blank.

mod climate;
mod regions;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::errors::RegionTableError;

pub use climate::{climate_zone, ClimateZone};
pub use regions::{CANONICAL_REGIONS, REGION_ALIASES};

static INDIA: Lazy<LocationResolver> = Lazy::new(LocationResolver::india);

/// Shared resolver over the built-in Indian region tables.
pub fn default_resolver() -> &'static LocationResolver {
    &INDIA
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    canonical: Vec<String>,
    lowered: Vec<String>,
    aliases: HashMap<String, usize>,
}

impl LocationResolver {
    /// Resolver over the 28 states and 8 union territories.
    pub fn india() -> Self {
        let mut aliases = HashMap::with_capacity(REGION_ALIASES.len());
        for (alias, target) in REGION_ALIASES {
            if let Some(index) = CANONICAL_REGIONS.iter().position(|name| name == target) {
                aliases.insert((*alias).to_string(), index);
            }
        }
        Self {
            canonical: CANONICAL_REGIONS.iter().map(|name| name.to_string()).collect(),
            lowered: CANONICAL_REGIONS.iter().map(|name| name.to_lowercase()).collect(),
            aliases,
        }
    }

    /// Builds a resolver from custom tables, checking that every alias points
    /// at a canonical entry and that canonical names are unique.
    pub fn with_tables<C, A, K, V>(canonical: C, aliases: A) -> Result<Self, RegionTableError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let canonical: Vec<String> = canonical.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for name in &canonical {
            if !seen.insert(name.to_lowercase()) {
                return Err(RegionTableError::DuplicateRegion(name.clone()));
            }
        }

        let mut table = HashMap::new();
        for (alias, target) in aliases {
            let alias = alias.into();
            let target = target.as_ref();
            let index = canonical
                .iter()
                .position(|name| name == target)
                .ok_or_else(|| RegionTableError::UnknownTarget {
                    alias: alias.clone(),
                    target: target.to_string(),
                })?;
            table.insert(alias, index);
        }

        Ok(Self {
            lowered: canonical.iter().map(|name| name.to_lowercase()).collect(),
            canonical,
            aliases: table,
        })
    }

    pub fn resolve(&self, region: Option<&str>) -> Option<&str> {
        let trimmed = region?.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(index) = self.aliases.get(trimmed) {
            tracing::trace!(input = trimmed, "region resolved via alias table");
            return Some(&self.canonical[*index]);
        }

        let needle = trimmed.to_lowercase();
        if let Some(index) = self.lowered.iter().position(|name| *name == needle) {
            return Some(&self.canonical[index]);
        }

        let fallback = self
            .lowered
            .iter()
            .position(|name| name.contains(&needle) || needle.contains(name.as_str()));
        match fallback {
            Some(index) => {
                tracing::debug!(
                    input = trimmed,
                    resolved = %self.canonical[index],
                    "region resolved via substring fallback"
                );
                Some(&self.canonical[index])
            }
            None => {
                tracing::debug!(input = trimmed, "region could not be resolved");
                None
            }
        }
    }

    /// Convenience for plain string input.
    pub fn resolve_str(&self, region: &str) -> Option<&str> {
        self.resolve(Some(region))
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical.iter().any(|candidate| candidate == name)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.canonical.iter().map(String::as_str)
    }
}
