//! Catalog registry
//!
//! Maps the short catalog names users type to the cone search endpoints
//! behind them, together with an optional default column selection per
//! catalog. The builtin table covers the SDSS DR7, 2MASS, UKIDSS DR8 and
//! USNO services; additional entries can be merged in from a user catalog
//! file (see [`crate::config`]).

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when resolving catalog names
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),
}

/// A named cone search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Short name users type on the command line
    pub name: String,
    /// Service endpoint. Cone parameters are appended to this URL.
    pub endpoint_url: String,
    /// Columns selected by the `preset` token. Empty means no preset.
    #[serde(default)]
    pub default_columns: Vec<String>,
}

impl CatalogEntry {
    fn new(name: &str, endpoint_url: &str, default_columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            endpoint_url: endpoint_url.to_string(),
            default_columns: default_columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

lazy_static! {
    /// Services of interest, keyed by the names the original scripts used
    static ref BUILTIN_CATALOGS: Vec<CatalogEntry> = vec![
        CatalogEntry::new(
            "sdss-7Glx",
            "http://wfaudata.roe.ac.uk/sdssdr7-dsa/DirectCone?DSACAT=SDSS_DR7&DSATAB=Galaxy&",
            &["ra", "dec", "petroMag_r"],
        ),
        CatalogEntry::new(
            "sdss-7PhO",
            "http://wfaudata.roe.ac.uk/sdssdr7-dsa/DirectCone?DSACAT=SDSS_DR7&DSATAB=PhotoObj&",
            &["ra", "dec", "psfMag_r"],
        ),
        CatalogEntry::new(
            "2mass",
            "http://wfaudata.roe.ac.uk/twomass-dsa/DirectCone?DSACAT=TWOMASS&DSATAB=twomass_psc&",
            &["ra", "dec", "j_m", "h_m", "k_m"],
        ),
        CatalogEntry::new(
            "ukidss-8",
            "http://wfaudata.roe.ac.uk/ukidssDR8-dsa/DirectCone?DSACAT=UKIDSS_DR8&DSATAB=lasSource&",
            &["ra", "dec", "yAperMag3", "jAperMag3", "kAperMag3"],
        ),
        CatalogEntry::new(
            "usno-a2.0",
            "http://archive.noao.edu/nvo/usno.php?cat=sa&",
            &[],
        ),
        CatalogEntry::new(
            "usno-a2",
            "http://www.nofs.navy.mil/cgi-bin/vo_cone.cgi?CAT=USNO-A2&",
            &[],
        ),
        CatalogEntry::new(
            "usno-b1",
            "http://www.nofs.navy.mil/cgi-bin/vo_cone.cgi?CAT=USNO-B1&",
            &[],
        ),
    ];
}

/// Ordered, immutable-after-load set of catalog entries
#[derive(Debug, Clone)]
pub struct CatalogRegistry {
    entries: Vec<CatalogEntry>,
}

impl CatalogRegistry {
    /// The builtin service table
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_CATALOGS.clone(),
        }
    }

    /// Build a registry from an explicit entry list
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Merge additional entries. An entry whose name matches an existing
    /// one replaces it; new names are appended in order.
    pub fn merge(&mut self, extra: Vec<CatalogEntry>) {
        for entry in extra {
            match self.entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => *existing = entry,
                None => self.entries.push(entry),
            }
        }
    }

    /// Look up a catalog by name
    pub fn resolve(&self, name: &str) -> Result<&CatalogEntry, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| RegistryError::UnknownCatalog(name.to_string()))
    }

    /// All registered catalogs, in registration order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Number of registered catalogs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
