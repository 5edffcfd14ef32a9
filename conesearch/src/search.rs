//! The cone search workflow
//!
//! Resolve the target endpoint, run the query, project the requested
//! columns. Both binaries go through [`cone_search`]; the service client
//! is passed in so the whole path runs against a canned service in tests.

use log::{debug, warn};
use thiserror::Error;

use crate::catalogs::{CatalogRegistry, RegistryError};
use crate::query::{ConeSearchService, QueryError, QueryRequest};
use crate::table::{ResultTable, TableError};

/// What to query: a registered catalog name or a raw endpoint URL
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTarget {
    Catalog(String),
    Url(String),
}

/// Which columns to keep from the service response
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSelection {
    /// Everything the service returned
    All,
    /// The target catalog's default column list
    Preset,
    /// An explicit column list, in output order
    Named(Vec<String>),
}

/// Errors raised by the search workflow
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Run one cone search and reduce the result to the selected columns.
///
/// Fails before any service call when the target is unknown or the radius
/// is not a positive angle. A query that legitimately finds nothing
/// returns an empty table.
pub fn cone_search(
    registry: &CatalogRegistry,
    service: &dyn ConeSearchService,
    target: &SearchTarget,
    request: &QueryRequest,
    columns: &ColumnSelection,
) -> Result<ResultTable, SearchError> {
    if !(request.radius_deg > 0.0) || !request.radius_deg.is_finite() {
        return Err(SearchError::InvalidArgument(format!(
            "search radius must be a positive angle, got {} degrees",
            request.radius_deg
        )));
    }

    let (endpoint_url, preset) = match target {
        SearchTarget::Catalog(name) => {
            let entry = registry.resolve(name)?;
            debug!("Database ({}) url: {}", entry.name, entry.endpoint_url);
            (entry.endpoint_url.clone(), entry.default_columns.clone())
        }
        SearchTarget::Url(url) => (url.clone(), Vec::new()),
    };

    let requested = match columns {
        ColumnSelection::All => Vec::new(),
        ColumnSelection::Preset => {
            if preset.is_empty() {
                return Err(SearchError::InvalidArgument(
                    "this target has no column preset".to_string(),
                ));
            }
            preset
        }
        ColumnSelection::Named(names) => {
            // Drop empty names rather than erroring on them
            let usable: Vec<String> = names.iter().filter(|c| !c.is_empty()).cloned().collect();
            if usable.is_empty() && !names.is_empty() {
                warn!("No usable column names given; output will contain all catalog columns");
            }
            usable
        }
    };

    debug!(
        "Position ({},{}) and radius, in degrees, ({})",
        request.ra, request.dec, request.radius_deg
    );

    let table = service.execute(request, &endpoint_url)?;
    let projected = table.project(&requested)?;
    Ok(projected)
}
