//! Cone search queries against Virtual Observatory catalog services
//!
//! Searches for sources around a sky position (RA, DEC) within an angular
//! radius, against SDSS, 2MASS, UKIDSS and USNO cone search endpoints or
//! any compatible URL. Results come back as plain text tables that can be
//! projected to a column subset, pretty-printed, or written as CSV.
//!
//! ```no_run
//! use conesearch::{
//!     cone_search, CatalogRegistry, ColumnSelection, HttpConeSearch,
//!     QueryRequest, SearchTarget,
//! };
//!
//! let registry = CatalogRegistry::builtin();
//! let request = QueryRequest { ra: 10.68, dec: 41.27, radius_deg: 0.05 };
//! let table = cone_search(
//!     &registry,
//!     &HttpConeSearch::new(),
//!     &SearchTarget::Catalog("2mass".to_string()),
//!     &request,
//!     &ColumnSelection::Preset,
//! )?;
//! println!("{}", table.render(80));
//! # Ok::<(), conesearch::SearchError>(())
//! ```

pub mod angle;
pub mod catalogs;
pub mod config;
pub mod query;
pub mod search;
pub mod table;

pub use angle::RadiusUnit;
pub use catalogs::{CatalogEntry, CatalogRegistry, RegistryError};
pub use config::{ConfigError, UserConfig};
pub use query::{ConeSearchService, HttpConeSearch, QueryError, QueryRequest};
pub use search::{cone_search, ColumnSelection, SearchError, SearchTarget};
pub use table::{ResultTable, TableError};
