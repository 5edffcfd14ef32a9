//! Cone search execution
//!
//! The service round trip sits behind the [`ConeSearchService`] trait so
//! binaries use the blocking HTTP client while tests inject a canned
//! implementation. One request, one response; no retries, no caching.

mod http;

pub use http::HttpConeSearch;

use thiserror::Error;

use crate::table::ResultTable;

/// Errors raised by a cone search round trip
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The endpoint could not be reached or the transport failed
    #[error("Service not responding: {0}")]
    ServiceUnavailable(String),

    /// The service answered, but with an error instead of a table
    #[error("Query returned error: {0}")]
    QueryRejected(String),
}

/// A cone search position and radius, all in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryRequest {
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    /// Search radius in degrees
    pub radius_deg: f64,
}

/// A single-shot cone search against one endpoint.
///
/// Finding no sources is a success with an empty table, not an error.
pub trait ConeSearchService {
    fn execute(
        &self,
        request: &QueryRequest,
        endpoint_url: &str,
    ) -> Result<ResultTable, QueryError>;
}
