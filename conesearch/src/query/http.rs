//! Blocking HTTP cone search client
//!
//! The registered endpoint URLs already carry the service selection
//! parameters; the position and radius are appended as the standard
//! RA/DEC/SR trio. The response body is consumed as comma-separated text:
//! one header line naming the columns, then one line per source.

use log::debug;

use super::{ConeSearchService, QueryError, QueryRequest};
use crate::table::ResultTable;

/// Cone search client backed by a blocking reqwest client
pub struct HttpConeSearch {
    client: reqwest::blocking::Client,
}

impl HttpConeSearch {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpConeSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ConeSearchService for HttpConeSearch {
    fn execute(
        &self,
        request: &QueryRequest,
        endpoint_url: &str,
    ) -> Result<ResultTable, QueryError> {
        let url = build_query_url(endpoint_url, request);
        debug!("Cone search GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| QueryError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| QueryError::ServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(QueryError::QueryRejected(format!(
                "HTTP {} from {}",
                status, endpoint_url
            )));
        }

        let table = parse_table_body(&body)?;
        if table.is_empty() {
            debug!(
                "No sources found for (ra:{}, dec:{}; radius:{})",
                request.ra, request.dec, request.radius_deg
            );
        } else {
            debug!("Number of sources found: {}", table.len());
        }
        Ok(table)
    }
}

/// Append the cone parameters to an endpoint URL, joining with `?` or `&`
/// as the endpoint requires
pub(crate) fn build_query_url(endpoint_url: &str, request: &QueryRequest) -> String {
    let params = format!(
        "RA={}&DEC={}&SR={}",
        request.ra, request.dec, request.radius_deg
    );
    if endpoint_url.ends_with('?') || endpoint_url.ends_with('&') {
        format!("{}{}", endpoint_url, params)
    } else if endpoint_url.contains('?') {
        format!("{}&{}", endpoint_url, params)
    } else {
        format!("{}?{}", endpoint_url, params)
    }
}

/// Parse a comma-separated response body into a table.
///
/// The first non-blank line is the column header. A header with no data
/// lines is a legitimate zero-row result. A line opening with `ERROR` is
/// the service reporting a rejected query.
pub(crate) fn parse_table_body(body: &str) -> Result<ResultTable, QueryError> {
    let mut lines = body.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| QueryError::QueryRejected("empty response body".to_string()))?;

    if header.trim_start().starts_with("ERROR") {
        return Err(QueryError::QueryRejected(header.trim().to_string()));
    }

    let columns = split_fields(header);
    let n_columns = columns.len();
    let mut table = ResultTable::new(columns);

    for (line_no, line) in lines.enumerate() {
        let cells = split_fields(line);
        if cells.len() != n_columns {
            return Err(QueryError::QueryRejected(format!(
                "malformed row {}: expected {} fields, got {}",
                line_no + 2,
                n_columns,
                cells.len()
            )));
        }
        table.push_row(cells);
    }

    Ok(table)
}

/// Split one comma-separated line, honoring double-quoted cells
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Doubled quote inside a quoted cell
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> QueryRequest {
        QueryRequest {
            ra: 10.5,
            dec: -41.25,
            radius_deg: 0.05,
        }
    }

    #[test]
    fn test_build_url_endpoint_ending_with_ampersand() {
        let url = build_query_url(
            "http://wfaudata.roe.ac.uk/twomass-dsa/DirectCone?DSACAT=TWOMASS&",
            &request(),
        );
        assert_eq!(
            url,
            "http://wfaudata.roe.ac.uk/twomass-dsa/DirectCone?DSACAT=TWOMASS&RA=10.5&DEC=-41.25&SR=0.05"
        );
    }

    #[test]
    fn test_build_url_endpoint_with_query_string() {
        let url = build_query_url("http://example.org/cone?cat=sa", &request());
        assert_eq!(url, "http://example.org/cone?cat=sa&RA=10.5&DEC=-41.25&SR=0.05");
    }

    #[test]
    fn test_build_url_bare_endpoint() {
        let url = build_query_url("http://example.org/cone", &request());
        assert_eq!(url, "http://example.org/cone?RA=10.5&DEC=-41.25&SR=0.05");
    }

    #[test]
    fn test_parse_body_with_rows() {
        let body = "ra,dec,mag\n10.5,41.2,12.3\n10.6,41.3,14.1\n";
        let table = parse_table_body(body).unwrap();
        assert_eq!(table.columns(), &["ra", "dec", "mag"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("mag").unwrap(), vec!["12.3", "14.1"]);
    }

    #[test]
    fn test_parse_header_only_is_zero_rows() {
        let table = parse_table_body("ra,dec,mag\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_parse_empty_body_is_rejected() {
        let err = parse_table_body("\n  \n").unwrap_err();
        assert!(matches!(err, QueryError::QueryRejected(_)));
    }

    #[test]
    fn test_parse_error_line_is_rejected() {
        let err = parse_table_body("ERROR: table unknown\n").unwrap_err();
        assert_eq!(
            err,
            QueryError::QueryRejected("ERROR: table unknown".to_string())
        );
    }

    #[test]
    fn test_parse_ragged_row_is_rejected() {
        let err = parse_table_body("ra,dec\n1.0,2.0\n3.0\n").unwrap_err();
        match err {
            QueryError::QueryRejected(msg) => {
                assert!(msg.contains("expected 2 fields, got 1"), "msg: {}", msg)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_quoted_cells() {
        let body = "name,note\n\"NGC 224\",\"spiral, barred\"\n";
        let table = parse_table_body(body).unwrap();
        assert_eq!(table.column("note").unwrap(), vec!["spiral, barred"]);
    }

    #[test]
    fn test_parse_blank_lines_ignored() {
        let body = "ra,dec\n\n1.0,2.0\n\n";
        let table = parse_table_body(body).unwrap();
        assert_eq!(table.len(), 1);
    }
}
