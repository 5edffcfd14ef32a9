//! Position sweep CLI
//!
//! Queries every registered catalog at one sky position and reports, per
//! catalog, the sources found or the failure reason. A quick way to check
//! which archives know a target. Failures of individual services do not
//! abort the sweep.

use clap::Parser;

use conesearch::config::load_registry;
use conesearch::{
    ConeSearchService, HttpConeSearch, QueryRequest, RadiusUnit, ResultTable, UserConfig,
};

/// Parse a right ascension in degrees
fn parse_ra(s: &str) -> Result<f64, String> {
    let ra = s
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid RA value".to_string())?;
    if !(0.0..360.0).contains(&ra) {
        return Err("RA must be in range [0, 360) degrees".to_string());
    }
    Ok(ra)
}

/// Parse a declination in degrees
fn parse_dec(s: &str) -> Result<f64, String> {
    let dec = s
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid Dec value".to_string())?;
    if !(-90.0..=90.0).contains(&dec) {
        return Err("Dec must be in range [-90, 90] degrees".to_string());
    }
    Ok(dec)
}

/// Parse a strictly positive radius value
fn parse_radius(s: &str) -> Result<f64, String> {
    let radius = s
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid radius value".to_string())?;
    if !(radius > 0.0) || !radius.is_finite() {
        return Err("Radius must be a positive value".to_string());
    }
    Ok(radius)
}

/// Command line arguments for the position sweep
#[derive(Parser, Debug)]
#[command(
    name = "query_position",
    about = "Query every registered catalog for sources at one sky position",
    long_about = None,
    allow_negative_numbers = true
)]
struct Cli {
    /// Right ascension of the object, in degrees
    #[arg(value_parser = parse_ra)]
    ra: f64,

    /// Declination of the object, in degrees
    #[arg(value_parser = parse_dec)]
    dec: f64,

    /// Radius around (RA, DEC) to search for sources
    #[arg(value_parser = parse_radius)]
    radius: f64,

    /// Unit of the radius value
    #[arg(long, value_enum, default_value_t = RadiusUnit::Arcsec)]
    runit: RadiusUnit,
}

/// Print per-source (ra, dec) pairs when the service exposes those columns
fn print_positions(table: &ResultTable) {
    let find = |name: &str| {
        table
            .columns()
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    };
    if let (Some(ra_idx), Some(dec_idx)) = (find("ra"), find("dec")) {
        for row in table.rows() {
            println!("  ({}, {})", row[ra_idx], row[dec_idx]);
        }
    }
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let registry = match UserConfig::new()
        .map_err(|e| e.to_string())
        .and_then(|cfg| load_registry(&cfg).map_err(|e| e.to_string()))
    {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to load catalog registry: {}", e);
            std::process::exit(1);
        }
    };

    let radius_deg = cli.runit.to_degrees(cli.radius);
    let request = QueryRequest {
        ra: cli.ra,
        dec: cli.dec,
        radius_deg,
    };
    let service = HttpConeSearch::new();

    println!("---");
    println!("-> source at (ra,dec): ({},{})", cli.ra, cli.dec);
    println!("---");

    let mut answered = 0usize;
    for entry in registry.entries() {
        match service.execute(&request, &entry.endpoint_url) {
            Ok(table) => {
                answered += 1;
                println!("Found {} sources in {}", table.len(), entry.name);
                println!(" -> search radius: {} {}", cli.radius, cli.runit);
                print_positions(&table);
                println!("---");
            }
            Err(e) => {
                log::error!("{}: {}", entry.name, e);
                println!("Not able to access data for source in archive {}", entry.name);
                println!("---");
            }
        }
    }

    if answered == 0 {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_argument_order() {
        let cli = Cli::try_parse_from(["query_position", "83.6", "-5.4", "60"]).unwrap();
        assert_eq!(cli.ra, 83.6);
        assert_eq!(cli.dec, -5.4);
        assert_eq!(cli.radius, 60.0);
        assert_eq!(cli.runit, RadiusUnit::Arcsec);
    }

    #[test]
    fn test_out_of_range_dec_rejected() {
        assert!(Cli::try_parse_from(["query_position", "83.6", "-95.0", "60"]).is_err());
    }
}
