//! Cone search CLI
//!
//! Searches for sources in a given position (RA, DEC) and radius in a
//! given catalog, then prints the resulting table and optionally writes it
//! to a CSV file. Use --list to see the registered catalogs.
//!
//! Usage:
//! ```
//! cargo run --bin conesearch -- --ra 10.68 --dec 41.27 -r 30 --catalog 2mass
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use log::debug;

use conesearch::config::load_registry;
use conesearch::table::terminal_width;
use conesearch::{
    cone_search, CatalogRegistry, ColumnSelection, HttpConeSearch, QueryRequest, RadiusUnit,
    SearchTarget, UserConfig,
};

/// Log file recording each step at debug level, unless --nolog is given
const LOG_FILENAME: &str = "conesearch.log";

/// Column token selecting the catalog's default column list
const PRESET_TOKEN: &str = "preset";

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

/// Command line arguments for the cone search tool
#[derive(Parser, Debug)]
#[command(
    name = "conesearch",
    about = "Search for sources around a sky position in an astronomical catalog",
    long_about = None,
    allow_negative_numbers = true
)]
#[command(group(ArgGroup::new("target").args(["catalog", "url"])))]
struct Cli {
    /// Right ascension of the position, in degrees
    #[arg(long, value_parser = parse_ra, required_unless_present = "list")]
    ra: Option<f64>,

    /// Declination of the position, in degrees
    #[arg(long, value_parser = parse_dec, required_unless_present = "list")]
    dec: Option<f64>,

    /// Radius around (RA, DEC) to search for sources
    #[arg(short, long, value_parser = parse_radius, required_unless_present = "list")]
    radius: Option<f64>,

    /// Unit of the radius value
    #[arg(long, value_enum, default_value_t = RadiusUnit::Arcsec)]
    runit: RadiusUnit,

    /// Catalog to search. To see your choices use the --list option.
    #[arg(long)]
    catalog: Option<String>,

    /// Cone search endpoint URL to query instead of a registered catalog
    #[arg(long)]
    url: Option<String>,

    /// Columns to keep from the retrieved table (comma-separated).
    /// The single token "preset" selects the catalog's default columns.
    /// If not given, all columns are output.
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Write the output table to this file, CSV format
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Print the registered catalogs and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Print only OK or Failed instead of the table
    #[arg(long, default_value_t = false)]
    short: bool,

    /// Do not write the log file
    #[arg(long, default_value_t = false)]
    nolog: bool,
}

/// Route all log records at debug level into the log file
fn init_log_file() -> std::io::Result<()> {
    let file = File::create(LOG_FILENAME)?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if !cli.nolog {
        if let Err(e) = init_log_file() {
            eprintln!("Failed to open {}: {}", LOG_FILENAME, e);
            std::process::exit(1);
        }
    }

    let registry = match UserConfig::new().map_err(|e| e.to_string()).and_then(|cfg| {
        load_registry(&cfg).map_err(|e| e.to_string())
    }) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Failed to load catalog registry: {}", e);
            eprintln!("Failed to load catalog registry: {}", e);
            std::process::exit(1);
        }
    };

    if cli.list {
        println!("Available options for 'catalogs':");
        for entry in registry.entries() {
            println!("-> {} : {}", entry.name, entry.endpoint_url);
        }
        return;
    }

    if let Err(e) = run(&cli, &registry) {
        log::error!("Search failed to complete: {}", e);
        if cli.short {
            println!("Failed");
        } else {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli, registry: &CatalogRegistry) -> Result<(), Box<dyn std::error::Error>> {
    // required_unless_present guarantees these outside --list
    let ra = cli.ra.ok_or("--ra is required")?;
    let dec = cli.dec.ok_or("--dec is required")?;
    let radius = cli.radius.ok_or("--radius is required")?;

    debug!("RA:{} , DEC:{}", ra, dec);

    let radius_deg = cli.runit.to_degrees(radius);
    debug!("Radius {} {} = {} degrees", radius, cli.runit, radius_deg);

    let target = match (&cli.catalog, &cli.url) {
        (Some(name), None) => SearchTarget::Catalog(name.clone()),
        (None, Some(url)) => SearchTarget::Url(url.clone()),
        _ => return Err("either --catalog or --url must be given".into()),
    };

    let columns = if cli.columns.is_empty() {
        ColumnSelection::All
    } else if cli.columns.len() == 1 && cli.columns[0] == PRESET_TOKEN {
        ColumnSelection::Preset
    } else {
        ColumnSelection::Named(cli.columns.clone())
    };
    debug!("Columns to output: {:?}", columns);

    if let Some(path) = &cli.outfile {
        if path.as_os_str().is_empty() {
            return Err("empty name for output filename".into());
        }
    }

    let request = QueryRequest { ra, dec, radius_deg };
    let table = cone_search(
        registry,
        &HttpConeSearch::new(),
        &target,
        &request,
        &columns,
    )?;

    if let Some(path) = &cli.outfile {
        let file = File::create(path)?;
        table.write_csv(BufWriter::new(file))?;
        debug!("Wrote {} rows to {}", table.len(), path.display());
    }

    if cli.short {
        println!("OK");
    } else {
        println!("---");
        println!(" Table retrieved:");
        print!("{}", table.render(terminal_width()));
        println!("---");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ra_bounds() {
        assert!(parse_ra("0.0").is_ok());
        assert!(parse_ra("359.99").is_ok());
        assert!(parse_ra("360.0").is_err());
        assert!(parse_ra("-0.1").is_err());
        assert!(parse_ra("not-a-number").is_err());
    }

    #[test]
    fn test_dec_bounds() {
        assert!(parse_dec("-90.0").is_ok());
        assert!(parse_dec("90.0").is_ok());
        assert!(parse_dec("90.1").is_err());
    }

    #[test]
    fn test_radius_must_be_positive() {
        assert!(parse_radius("30").is_ok());
        assert!(parse_radius("0").is_err());
        assert!(parse_radius("-1").is_err());
        assert!(parse_radius("inf").is_err());
    }

    #[test]
    fn test_cli_rejects_catalog_and_url_together() {
        let result = Cli::try_parse_from([
            "conesearch",
            "--ra",
            "10.0",
            "--dec",
            "20.0",
            "-r",
            "30",
            "--catalog",
            "2mass",
            "--url",
            "http://example.org/cone?",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_list_needs_no_position() {
        let cli = Cli::try_parse_from(["conesearch", "--list"]).unwrap();
        assert!(cli.list);
        assert!(cli.ra.is_none());
    }

    #[test]
    fn test_cli_columns_are_comma_delimited() {
        let cli = Cli::try_parse_from([
            "conesearch",
            "--ra",
            "10.0",
            "--dec",
            "20.0",
            "-r",
            "30",
            "--catalog",
            "2mass",
            "--columns",
            "ra,dec,j_m",
        ])
        .unwrap();
        assert_eq!(cli.columns, vec!["ra", "dec", "j_m"]);
    }

    #[test]
    fn test_cli_default_radius_unit_is_arcsec() {
        let cli = Cli::try_parse_from([
            "conesearch",
            "--ra",
            "10.0",
            "--dec",
            "20.0",
            "-r",
            "30",
            "--catalog",
            "2mass",
        ])
        .unwrap();
        assert_eq!(cli.runit, RadiusUnit::Arcsec);
    }
}
