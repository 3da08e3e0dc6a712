use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use gridconvert::{Bng, Error, LatLon, Utm};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAP_URL: &str = "https://www.google.com/maps?q=";

/// Convert UTM or British National Grid coordinates to latitude/longitude.
///
/// Runs an interactive menu when no subcommand is given.
#[derive(Debug, Parser)]
#[command(name = "gridconvert", version)]
struct Cli {
    /// Decimal places in the printed latitude/longitude
    #[arg(long, env = "GRIDCONVERT_PRECISION", default_value_t = 6)]
    precision: usize,

    /// Map service URL, the coordinates are appended as `lat,lon`
    #[arg(long, env = "GRIDCONVERT_MAP_URL", default_value = DEFAULT_MAP_URL)]
    map_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a WGS84 UTM coordinate
    Utm {
        zone: i32,
        #[arg(value_enum, ignore_case = true)]
        hemisphere: Hemisphere,
        #[arg(allow_negative_numbers = true)]
        easting: f64,
        #[arg(allow_negative_numbers = true)]
        northing: f64,
    },
    /// Convert an OSGB36 National Grid coordinate
    Bng {
        #[arg(allow_negative_numbers = true, required_unless_present = "grid_ref")]
        easting: Option<f64>,
        #[arg(allow_negative_numbers = true, required_unless_present = "grid_ref")]
        northing: Option<f64>,
        /// Lettered grid reference, e.g. "TG 51409 13177"
        #[arg(long, conflicts_with_all = ["easting", "northing"])]
        grid_ref: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Hemisphere {
    #[value(alias = "north")]
    N,
    #[value(alias = "south")]
    S,
}

/// How results are printed.
#[derive(Debug, Clone)]
struct Output {
    precision: usize,
    map_url: String,
}

impl Output {
    fn map_link(&self, coord: &LatLon) -> String {
        let p = self.precision;
        format!("{}{:.p$},{:.p$}", self.map_url, coord.latitude(), coord.longitude())
    }

    fn report<W: Write>(&self, out: &mut W, coord: &LatLon) -> io::Result<()> {
        let p = self.precision;
        writeln!(out, "Latitude: {:.p$}", coord.latitude())?;
        writeln!(out, "Longitude: {:.p$}", coord.longitude())?;
        writeln!(out, "Map: {}", self.map_link(coord))
    }
}

fn convert(command: &Command) -> Result<LatLon, Error> {
    match command {
        Command::Utm { zone, hemisphere, easting, northing } => {
            let northp = matches!(hemisphere, Hemisphere::N);
            Ok(Utm::create(*zone, northp, *easting, *northing)?.to_latlon())
        }
        Command::Bng { grid_ref: Some(grid_ref), .. } => Bng::parse_str(grid_ref)?.to_latlon(),
        Command::Bng { easting, northing, .. } => {
            let (Some(easting), Some(northing)) = (easting, northing) else {
                return Err(Error::InvalidGridRef("Easting and northing are required".to_string()));
            };
            Bng::create(*easting, *northing)?.to_latlon()
        }
    }
}

/// Prints `message` and reads one line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

fn read_utm<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Result<LatLon, Error>>> {
    let Some(easting) = prompt(input, out, "Easting: ")? else { return Ok(None) };
    let Some(northing) = prompt(input, out, "Northing: ")? else { return Ok(None) };
    let Some(zone) = prompt(input, out, "Zone number (1-60): ")? else { return Ok(None) };
    let Some(hemisphere) = prompt(input, out, "Hemisphere (N/S): ")? else { return Ok(None) };

    let parsed = zone
        .parse::<i32>()
        .map_err(|_| Error::InvalidUtm(format!("Zone \"{zone}\" is not a number")))
        .and_then(|zone| gridconvert::from_str::<_, Utm>(format!("{zone}{hemisphere} {easting} {northing}")));

    Ok(Some(parsed.map(|utm| utm.to_latlon())))
}

fn read_bng<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Result<LatLon, Error>>> {
    let Some(easting) = prompt(input, out, "Easting (or grid reference): ")? else { return Ok(None) };

    let text = if easting.starts_with(|c: char| c.is_ascii_alphabetic()) {
        easting
    } else {
        let Some(northing) = prompt(input, out, "Northing: ")? else { return Ok(None) };
        format!("{easting} {northing}")
    };

    Ok(Some(Bng::parse_str(&text).and_then(|bng| bng.to_latlon())))
}

fn run_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W, output: &Output) -> io::Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "1) UTM to Lat/Lon")?;
        writeln!(out, "2) BNG to Lat/Lon")?;
        writeln!(out, "3) Exit")?;

        let Some(choice) = prompt(input, out, "Choice: ")? else { return Ok(()) };

        let result = match choice.as_str() {
            "1" => read_utm(input, out)?,
            "2" => read_bng(input, out)?,
            "3" => return Ok(()),
            other => {
                writeln!(out, "Invalid choice \"{other}\", enter 1, 2 or 3")?;
                continue;
            }
        };

        match result {
            Some(Ok(coord)) => output.report(out, &coord)?,
            Some(Err(err)) => {
                debug!(%err, "conversion failed");
                writeln!(out, "Error: {err}")?;
            }
            None => return Ok(()),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "starting");

    let output = Output {
        precision: cli.precision,
        map_url: cli.map_url,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Some(command) => match convert(command) {
            Ok(coord) => output.report(&mut out, &coord),
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => run_menu(&mut io::stdin().lock(), &mut out, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn output() -> Output {
        Output {
            precision: 6,
            map_url: DEFAULT_MAP_URL.to_string(),
        }
    }

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        run_menu(&mut Cursor::new(input), &mut out, &output()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn menu_converts_utm() {
        let text = run("1\n585664.121\n4511315.422\n18\nN\n3\n");

        assert!(text.contains("Latitude: 40.748333"));
        assert!(text.contains("Longitude: -73.985278"));
        assert!(text.contains("Map: https://www.google.com/maps?q=40.748333,-73.985278"));
    }

    #[test]
    fn menu_converts_bng_pair_and_grid_ref() {
        let text = run("2\n651409.903\n313177.270\n2\nTG 51409 13177\n3\n");

        assert!(text.contains("Latitude: 52.657570"));
        assert!(text.contains("Longitude: 1.717922"));
        assert_eq!(text.matches("Latitude: 52.65").count(), 2);
    }

    #[test]
    fn menu_reports_bad_input_and_continues() {
        let text = run("9\n1\n1\n2\nxx\nN\n2\nabc\n3\n");

        assert!(text.contains("Invalid choice \"9\""));
        assert_eq!(text.matches("Error: ").count(), 2);
        assert!(text.trim_end().ends_with("Choice:"));
    }

    #[test]
    fn menu_exits_on_end_of_input() {
        let text = run("1\n500000\n");

        assert!(text.ends_with("Northing: "));
        assert!(!text.contains("Error"));
    }

    #[test]
    fn zone_out_of_range_is_reported() {
        let text = run("1\n500000\n0\n61\nN\n3\n");
        assert!(text.contains("Error: Zone 61 not in range [1, 60]"));
    }

    #[test]
    fn subcommand_conversion() {
        let cli = Cli::try_parse_from(["gridconvert", "bng", "400000", "-100000"]).unwrap();
        let coord = convert(cli.command.as_ref().unwrap()).unwrap();
        assert_eq!(coord.latitude(), 49.);
        assert_eq!(coord.longitude(), -2.);

        let cli = Cli::try_parse_from(["gridconvert", "utm", "18", "n", "585664.121", "4511315.422"]).unwrap();
        let coord = convert(cli.command.as_ref().unwrap()).unwrap();
        assert!((coord.latitude() - 40.748333).abs() < 1e-6);

        let cli = Cli::try_parse_from(["gridconvert", "bng", "--grid-ref", "TG 51409 13177"]).unwrap();
        assert!(convert(cli.command.as_ref().unwrap()).is_ok());
    }

    #[test]
    fn map_link_uses_precision() {
        let output = Output { precision: 3, map_url: "https://example.org/?q=".to_string() };
        let link = output.map_link(&gridconvert::convert_utm_to_latlon(500_000., 0., 31, true));

        assert_eq!(link, "https://example.org/?q=0.000,3.000");
    }
}
