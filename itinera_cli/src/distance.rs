use clap::Args;
use itinera::{Point, haversine_distance};

use crate::parsers;

#[derive(Args)]
pub struct DistanceArgs {
    /// Start coordinates as "lat,lon"
    #[arg(value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    from: (f64, f64),

    /// End coordinates as "lat,lon"
    #[arg(value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    to: (f64, f64),
}

pub fn run(args: DistanceArgs) -> Result<(), anyhow::Error> {
    let from = Point::new("from", args.from.0, args.from.1)?;
    let to = Point::new("to", args.to.0, args.to.1)?;

    println!("{}", haversine_distance(&from, &to));

    Ok(())
}
