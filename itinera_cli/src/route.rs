use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;
use itinera::{
    Haversine, Kilometers, NearestNeighborTourBuilder, Point, describe_route, haversine_distance,
    round_trip_length, tour_length,
};
use itinera_catalog::{
    catalog::Catalog,
    catalog_client::{CatalogClient, catalog_url},
};
use serde::Serialize;
use tracing::{info, warn};

use crate::parsers;

#[derive(Args)]
pub struct RouteArgs {
    /// City catalog JSON file, only read when --city is given
    #[arg(short, long, conflicts_with = "url", requires = "cities")]
    catalog: Option<PathBuf>,

    /// Fetch the city catalog from this URL (default: $ITINERA_CATALOG_URL or the local service)
    #[arg(short, long, requires = "cities")]
    url: Option<String>,

    /// City to visit, by label ("Mumbai (Maharashtra)") or name. The first city is the start
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Extra stop as "label=lat,lon", visited after the catalog cities in input order
    #[arg(short, long = "point", value_parser = parsers::parse_point, allow_hyphen_values = true)]
    points: Vec<Point>,

    /// Include the leg back to the start in the reported length
    #[arg(long)]
    round_trip: bool,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
pub struct RouteStop {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the previous stop
    pub leg_km: f64,
}

#[derive(Serialize)]
pub struct RouteReport {
    pub stops: Vec<RouteStop>,
    pub complete: bool,
    pub round_trip: bool,
    pub length_km: f64,
    pub description: Option<String>,
}

pub fn build_report(points: &[Point], round_trip: bool) -> RouteReport {
    let builder = NearestNeighborTourBuilder::new(Haversine);
    let tour = builder.build_tour(points);

    if !tour.is_complete() {
        warn!(
            "Route stopped after {} of {} points",
            tour.len(),
            points.len()
        );
    }

    let length: Kilometers = if round_trip {
        round_trip_length(points, &tour, builder.metric())
    } else {
        tour_length(points, &tour, builder.metric())
    };

    let mut previous: Option<&Point> = None;
    let stops = tour
        .indices()
        .iter()
        .map(|&index| {
            let point = &points[index];
            let leg = previous
                .map(|from| haversine_distance(from, point))
                .unwrap_or(Kilometers::ZERO);
            previous = Some(point);

            RouteStop {
                label: point.label().to_owned(),
                latitude: point.latitude(),
                longitude: point.longitude(),
                leg_km: leg.value(),
            }
        })
        .collect();

    RouteReport {
        stops,
        complete: tour.is_complete(),
        round_trip,
        length_km: length.value(),
        description: describe_route(tour.labels()).map(|d| d.to_string()),
    }
}

async fn load_catalog(args: &RouteArgs) -> anyhow::Result<Catalog> {
    if let Some(path) = &args.catalog {
        return Ok(Catalog::from_file(path)?);
    }

    let url = args.url.clone().unwrap_or_else(catalog_url);
    let catalog = CatalogClient::new().fetch(&url).await?;

    Ok(catalog)
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let mut points = if args.cities.is_empty() {
        Vec::new()
    } else {
        let catalog = load_catalog(&args).await?;
        info!("Catalog loaded: {} cities", catalog.len());
        catalog.select(&args.cities)?
    };
    points.extend(args.points.iter().cloned());

    if points.is_empty() {
        anyhow::bail!("No stops given, use --city or --point");
    }

    let report = build_report(&points, args.round_trip);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Stop", "Latitude", "Longitude", "Leg"]);
    for (i, stop) in report.stops.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            stop.label.clone(),
            format!("{:.4}", stop.latitude),
            format!("{:.4}", stop.longitude),
            Kilometers::new(stop.leg_km).to_string(),
        ]);
    }

    println!("{table}");
    println!(
        "Total {}: {}",
        if report.round_trip {
            "round trip"
        } else {
            "distance"
        },
        Kilometers::new(report.length_km)
    );
    if let Some(description) = &report.description {
        println!("{description}");
    }

    Ok(())
}
