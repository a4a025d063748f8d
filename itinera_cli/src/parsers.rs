use itinera::Point;

pub fn parse_coordinates(input: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| format!("Expected 'lat,lon' but got '{input}'"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("Invalid latitude: '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("Invalid longitude: '{}'", lon.trim()))?;

    Ok((lat, lon))
}

/// Parses `label=lat,lon` into a validated point.
pub fn parse_point(input: &str) -> Result<Point, String> {
    let (label, coordinates) = input
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected 'label=lat,lon' but got '{input}'"))?;
    let (lat, lon) = parse_coordinates(coordinates)?;

    Point::new(label.trim(), lat, lon).map_err(|e| e.to_string())
}
