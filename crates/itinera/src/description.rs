use std::fmt;

use serde::Serialize;

/// Human readable summary of a visiting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDescription {
    pub origin: String,
    pub destination: String,
    pub via: Vec<String>,
    pub sequence: Vec<String>,
}

pub fn describe_route<S: AsRef<str>>(labels: &[S]) -> Option<RouteDescription> {
    let (first, rest) = labels.split_first()?;
    let destination = rest.last().unwrap_or(first);
    let via = match rest.split_last() {
        Some((_, intermediate)) => intermediate.iter().map(|s| s.as_ref().to_owned()).collect(),
        None => Vec::new(),
    };

    Some(RouteDescription {
        origin: first.as_ref().to_owned(),
        destination: destination.as_ref().to_owned(),
        via,
        sequence: labels.iter().map(|s| s.as_ref().to_owned()).collect(),
    })
}

impl fmt::Display for RouteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You are travelling from {} to {}",
            self.origin, self.destination
        )?;

        if !self.via.is_empty() {
            write!(f, " via {}", self.via.join(", "))?;
        }

        write!(f, ".")
    }
}
