use std::{fs::File, io::BufReader, path::Path};

use fxhash::FxHashMap;
use itinera::Point;
use tracing::{debug, instrument};

use crate::{catalog_city::CatalogCity, error::CatalogError};

/// The list of selectable cities, indexed by label and by name.
#[derive(Debug)]
pub struct Catalog {
    cities: Vec<CatalogCity>,
    by_label: FxHashMap<String, usize>,
    by_name: FxHashMap<String, Vec<usize>>,
}

impl Catalog {
    pub fn new(cities: Vec<CatalogCity>) -> Self {
        let mut by_label = FxHashMap::default();
        let mut by_name: FxHashMap<String, Vec<usize>> = FxHashMap::default();

        for (index, city) in cities.iter().enumerate() {
            // the first city with a given label wins
            by_label.entry(city.label()).or_insert(index);
            by_name
                .entry(city.name.to_lowercase())
                .or_default()
                .push(index);
        }

        Self {
            cities,
            by_label,
            by_name,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let cities: Vec<CatalogCity> = serde_json::from_str(json)?;
        Ok(Self::new(cities))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        let cities: Vec<CatalogCity> = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} cities from {}",
            cities.len(),
            path.as_ref().display()
        );

        Ok(Self::new(cities))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[CatalogCity] {
        &self.cities
    }

    /// Every city of the catalog as a validated point, in catalog order.
    pub fn points(&self) -> Result<Vec<Point>, CatalogError> {
        self.cities.iter().map(CatalogCity::to_point).collect()
    }

    /// Looks up a city by its full label, then by its name ignoring case.
    pub fn find(&self, name: &str) -> Result<&CatalogCity, CatalogError> {
        let name = name.trim();

        if let Some(&index) = self.by_label.get(name) {
            return Ok(&self.cities[index]);
        }

        match self.by_name.get(&name.to_lowercase()).map(Vec::as_slice) {
            Some(&[index]) => Ok(&self.cities[index]),
            Some(indices) if !indices.is_empty() => Err(CatalogError::AmbiguousCity {
                name: name.to_owned(),
                candidates: indices
                    .iter()
                    .map(|&index| self.cities[index].label())
                    .collect(),
            }),
            _ => Err(CatalogError::UnknownCity(name.to_owned())),
        }
    }

    /// Points for the requested cities, in the requested order.
    #[instrument(skip_all, fields(requested = names.len()))]
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Point>, CatalogError> {
        names
            .iter()
            .map(|name| self.find(name.as_ref())?.to_point())
            .collect()
    }
}

impl From<Vec<CatalogCity>> for Catalog {
    fn from(cities: Vec<CatalogCity>) -> Self {
        Self::new(cities)
    }
}
