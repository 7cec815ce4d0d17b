use serde::Deserialize;
use std::ops::Index;

/// One named stop. Identity is its position in a [`LocationCatalog`], names may repeat.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LocationRecord {
    name: String,
    region: String,
    latitude: f64,
    longitude: f64,
}

impl LocationRecord {
    pub fn new(name: impl Into<String>, region: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            latitude,
            longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Degrees, nominally in [-90, 90].
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Degrees, nominally in [-180, 180].
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Ordered, immutable sequence of locations. The order defines the node indices of a graph.
///
/// Nothing is validated here: out-of-range or NaN coordinates and duplicate names are
/// kept as supplied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationCatalog {
    records: Vec<LocationRecord>,
}

impl LocationCatalog {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }
}

impl Index<usize> for LocationCatalog {
    type Output = LocationRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl FromIterator<LocationRecord> for LocationCatalog {
    fn from_iter<I: IntoIterator<Item = LocationRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LocationCatalog {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
