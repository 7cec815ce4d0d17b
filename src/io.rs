//! File adapters around the graph: reading a location CSV and writing routes and edge lists.
//!
//! Records are deserialized as-is. Coordinates are not range-checked and names are not
//! deduplicated; that is the job of whoever produces the input file.

use csv::{ReaderBuilder, Trim, Writer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::GraphResult;
use crate::graph::GeoGraph;
use crate::location::{LocationCatalog, LocationRecord};
use crate::route::RouteStop;

/// Reads a headered CSV with `name,region,latitude,longitude` columns, keeping row order.
pub fn read_catalog(path: impl AsRef<Path>) -> GraphResult<LocationCatalog> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;

    let records = rdr
        .deserialize::<LocationRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), locations = records.len(), "read location catalog");
    Ok(LocationCatalog::new(records))
}

/// Writes one line per stop: `<name>, <region>\t<latitude>\t<longitude>\t<distance>`.
/// The first stop's distance is 0. Numbers are written with six decimals, like the edge CSV.
pub fn write_route<W: Write>(mut writer: W, stops: &[RouteStop<'_>]) -> GraphResult<()> {
    for stop in stops {
        let location = stop.location;
        writeln!(
            writer,
            "{}, {}\t{:.6}\t{:.6}\t{:.6}",
            location.name(),
            location.region(),
            location.latitude(),
            location.longitude(),
            stop.distance
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_route_file(path: impl AsRef<Path>, stops: &[RouteStop<'_>]) -> GraphResult<()> {
    let file = File::create(path)?;
    write_route(BufWriter::new(file), stops)
}

/// Writes every undirected edge once as `from,to,distance_km`.
pub fn write_edges(path: impl AsRef<Path>, graph: &GeoGraph) -> GraphResult<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["from", "to", "distance_km"])?;
    for edge in graph.edges() {
        wtr.write_record(&[
            edge.from().to_string(),
            edge.to().to_string(),
            format!("{:.6}", graph.weight(edge)),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use std::fs;
    use tempfile::tempdir;

    const CITIES: &str = "\
name,region,latitude,longitude
South Bend,IN,41.6764,-86.2520
Chicago,IL,41.8781,-87.6298
Indianapolis, IN ,39.7684,-86.1581
";

    #[test]
    fn reads_catalog_in_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        fs::write(&path, CITIES).unwrap();

        let catalog = read_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].name(), "South Bend");
        assert_eq!(catalog[1].latitude(), 41.8781);
        assert_eq!(catalog[2].region(), "IN");
        assert_eq!(catalog[2].longitude(), -86.1581);
    }

    #[test]
    fn header_only_file_is_an_empty_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "name,region,latitude,longitude\n").unwrap();
        assert!(read_catalog(&path).unwrap().is_empty());
    }

    #[test]
    fn unparseable_row_is_a_csv_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "name,region,latitude,longitude\nChicago,IL,north,-87.6\n").unwrap();
        assert!(matches!(read_catalog(&path), Err(GraphError::Csv(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_catalog(dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn route_lines_are_tab_separated() {
        let catalog = LocationCatalog::new(vec![
            LocationRecord::new("South Bend", "IN", 41.5, -86.25),
            LocationRecord::new("South Bend", "IN", 41.5, -86.25),
            LocationRecord::new("Nowhere", "ZZ", 0.0, 0.0),
        ]);
        let graph = GeoGraph::new(catalog);
        let route = graph.route(&[2, 0, 1]).unwrap();

        let mut out = Vec::new();
        write_route(&mut out, &route).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Nowhere, ZZ\t0.000000\t0.000000\t0.000000");
        assert!(lines[1].starts_with("South Bend, IN\t41.500000\t-86.250000\t"));
        assert_eq!(lines[2], "South Bend, IN\t41.500000\t-86.250000\t0.000000");
        assert!(text.ends_with('\n'));

        let second = lines[1].rsplit('\t').next().unwrap();
        assert_eq!(second, format!("{:.6}", graph.distance(2, 0).unwrap()));
        assert_eq!(second.split('.').nth(1).map(str::len), Some(6));
    }

    #[test]
    fn edge_file_lists_each_pair_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        let graph = GeoGraph::new(LocationCatalog::new(vec![
            LocationRecord::new("A", "", 0.0, 0.0),
            LocationRecord::new("B", "", 0.0, 1.0),
            LocationRecord::new("C", "", 1.0, 0.0),
        ]));
        write_edges(&path, &graph).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "from,to,distance_km");
        assert_eq!(lines.len(), 1 + graph.edge_count());
        assert!(lines[1].starts_with("0,1,111.19"));
        assert!(lines[3].starts_with("1,2,"));
    }
}
