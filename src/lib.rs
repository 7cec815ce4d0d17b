//! Complete haversine-weighted graphs over named locations, built once and queried by tour
//! construction code.

pub mod error;
pub mod geo;
pub mod graph;
pub mod io;
pub mod location;
pub mod route;

pub use error::{GraphError, GraphResult};
pub use geo::{haversine_between, haversine_km, EARTH_RADIUS_KM};
pub use graph::{BuildOptions, Distance, EdgeRef, GeoGraph, GraphId, NodeIndex, OutEdges};
pub use location::{LocationCatalog, LocationRecord};
pub use route::RouteStop;
