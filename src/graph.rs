/*
Complete undirected graph over a location catalog, weighted by haversine distance (km).

Weights for every unordered pair {i, j} are computed once when the graph is built and stored
in a packed upper-triangular array of N(N-1)/2 slots:

    idx(i, j) = i*N - i*(i+1)/2 + (j-i-1),  for i < j

Afterwards the graph is immutable, so it can be shared freely between readers.
*/

use rayon::prelude::*;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::geo::haversine_between;
use crate::location::LocationCatalog;

pub type NodeIndex = usize;
pub type Distance = f64;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a built graph, carried by every [`EdgeRef`] it hands out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to one outgoing edge `from -> to` of a specific graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    graph: GraphId,
    from: NodeIndex,
    to: NodeIndex,
}

impl EdgeRef {
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn from(&self) -> NodeIndex {
        self.from
    }

    pub fn to(&self) -> NodeIndex {
        self.to
    }

    /// The same undirected edge walked the other way.
    pub fn reversed(&self) -> Self {
        Self {
            graph: self.graph,
            from: self.to,
            to: self.from,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BuildOptions {
    /// Catalogs with at least this many locations are built on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { parallel_threshold: 512 }
    }
}

#[derive(Debug)]
pub struct GeoGraph {
    id: GraphId,
    catalog: LocationCatalog,
    names: Vec<String>,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    weights: Vec<Distance>,
    edge_count: usize,
}

fn packed_index(n: usize, i: NodeIndex, j: NodeIndex) -> usize {
    debug_assert!(i < j && j < n);
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

// Row i holds the weights of (i, i+1), ..., (i, n-1), so concatenating rows in order
// yields exactly the packed layout. Rows are independent and each fills its own slots.
fn compute_weights(catalog: &LocationCatalog, parallel: bool) -> Vec<Distance> {
    let records = catalog.records();
    let n = records.len();
    let row = move |i: NodeIndex| {
        let from = &records[i];
        records[i + 1..].iter().map(move |to| haversine_between(from, to))
    };

    if parallel {
        (0..n).into_par_iter().flat_map_iter(row).collect()
    } else {
        (0..n).flat_map(row).collect()
    }
}

impl GeoGraph {
    /// Builds the graph with [`BuildOptions::default`].
    pub fn new(catalog: LocationCatalog) -> Self {
        Self::with_options(catalog, BuildOptions::default())
    }

    /// Eagerly computes all N(N-1)/2 edge weights. Catalogs of 0 or 1 locations give no edges.
    pub fn with_options(catalog: LocationCatalog, options: BuildOptions) -> Self {
        let n = catalog.len();
        let expected = n * n.saturating_sub(1) / 2;
        let parallel = n >= options.parallel_threshold;
        debug!(nodes = n, edges = expected, parallel, "building geo graph");

        let started = Instant::now();
        let mut weights = compute_weights(&catalog, parallel);
        weights.shrink_to_fit();
        debug_assert_eq!(weights.len(), expected, "packed weight store has the wrong size");

        let names = catalog
            .iter()
            .map(|r| format!("{}, {}", r.name(), r.region()))
            .collect();
        let latitudes = catalog.iter().map(|r| r.latitude()).collect();
        let longitudes = catalog.iter().map(|r| r.longitude()).collect();

        let graph = Self {
            id: GraphId::next(),
            catalog,
            names,
            latitudes,
            longitudes,
            edge_count: weights.len(),
            weights,
        };
        info!(
            graph = graph.id.0,
            nodes = n,
            edges = graph.edge_count,
            parallel,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "geo graph built"
        );
        graph
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of undirected edges, N(N-1)/2.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Display labels in catalog order, each formatted as `<name>, <region>`.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub(crate) fn check_node(&self, index: NodeIndex) -> GraphResult<()> {
        if index < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                index,
                len: self.node_count(),
            })
        }
    }

    fn slot(&self, a: NodeIndex, b: NodeIndex) -> usize {
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        packed_index(self.node_count(), i, j)
    }

    /// Handle for the edge `from -> to`, checked against this graph.
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> GraphResult<EdgeRef> {
        self.check_node(from)?;
        self.check_node(to)?;
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        Ok(EdgeRef { graph: self.id, from, to })
    }

    /// Outgoing edges of `from` to every other node, in ascending target order.
    ///
    /// Panics if `from` is not a node of this graph.
    pub fn out_edges(&self, from: NodeIndex) -> OutEdges<'_> {
        assert!(
            from < self.node_count(),
            "node {} out of range for {} nodes",
            from,
            self.node_count()
        );
        OutEdges {
            graph: self,
            from,
            next: 0,
        }
    }

    /// Every undirected edge once, as `from < to`, row by row.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        let n = self.node_count();
        let graph = self.id;
        (0..n).flat_map(move |from| (from + 1..n).map(move |to| EdgeRef { graph, from, to }))
    }

    /// Precomputed distance of `edge`.
    ///
    /// Panics if the handle belongs to another graph or does not name an edge of this one.
    pub fn weight(&self, edge: EdgeRef) -> Distance {
        self.try_weight(edge).unwrap_or_else(|err| panic!("{}", err))
    }

    pub fn try_weight(&self, edge: EdgeRef) -> GraphResult<Distance> {
        if edge.graph != self.id {
            return Err(GraphError::ForeignEdge { edge, graph: self.id });
        }
        self.check_node(edge.from)?;
        self.check_node(edge.to)?;
        if edge.from == edge.to {
            return Err(GraphError::SelfLoop(edge.from));
        }
        Ok(self.weights[self.slot(edge.from, edge.to)])
    }

    /// Distance between two distinct nodes, `None` for a self pair or an unknown index.
    pub fn distance(&self, a: NodeIndex, b: NodeIndex) -> Option<Distance> {
        if a == b || a >= self.node_count() || b >= self.node_count() {
            return None;
        }
        Some(self.weights[self.slot(a, b)])
    }
}

/// Iterator returned by [`GeoGraph::out_edges`].
pub struct OutEdges<'a> {
    graph: &'a GeoGraph,
    from: NodeIndex,
    next: NodeIndex,
}

impl Iterator for OutEdges<'_> {
    type Item = EdgeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.from {
            self.next += 1;
        }
        if self.next >= self.graph.node_count() {
            return None;
        }
        let to = self.next;
        self.next += 1;
        Some(EdgeRef {
            graph: self.graph.id,
            from: self.from,
            to,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.graph.node_count();
        let remaining = n.saturating_sub(self.next) - usize::from(self.next <= self.from);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OutEdges<'_> {}

impl FusedIterator for OutEdges<'_> {}
