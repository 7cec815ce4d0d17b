use crate::error::GraphResult;
use crate::graph::{Distance, GeoGraph, NodeIndex};
use crate::location::LocationRecord;

/// One row of a written route: the stop and its distance from the previous stop.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteStop<'a> {
    pub index: NodeIndex,
    pub location: &'a LocationRecord,
    pub distance: Distance,
}

impl GeoGraph {
    /// Per-step distances for visiting `order`: `0.0` for the first stop, then the weight of
    /// each edge walked. Consecutive repeats are rejected since there is no self-loop edge.
    pub fn step_distances(&self, order: &[NodeIndex]) -> GraphResult<Vec<Distance>> {
        let mut steps = Vec::with_capacity(order.len());
        let mut previous: Option<NodeIndex> = None;
        for &index in order {
            let step = match previous {
                None => {
                    self.check_node(index)?;
                    0.0
                }
                Some(from) => self.try_weight(self.edge(from, index)?)?,
            };
            steps.push(step);
            previous = Some(index);
        }
        Ok(steps)
    }

    pub fn path_length(&self, order: &[NodeIndex]) -> GraphResult<Distance> {
        Ok(self.step_distances(order)?.into_iter().sum())
    }

    /// Pairs each stop of `order` with its catalog record and step distance.
    pub fn route(&self, order: &[NodeIndex]) -> GraphResult<Vec<RouteStop<'_>>> {
        let steps = self.step_distances(order)?;
        Ok(order
            .iter()
            .zip(steps)
            .map(|(&index, distance)| RouteStop {
                index,
                location: &self.catalog()[index],
                distance,
            })
            .collect())
    }

    /// Like [`GeoGraph::route`], returning to the first stop at the end. A single stop stays
    /// a single stop, since there is no edge back to itself.
    pub fn closed_route(&self, order: &[NodeIndex]) -> GraphResult<Vec<RouteStop<'_>>> {
        match order {
            [first, _, ..] => {
                let mut closed = order.to_vec();
                closed.push(*first);
                self.route(&closed)
            }
            _ => self.route(order),
        }
    }
}
