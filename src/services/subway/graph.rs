//! Undirected weighted graph over every section of every line.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::domain::Section;
use crate::services::subway::PathError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath {
    pub station_ids: Vec<i64>,
    pub distance: i64,
}

#[derive(Debug, Default)]
pub struct SubwayGraph {
    adjacency: HashMap<i64, Vec<(i64, i32)>>,
}

impl SubwayGraph {
    pub fn new(sections: &[Section]) -> Self {
        let mut adjacency: HashMap<i64, Vec<(i64, i32)>> = HashMap::new();
        for s in sections {
            adjacency
                .entry(s.up_station_id)
                .or_default()
                .push((s.down_station_id, s.distance));
            adjacency
                .entry(s.down_station_id)
                .or_default()
                .push((s.up_station_id, s.distance));
        }
        Self { adjacency }
    }

    /// Dijkstra from `source` to `target`.
    pub fn shortest_path(&self, source: i64, target: i64) -> Result<GraphPath, PathError> {
        if source == target {
            return Err(PathError::SameStation);
        }
        if !self.adjacency.contains_key(&source) || !self.adjacency.contains_key(&target) {
            return Err(PathError::Unconnected);
        }

        let mut dist: HashMap<i64, i64> = HashMap::from([(source, 0)]);
        let mut prev: HashMap<i64, i64> = HashMap::new();
        let mut heap = BinaryHeap::from([Reverse((0i64, source))]);

        while let Some(Reverse((d, station))) = heap.pop() {
            if station == target {
                break;
            }
            if dist.get(&station).is_some_and(|&best| d > best) {
                continue;
            }
            for &(next, weight) in self.adjacency.get(&station).into_iter().flatten() {
                let candidate = d + i64::from(weight);
                if dist.get(&next).is_none_or(|&best| candidate < best) {
                    dist.insert(next, candidate);
                    prev.insert(next, station);
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        let Some(&total) = dist.get(&target) else {
            return Err(PathError::Unconnected);
        };

        let mut station_ids = vec![target];
        let mut current = target;
        while let Some(&p) = prev.get(&current) {
            station_ids.push(p);
            current = p;
        }
        station_ids.reverse();

        Ok(GraphPath {
            station_ids,
            distance: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //  1 -(10)- 2 -(10)- 3
    //  |                 |
    //  +-------(5)-------4 -(2)- 3
    fn graph() -> SubwayGraph {
        SubwayGraph::new(&[
            Section::new(1, 2, 10),
            Section::new(2, 3, 10),
            Section::new(1, 4, 5),
            Section::new(4, 3, 2),
            Section::new(8, 9, 1),
        ])
    }

    #[test]
    fn picks_the_shortest_route_across_lines() {
        let path = graph().shortest_path(1, 3).unwrap();
        assert_eq!(path.station_ids, vec![1, 4, 3]);
        assert_eq!(path.distance, 7);
    }

    #[test]
    fn sections_are_traversable_in_both_directions() {
        let path = graph().shortest_path(3, 2).unwrap();
        assert_eq!(path.station_ids, vec![3, 2]);
        assert_eq!(path.distance, 10);
    }

    #[test]
    fn disjoint_components_are_unconnected() {
        assert_eq!(graph().shortest_path(1, 9), Err(PathError::Unconnected));
        assert_eq!(graph().shortest_path(1, 42), Err(PathError::Unconnected));
    }

    #[test]
    fn same_station_is_rejected() {
        assert_eq!(graph().shortest_path(2, 2), Err(PathError::SameStation));
    }
}
