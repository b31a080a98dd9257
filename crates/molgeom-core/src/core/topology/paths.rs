use super::graph::NeighborGraph;
use std::collections::VecDeque;

/// Bond-count distances from one source atom to every atom of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondDistances {
    source: usize,
    hops: Vec<Option<u32>>,
}

impl BondDistances {
    /// Breadth-first labeling of every atom reachable from `source`.
    ///
    /// Atoms in other fragments stay unlabeled.
    pub fn from_source(source: usize, graph: &NeighborGraph) -> Self {
        let mut hops = vec![None; graph.len()];
        hops[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            let next = hops[current].map_or(0, |h| h + 1);
            for neighbor in graph.neighbors(current) {
                if hops[neighbor].is_none() {
                    hops[neighbor] = Some(next);
                    queue.push_back(neighbor);
                }
            }
        }

        Self { source, hops }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Bond count from the source to `atom`, or `None` when unreachable.
    pub fn get(&self, atom: usize) -> Option<u32> {
        self.hops.get(atom).copied().flatten()
    }

    pub fn is_reachable(&self, atom: usize) -> bool {
        self.get(atom).is_some()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph(n: usize) -> NeighborGraph {
        NeighborGraph::from_bonds(n, (0..n - 1).map(|i| (i, i + 1, 1.5))).unwrap()
    }

    #[test]
    fn source_has_zero_distance() {
        let graph = chain_graph(3);
        let labels = BondDistances::from_source(1, &graph);
        assert_eq!(labels.source(), 1);
        assert_eq!(labels.get(1), Some(0));
    }

    #[test]
    fn linear_chain_distances_equal_index_offsets() {
        let n = 8;
        let graph = chain_graph(n);
        for source in 0..n {
            let labels = BondDistances::from_source(source, &graph);
            for atom in 0..n {
                assert_eq!(labels.get(atom), Some(atom.abs_diff(source) as u32));
            }
        }
    }

    #[test]
    fn ring_distances_take_the_shorter_way_round() {
        let graph = NeighborGraph::from_bonds(6, (0..6).map(|i| (i, (i + 1) % 6, 1.4))).unwrap();
        let labels = BondDistances::from_source(0, &graph);
        let hops: Vec<_> = (0..6).map(|i| labels.get(i)).collect();
        assert_eq!(
            hops,
            vec![Some(0), Some(1), Some(2), Some(3), Some(2), Some(1)]
        );
    }

    #[test]
    fn disconnected_fragments_are_unreachable() {
        let graph = NeighborGraph::from_bonds(4, [(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
        let labels = BondDistances::from_source(0, &graph);
        assert!(labels.is_reachable(1));
        assert!(!labels.is_reachable(2));
        assert_eq!(labels.get(3), None);
        assert_eq!(labels.get(99), None);
        assert_eq!(labels.len(), 4);
    }
}
