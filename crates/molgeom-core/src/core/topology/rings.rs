use super::graph::NeighborGraph;
use crate::core::models::structure::Structure;

/// Returns true when `atom` lies on a ring made only of non-hydrogen atoms.
///
/// Depth-first walk from `atom` through heavy neighbors that never steps straight back
/// along the edge it just used and never re-enters a vertex it already visited. The
/// start vertex is never marked, so reaching it again closes a ring. Hydrogen atoms are
/// never cyclic.
pub fn is_cyclic(atom: usize, graph: &NeighborGraph, structure: &Structure) -> bool {
    let is_heavy = |i: usize| !structure.atoms()[i].is_hydrogen();
    if !is_heavy(atom) {
        return false;
    }

    let mut visited = vec![false; graph.len()];
    let mut stack = vec![(atom, atom, graph.neighbors(atom))];

    while let Some((vertex, from, neighbors)) = stack.last_mut() {
        let Some(next) = neighbors.next() else {
            stack.pop();
            continue;
        };
        if !is_heavy(next) || visited[next] || next == *from {
            continue;
        }
        if next == atom {
            return true;
        }
        visited[next] = true;
        let parent = *vertex;
        stack.push((next, parent, graph.neighbors(next)));
    }
    false
}

/// The atoms of a frame that lie on at least one heavy-atom ring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CyclicSet {
    members: Vec<bool>,
}

impl CyclicSet {
    pub fn build(graph: &NeighborGraph, structure: &Structure) -> Self {
        let members = (0..graph.len())
            .map(|atom| is_cyclic(atom, graph, structure))
            .collect();
        Self { members }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.members.get(atom).copied().unwrap_or(false)
    }

    /// Number of cyclic atoms in the frame.
    pub fn len(&self) -> usize {
        self.members.iter().filter(|&&m| m).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
    }

    /// How many direct neighbors of `atom` are cyclic.
    pub fn count_cyclic_neighbors(&self, atom: usize, graph: &NeighborGraph) -> usize {
        graph.neighbors(atom).filter(|&i| self.contains(i)).count()
    }
}
