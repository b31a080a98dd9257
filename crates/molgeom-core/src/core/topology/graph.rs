use super::radii::CovalentRadii;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::distance;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("No covalent radius is defined for element '{symbol}' (atom {atom})")]
    UnknownElement { symbol: String, atom: usize },

    #[error("Atom index {index} is out of range for a structure of {len} atoms")]
    AtomOutOfRange { index: usize, len: usize },

    #[error("Atom {atom} cannot be bonded to itself")]
    SelfBond { atom: usize },
}

/// Undirected covalent-bond graph of one frame.
///
/// For every atom the graph stores a map from bonded neighbor index to bond length.
/// Neighbor maps are ordered by index, so "first neighbor" always means the bonded atom
/// with the lowest index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborGraph {
    adjacency: Vec<BTreeMap<usize, f64>>,
}

impl NeighborGraph {
    /// Connects every pair of atoms closer than the sum of their covalent radii.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownElement`] for the first atom whose symbol has no
    /// covalent radius.
    pub fn build(structure: &Structure, radii: &CovalentRadii) -> Result<Self, TopologyError> {
        let atom_radii = structure
            .atoms()
            .iter()
            .enumerate()
            .map(|(index, atom)| {
                radii
                    .get(&atom.symbol)
                    .ok_or_else(|| TopologyError::UnknownElement {
                        symbol: atom.symbol.clone(),
                        atom: index,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n = structure.len();
        let mut graph = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(structure.position(i), structure.position(j));
                if d < atom_radii[i] + atom_radii[j] {
                    graph.connect(i, j, d);
                }
            }
        }
        Ok(graph)
    }

    /// Builds a graph from an explicit bond list.
    pub fn from_bonds(
        atom_count: usize,
        bonds: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, TopologyError> {
        let mut graph = Self::empty(atom_count);
        for (i, j, length) in bonds {
            for index in [i, j] {
                if index >= atom_count {
                    return Err(TopologyError::AtomOutOfRange {
                        index,
                        len: atom_count,
                    });
                }
            }
            if i == j {
                return Err(TopologyError::SelfBond { atom: i });
            }
            graph.connect(i, j, length);
        }
        Ok(graph)
    }

    fn empty(atom_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); atom_count],
        }
    }

    fn connect(&mut self, i: usize, j: usize, length: f64) {
        self.adjacency[i].insert(j, length);
        self.adjacency[j].insert(i, length);
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn bond_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Bonded neighbors of `atom` in ascending index order.
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[atom].keys().copied()
    }

    pub fn bonds_of(&self, atom: usize) -> &BTreeMap<usize, f64> {
        &self.adjacency[atom]
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    pub fn first_neighbor(&self, atom: usize) -> Option<usize> {
        self.adjacency[atom].keys().next().copied()
    }

    pub fn bond_length(&self, i: usize, j: usize) -> Option<f64> {
        self.adjacency.get(i).and_then(|bonds| bonds.get(&j)).copied()
    }

    pub fn are_bonded(&self, i: usize, j: usize) -> bool {
        self.bond_length(i, j).is_some()
    }

    /// Atoms two bond-steps away from `atom`, visited through each direct neighbor in
    /// turn. An atom reachable through several neighbors appears once per path, and
    /// `atom` itself is never yielded.
    pub fn second_shell(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors(atom)
            .flat_map(move |i| self.neighbors(i))
            .filter(move |&j| j != atom)
    }

    /// Marks `atom`, its direct neighbors and their neighbors.
    pub fn within_two_bonds(&self, atom: usize) -> Vec<bool> {
        let mut mask = vec![false; self.len()];
        mask[atom] = true;
        for i in self.neighbors(atom) {
            mask[i] = true;
            for j in self.neighbors(i) {
                mask[j] = true;
            }
        }
        mask
    }
}
