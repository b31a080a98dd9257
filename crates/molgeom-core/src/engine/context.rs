use super::config::DescriptorConfig;
use super::error::DescriptorError;
use crate::core::models::atom::Species;
use crate::core::models::structure::Structure;
use crate::core::topology::graph::{NeighborGraph, TopologyError};
use crate::core::topology::paths::BondDistances;
use crate::core::topology::radii::CovalentRadii;
use crate::core::topology::rings::CyclicSet;
use nalgebra::Point3;

/// Read-only view of one frame shared by every descriptor evaluated on it.
///
/// The bond graph and cyclic set are derived once when the context is built, so all
/// descriptor calls for the frame see the same topology.
pub struct FrameContext<'a> {
    pub structure: &'a Structure,
    pub graph: NeighborGraph,
    pub cyclic: CyclicSet,
    pub config: &'a DescriptorConfig,
}

impl<'a> FrameContext<'a> {
    pub fn build(
        structure: &'a Structure,
        radii: &CovalentRadii,
        config: &'a DescriptorConfig,
    ) -> Result<Self, TopologyError> {
        let graph = NeighborGraph::build(structure, radii)?;
        Ok(Self::with_graph(structure, graph, config))
    }

    /// Builds a context around an already known bond graph.
    pub fn with_graph(structure: &'a Structure, graph: NeighborGraph, config: &'a DescriptorConfig) -> Self {
        let cyclic = CyclicSet::build(&graph, structure);
        Self {
            structure,
            graph,
            cyclic,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.structure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }

    pub fn check_atom(&self, index: usize) -> Result<(), DescriptorError> {
        if self.structure.contains(index) {
            Ok(())
        } else {
            Err(DescriptorError::AtomOutOfRange {
                index,
                len: self.structure.len(),
            })
        }
    }

    pub fn check_atoms(&self, indices: &[usize]) -> Result<(), DescriptorError> {
        indices.iter().try_for_each(|&i| self.check_atom(i))
    }

    #[inline]
    pub fn species(&self, atom: usize) -> Species {
        self.structure.atoms()[atom].species
    }

    #[inline]
    pub fn position(&self, atom: usize) -> &Point3<f64> {
        self.structure.position(atom)
    }

    pub fn charge(&self, atom: usize) -> Result<f64, DescriptorError> {
        self.check_atom(atom)?;
        self.structure.atoms()[atom]
            .charge
            .ok_or(DescriptorError::MissingCharge { atom })
    }

    pub fn bond_distances(&self, source: usize) -> BondDistances {
        BondDistances::from_source(source, &self.graph)
    }

    pub fn is_cyclic(&self, atom: usize) -> bool {
        self.cyclic.contains(atom)
    }

    pub fn cyclic_neighbor_count(&self, atom: usize) -> usize {
        self.cyclic.count_cyclic_neighbors(atom, &self.graph)
    }
}
