use super::atom::Atom;
use super::cell::UnitCell;
use nalgebra::Point3;

/// One frame of a molecular structure: an ordered list of atoms and, when periodic
/// boundary conditions apply, the unit cell.
///
/// Atom indices are positions in [`Structure::atoms`] and are stable for the lifetime of
/// the frame. Everything derived from a frame (neighbor graph, cyclic set, bond-distance
/// labelings) refers to atoms by these indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub title: String,
    atoms: Vec<Atom>,
    cell: Option<UnitCell>,
}

impl Structure {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            title: String::new(),
            atoms,
            cell: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_cell(mut self, cell: UnitCell) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn cell(&self) -> Option<&UnitCell> {
        self.cell.as_ref()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.atoms.len()
    }

    /// Position of atom `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Callers validate indices at the boundary
    /// (see [`Structure::contains`]) before entering the numeric kernels.
    pub fn position(&self, index: usize) -> &Point3<f64> {
        &self.atoms[index].position
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.atoms.iter().map(|atom| &atom.position)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.atoms.iter().map(|atom| atom.symbol.as_str())
    }

    /// True when every atom carries a partial charge.
    pub fn has_charges(&self) -> bool {
        !self.atoms.is_empty() && self.atoms.iter().all(|atom| atom.charge.is_some())
    }
}
