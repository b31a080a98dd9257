use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

/// Number of per-element channels tracked by the descriptor accumulators.
pub const TRACKED_SPECIES: usize = 5;

/// Index of the aggregate channel that collects every non-hydrogen contribution.
pub const HEAVY_CHANNEL: usize = TRACKED_SPECIES;

/// Total number of channels (the five tracked elements plus the heavy aggregate).
pub const NUM_CHANNELS: usize = TRACKED_SPECIES + 1;

/// The chemical species an atom is classified into for descriptor bookkeeping.
///
/// The descriptor engine works with a small, fixed set of elements (the ones found in
/// small organic molecules). Anything else is bucketed into [`Species::Other`], which
/// contributes to the heavy-atom aggregate channel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Species {
    /// Hydrogen (H).
    Hydrogen,
    /// Carbon (C).
    Carbon,
    /// Nitrogen (N).
    Nitrogen,
    /// Fluorine (F).
    Fluorine,
    /// Oxygen (O).
    Oxygen,
    /// Any element outside the tracked set.
    #[default]
    Other,
}

impl Species {
    /// The tracked species in channel order.
    pub const TRACKED: [Species; TRACKED_SPECIES] = [
        Species::Hydrogen,
        Species::Carbon,
        Species::Nitrogen,
        Species::Fluorine,
        Species::Oxygen,
    ];

    /// Classifies an element symbol.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. Symbols that
    /// are not one of H, C, N, F, O are classified as [`Species::Other`].
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "H" => Species::Hydrogen,
            "C" => Species::Carbon,
            "N" => Species::Nitrogen,
            "F" => Species::Fluorine,
            "O" => Species::Oxygen,
            _ => Species::Other,
        }
    }

    /// Returns the per-element channel of this species, or `None` for untracked species.
    pub fn channel(self) -> Option<usize> {
        match self {
            Species::Hydrogen => Some(0),
            Species::Carbon => Some(1),
            Species::Nitrogen => Some(2),
            Species::Fluorine => Some(3),
            Species::Oxygen => Some(4),
            Species::Other => None,
        }
    }

    pub fn is_hydrogen(self) -> bool {
        self == Species::Hydrogen
    }

    /// Iterates over every channel this species contributes to: its own element
    /// channel (if tracked) and, for non-hydrogen species, the heavy aggregate.
    pub fn channels(self) -> impl Iterator<Item = usize> {
        let heavy = (!self.is_hydrogen()).then_some(HEAVY_CHANNEL);
        self.channel().into_iter().chain(heavy)
    }
}

/// Writes an element symbol the conventional way: trimmed, first letter upper case and
/// the rest lower case (`" cL "` becomes `"Cl"`).
pub fn canonical_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSpeciesError(pub String);

impl fmt::Display for ParseSpeciesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a tracked element symbol", self.0)
    }
}

impl std::error::Error for ParseSpeciesError {}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    /// Strict parsing: only the tracked element symbols are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Species::from_symbol(s) {
            Species::Other => Err(ParseSpeciesError(s.to_string())),
            species => Ok(species),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Species::Hydrogen => "H",
                Species::Carbon => "C",
                Species::Nitrogen => "N",
                Species::Fluorine => "F",
                Species::Oxygen => "O",
                Species::Other => "X",
            }
        )
    }
}

/// An atom of a single structure frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol as read from the input (e.g., "C", "Cl").
    pub symbol: String,
    /// The descriptor species derived from `symbol`.
    pub species: Species,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Partial charge in elementary charge units, when the input format carries one.
    pub charge: Option<f64>,
}

impl Atom {
    /// Creates a new uncharged `Atom`, classifying its species from the symbol.
    ///
    /// The symbol is stored in canonical case, see [`canonical_symbol`].
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol.
    /// * `position` - The Cartesian coordinates of the atom.
    pub fn new(symbol: &str, position: Point3<f64>) -> Self {
        let symbol = canonical_symbol(symbol);
        Self {
            species: Species::from_symbol(&symbol),
            symbol,
            position,
            charge: None,
        }
    }

    /// Returns the atom with its partial charge set.
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn is_hydrogen(&self) -> bool {
        self.species.is_hydrogen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(" C ", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.symbol, "C");
        assert_eq!(atom.species, Species::Carbon);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.charge, None);
    }

    #[test]
    fn symbols_are_stored_in_canonical_case() {
        assert_eq!(Atom::new("c", Point3::origin()).symbol, "C");
        assert_eq!(Atom::new(" CL", Point3::origin()).symbol, "Cl");
        assert_eq!(Atom::new("oH", Point3::origin()).symbol, "Oh");
        assert_eq!(canonical_symbol("  "), "");
    }

    #[test]
    fn with_charge_sets_partial_charge() {
        let atom = Atom::new("O", Point3::origin()).with_charge(-0.42);
        assert_eq!(atom.charge, Some(-0.42));
    }

    #[test]
    fn from_symbol_classifies_tracked_and_untracked_elements() {
        assert_eq!(Species::from_symbol("H"), Species::Hydrogen);
        assert_eq!(Species::from_symbol("c"), Species::Carbon);
        assert_eq!(Species::from_symbol("N"), Species::Nitrogen);
        assert_eq!(Species::from_symbol("F"), Species::Fluorine);
        assert_eq!(Species::from_symbol("O"), Species::Oxygen);
        assert_eq!(Species::from_symbol("Cl"), Species::Other);
        assert_eq!(Species::from_symbol("S"), Species::Other);
    }

    #[test]
    fn from_str_rejects_untracked_symbols() {
        assert_eq!("h".parse::<Species>(), Ok(Species::Hydrogen));
        assert_eq!(
            "Br".parse::<Species>(),
            Err(ParseSpeciesError("Br".to_string()))
        );
        assert!("".parse::<Species>().is_err());
    }

    #[test]
    fn channels_route_heavy_atoms_into_aggregate() {
        assert_eq!(Species::Hydrogen.channels().collect::<Vec<_>>(), vec![0]);
        assert_eq!(
            Species::Oxygen.channels().collect::<Vec<_>>(),
            vec![4, HEAVY_CHANNEL]
        );
        assert_eq!(
            Species::Other.channels().collect::<Vec<_>>(),
            vec![HEAVY_CHANNEL]
        );
    }

    #[test]
    fn tracked_species_are_in_channel_order() {
        for (expected, species) in Species::TRACKED.iter().enumerate() {
            assert_eq!(species.channel(), Some(expected));
        }
    }

    #[test]
    fn display_prints_element_symbols() {
        assert_eq!(Species::Fluorine.to_string(), "F");
        assert_eq!(Species::Other.to_string(), "X");
    }
}
