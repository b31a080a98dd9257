use super::traits::{FrameFormat, LineErrorKind, LineReader, float_field, int_field};
use crate::core::models::atom::Atom;
use crate::core::models::cell::{CellError, UnitCell};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: LineErrorKind },
    #[error("Invalid periodic box on line {line}: {source}")]
    InvalidCell { line: usize, source: CellError },
}

/// Per-atom data of a Tinker frame that the [`Structure`] does not hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcMetadata {
    /// Force-field atom type of each atom.
    pub atom_types: Vec<i64>,
    /// Bonded partners of each atom, as the 1-based serials written in the file.
    pub connectivity: Vec<Vec<usize>>,
}

/// Tinker XYZ coordinates and ARC trajectories.
///
/// ```text
///      3  water
///     10.0  10.0  10.0  90.0  90.0  90.0
///      1  O      0.000   0.000   0.000    1     2     3
///      2  H      0.957   0.000   0.000    2     1
///      3  H     -0.240   0.927   0.000    2     1
/// ```
///
/// The periodic box line is optional; when present it becomes the frame's unit cell.
pub struct ArcFile;

impl FrameFormat for ArcFile {
    type Metadata = ArcMetadata;
    type Error = ArcError;

    const NAME: &'static str = "TINKER XYZ/ARC";

    fn read_frame<R: BufRead>(
        lines: &mut LineReader<R>,
    ) -> Result<Option<(Structure, Self::Metadata)>, Self::Error> {
        let Some(header) = lines.next_non_blank()? else {
            return Ok(None);
        };
        let mut header_fields = header.split_whitespace();
        let count: usize = int_field(header_fields.next(), "atom count")
            .map_err(|kind| parse_error(lines, kind))?;
        let title = header_fields.collect::<Vec<_>>().join(" ");

        let mut atoms = Vec::with_capacity(count);
        let mut metadata = ArcMetadata::default();
        let mut cell = None;

        while atoms.len() < count {
            let line = lines.next_line()?.ok_or_else(|| {
                parse_error(lines, LineErrorKind::UnexpectedEof { expected: "atom line" })
            })?;

            if atoms.is_empty() && cell.is_none() {
                if let Some(params) = parse_box_line(&line) {
                    let parsed = UnitCell::from_params(params).map_err(|source| {
                        ArcError::InvalidCell {
                            line: lines.line_number(),
                            source,
                        }
                    })?;
                    cell = Some(parsed);
                    continue;
                }
            }

            let (atom, atom_type, bonded) =
                parse_atom(&line).map_err(|kind| parse_error(lines, kind))?;
            atoms.push(atom);
            metadata.atom_types.push(atom_type);
            metadata.connectivity.push(bonded);
        }

        let mut structure = Structure::new(atoms).with_title(title);
        if let Some(cell) = cell {
            structure = structure.with_cell(cell);
        }
        Ok(Some((structure, metadata)))
    }
}

fn parse_error<R: BufRead>(lines: &LineReader<R>, kind: LineErrorKind) -> ArcError {
    ArcError::Parse {
        line: lines.line_number(),
        kind,
    }
}

/// Six numbers and nothing else: `a b c alpha beta gamma`.
fn parse_box_line(line: &str) -> Option<[f64; 6]> {
    let values = line
        .split_whitespace()
        .map(|token| token.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    values.try_into().ok()
}

fn parse_atom(line: &str) -> Result<(Atom, i64, Vec<usize>), LineErrorKind> {
    let mut fields = line.split_whitespace();
    let _serial: usize = int_field(fields.next(), "serial")?;
    let symbol = fields
        .next()
        .ok_or(LineErrorKind::MissingField { field: "symbol" })?;
    let x = float_field(fields.next(), "x")?;
    let y = float_field(fields.next(), "y")?;
    let z = float_field(fields.next(), "z")?;
    let atom_type: i64 = int_field(fields.next(), "atom type")?;
    let bonded = fields
        .map(|token| int_field(Some(token), "connectivity"))
        .collect::<Result<Vec<usize>, _>>()?;
    Ok((Atom::new(symbol, Point3::new(x, y, z)), atom_type, bonded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PERIODIC_WATER: &str = "\
     3  water box
    10.0  11.0  12.0  90.0  90.0  90.0
     1  O      0.000   0.000   0.000    1     2     3
     2  H      0.957   0.000   0.000    2     1
     3  H     -0.240   0.927   0.000    2     1
     3  water box
    10.0  11.0  12.0  90.0  90.0  90.0
     1  O      0.100   0.000   0.000    1     2     3
     2  H      1.057   0.000   0.000    2     1
     3  H     -0.140   0.927   0.000    2     1
";

    #[test]
    fn reads_atoms_types_and_connectivity() {
        let input = "2 hydrogen fluoride\n1 H 0.0 0.0 0.0 5 2\n2 F 0.0 0.0 0.92 9 1\n";
        let (structure, metadata) = ArcFile::frames(Cursor::new(input))
            .next()
            .unwrap()
            .unwrap();

        assert_eq!(structure.title, "hydrogen fluoride");
        assert_eq!(structure.symbols().collect::<Vec<_>>(), vec!["H", "F"]);
        assert!(structure.cell().is_none());
        assert_eq!(structure.atoms()[0].charge, None);
        assert_eq!(metadata.atom_types, vec![5, 9]);
        assert_eq!(metadata.connectivity, vec![vec![2], vec![1]]);
    }

    #[test]
    fn box_line_becomes_unit_cell_for_every_frame() {
        let frames = ArcFile::frames(Cursor::new(PERIODIC_WATER))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
        for (structure, _) in &frames {
            let cell = structure.cell().unwrap();
            assert_eq!(cell.params(), [10.0, 11.0, 12.0, 90.0, 90.0, 90.0]);
            assert_eq!(structure.len(), 3);
        }
        assert_eq!(frames[1].0.position(0), &Point3::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn invalid_box_is_reported() {
        let input = "1\n10.0 10.0 10.0 90.0 90.0 190.0\n1 C 0 0 0 1\n";
        let err = ArcFile::frames(Cursor::new(input))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ArcError::InvalidCell { line: 2, .. }));
    }

    #[test]
    fn missing_atom_type_is_a_parse_error() {
        let err = ArcFile::frames(Cursor::new("1\n1 C 0.0 0.0 0.0\n"))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(
            err,
            ArcError::Parse {
                line: 2,
                kind: LineErrorKind::MissingField {
                    field: "atom type"
                }
            }
        ));
    }
}
