use super::traits::{FrameFormat, LineErrorKind, LineReader, float_field, int_field};
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: LineErrorKind },
}

/// XYZ / XMOL coordinates, optionally with a partial charge as fifth column.
///
/// ```text
/// 3
/// water
/// O  0.000  0.000  0.000  -0.80
/// H  0.957  0.000  0.000   0.40
/// H -0.240  0.927  0.000   0.40
/// ```
///
/// Frames follow each other directly; the comment line becomes the structure title.
pub struct XyzFile;

impl FrameFormat for XyzFile {
    type Metadata = ();
    type Error = XyzError;

    const NAME: &'static str = "XYZ/XMOL";

    fn read_frame<R: BufRead>(
        lines: &mut LineReader<R>,
    ) -> Result<Option<(Structure, Self::Metadata)>, Self::Error> {
        let Some(header) = lines.next_non_blank()? else {
            return Ok(None);
        };
        let count: usize = int_field(header.split_whitespace().next(), "atom count")
            .map_err(|kind| parse_error(lines, kind))?;

        let title = lines
            .next_line()?
            .ok_or_else(|| parse_error(lines, LineErrorKind::UnexpectedEof { expected: "comment line" }))?;

        let mut atoms = Vec::with_capacity(count);
        for _ in 0..count {
            let line = lines.next_line()?.ok_or_else(|| {
                parse_error(lines, LineErrorKind::UnexpectedEof { expected: "atom line" })
            })?;
            let atom = parse_atom(&line).map_err(|kind| parse_error(lines, kind))?;
            atoms.push(atom);
        }

        Ok(Some((Structure::new(atoms).with_title(title.trim()), ())))
    }
}

fn parse_error<R: BufRead>(lines: &LineReader<R>, kind: LineErrorKind) -> XyzError {
    XyzError::Parse {
        line: lines.line_number(),
        kind,
    }
}

fn parse_atom(line: &str) -> Result<Atom, LineErrorKind> {
    let mut fields = line.split_whitespace();
    let symbol = fields
        .next()
        .ok_or(LineErrorKind::MissingField { field: "symbol" })?;
    let x = float_field(fields.next(), "x")?;
    let y = float_field(fields.next(), "y")?;
    let z = float_field(fields.next(), "z")?;
    let atom = Atom::new(symbol, Point3::new(x, y, z));
    match fields.next() {
        Some(charge) => Ok(atom.with_charge(float_field(Some(charge), "charge")?)),
        None => Ok(atom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const TWO_FRAMES: &str = "\
3
water frame 1
O  0.000  0.000  0.000  -0.80
H  0.957  0.000  0.000   0.40
H -0.240  0.927  0.000   0.40
2
hydrogen
H 0.0 0.0 0.0
H 0.0 0.0 0.74

";

    #[test]
    fn frames_reads_every_frame_in_order() {
        let frames = XyzFile::frames(Cursor::new(TWO_FRAMES))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(frames.len(), 2);

        let (water, _) = &frames[0];
        assert_eq!(water.title, "water frame 1");
        assert_eq!(water.symbols().collect::<Vec<_>>(), vec!["O", "H", "H"]);
        assert_eq!(water.atoms()[0].charge, Some(-0.80));
        assert_eq!(water.position(1), &Point3::new(0.957, 0.0, 0.0));
        assert!(water.has_charges());

        let (hydrogen, _) = &frames[1];
        assert_eq!(hydrogen.len(), 2);
        assert_eq!(hydrogen.atoms()[1].charge, None);
    }

    #[test]
    fn truncated_frame_is_reported_with_line_number() {
        let input = "3\ncomment\nO 0 0 0\nH 1 0 0\n";
        let err = XyzFile::frames(Cursor::new(input))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 4,
                kind: LineErrorKind::UnexpectedEof { .. }
            }
        ));
    }

    #[test]
    fn malformed_coordinate_is_a_parse_error() {
        let input = "1\ncomment\nC 0.0 abc 0.0\n";
        let err = XyzFile::frames(Cursor::new(input))
            .next()
            .unwrap()
            .unwrap_err();
        match err {
            XyzError::Parse { line, kind } => {
                assert_eq!(line, 3);
                assert_eq!(
                    kind,
                    LineErrorKind::InvalidFloat {
                        field: "y",
                        value: "abc".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_atom_count_is_a_parse_error() {
        let err = XyzFile::frames(Cursor::new("three\ncomment\n"))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: LineErrorKind::InvalidInt { .. }
            }
        ));
    }

    #[test]
    fn iteration_stops_after_first_error() {
        let mut frames = XyzFile::frames(Cursor::new("x\n1\nc\nH 0 0 0\n"));
        assert!(frames.next().unwrap().is_err());
        assert!(frames.next().is_none());
    }

    #[test]
    fn read_first_from_path_reads_only_the_first_frame() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{TWO_FRAMES}").unwrap();
        let (structure, _) = XyzFile::read_first_from_path(file.path()).unwrap().unwrap();
        assert_eq!(structure.len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = XyzFile::read_first_from_path("/nonexistent/input.xyz");
        assert!(matches!(result, Err(XyzError::Io(_))));
    }
}
