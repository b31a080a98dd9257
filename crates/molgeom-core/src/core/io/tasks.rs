use super::traits::{LineErrorKind, LineReader, int_field};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Periodicity applied to torsion tasks that do not name one.
pub const DEFAULT_TORSION_PERIOD: u32 = 360;

#[derive(Debug, Error)]
pub enum TaskFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: LineErrorKind },
    #[error("Unusual line {line}: expected 2 to 5 atom indices, found {found} fields")]
    UnusualLine { line: usize, found: usize },
    #[error("Torsion periodicity on line {line} must be positive")]
    InvalidPeriod { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TorsionTask {
    pub atoms: [usize; 4],
    pub period: u32,
}

/// Geometry measurements requested for every frame, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryTasks {
    pub distances: Vec<[usize; 2]>,
    pub angles: Vec<[usize; 3]>,
    pub torsions: Vec<TorsionTask>,
}

impl GeometryTasks {
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty() && self.angles.is_empty() && self.torsions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.distances.len() + self.angles.len() + self.torsions.len()
    }

    /// Largest atom index referenced by any task.
    pub fn max_atom_index(&self) -> Option<usize> {
        let distances = self.distances.iter().flatten();
        let angles = self.angles.iter().flatten();
        let torsions = self.torsions.iter().flat_map(|t| t.atoms.iter());
        distances.chain(angles).chain(torsions).copied().max()
    }

    /// Reads a task file: one task per line as 2 (distance), 3 (angle) or 4 to 5
    /// (torsion, optional periodicity) whitespace-separated integers. Lines starting
    /// with `#` and blank lines are skipped.
    pub fn read<R: BufRead>(reader: R) -> Result<Self, TaskFileError> {
        let mut lines = LineReader::new(reader);
        let mut tasks = Self::default();

        while let Some(line) = lines.next_line()? {
            let number = lines.line_number();
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() || fields[0].starts_with('#') {
                continue;
            }
            let parse = |kind| TaskFileError::Parse { line: number, kind };
            let index = |i: usize| -> Result<usize, TaskFileError> {
                int_field(fields.get(i).copied(), "atom index").map_err(parse)
            };

            match fields.len() {
                2 => tasks.distances.push([index(0)?, index(1)?]),
                3 => tasks.angles.push([index(0)?, index(1)?, index(2)?]),
                4 | 5 => {
                    let period = match fields.get(4) {
                        Some(&value) => int_field(Some(value), "periodicity").map_err(parse)?,
                        None => DEFAULT_TORSION_PERIOD,
                    };
                    if period == 0 {
                        return Err(TaskFileError::InvalidPeriod { line: number });
                    }
                    tasks.torsions.push(TorsionTask {
                        atoms: [index(0)?, index(1)?, index(2)?, index(3)?],
                        period,
                    });
                }
                found => {
                    return Err(TaskFileError::UnusualLine {
                        line: number,
                        found,
                    });
                }
            }
        }
        Ok(tasks)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaskFileError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }
}
