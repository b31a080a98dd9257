use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// What went wrong on a single line of a text input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineErrorKind {
    #[error("Invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid number in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Required field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("Unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },
}

/// Reads a field that must parse as an integer.
pub(crate) fn int_field<T: FromStr>(token: Option<&str>, field: &'static str) -> Result<T, LineErrorKind> {
    let value = token.ok_or(LineErrorKind::MissingField { field })?;
    value.parse().map_err(|_| LineErrorKind::InvalidInt {
        field,
        value: value.to_string(),
    })
}

/// Reads a field that must parse as a float.
pub(crate) fn float_field(token: Option<&str>, field: &'static str) -> Result<f64, LineErrorKind> {
    let value = token.ok_or(LineErrorKind::MissingField { field })?;
    value.parse().map_err(|_| LineErrorKind::InvalidFloat {
        field,
        value: value.to_string(),
    })
}

/// A line-oriented reader that keeps track of the 1-based number of the last line read.
pub struct LineReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Reads the next line without its trailing newline, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    /// Reads the next line that is not blank, or `None` at end of input.
    pub fn next_non_blank(&mut self) -> io::Result<Option<String>> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    pub fn line_number(&self) -> usize {
        self.line
    }
}

/// A structure or trajectory format that is read one frame at a time.
///
/// Reaching the end of the input before a new frame starts is not an error: the reader
/// returns `Ok(None)` and iteration stops there.
pub trait FrameFormat: Sized {
    /// Per-frame data the format carries beyond the [`Structure`] itself.
    type Metadata;

    /// The error type for I/O and parsing failures.
    type Error: Error + From<io::Error>;

    /// Human-readable name used in listings and messages.
    const NAME: &'static str;

    /// Reads the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is truncated or a line cannot be parsed.
    fn read_frame<R: BufRead>(
        lines: &mut LineReader<R>,
    ) -> Result<Option<(Structure, Self::Metadata)>, Self::Error>;

    /// Iterates over every frame of a reader.
    fn frames<R: BufRead>(reader: R) -> Frames<R, Self> {
        Frames {
            lines: LineReader::new(reader),
            finished: false,
            _format: PhantomData,
        }
    }

    /// Opens a file and iterates over its frames.
    fn frames_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Frames<BufReader<File>, Self>, Self::Error> {
        let file = File::open(path)?;
        Ok(Self::frames(BufReader::new(file)))
    }

    /// Reads the first frame of a file.
    fn read_first_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Option<(Structure, Self::Metadata)>, Self::Error> {
        let file = File::open(path)?;
        let mut lines = LineReader::new(BufReader::new(file));
        Self::read_frame(&mut lines)
    }
}

/// Iterator over the frames of a [`FrameFormat`] input. Stops after the first error.
pub struct Frames<R, F> {
    lines: LineReader<R>,
    finished: bool,
    _format: PhantomData<F>,
}

impl<R: BufRead, F: FrameFormat> Iterator for Frames<R, F> {
    type Item = Result<(Structure, F::Metadata), F::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match F::read_frame(&mut self.lines) {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn line_reader_strips_newlines_and_counts_lines() {
        let mut lines = LineReader::new(Cursor::new("first\r\nsecond\n\nlast"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("first"));
        assert_eq!(lines.line_number(), 1);
        assert_eq!(lines.next_non_blank().unwrap().as_deref(), Some("second"));
        assert_eq!(lines.next_non_blank().unwrap().as_deref(), Some("last"));
        assert_eq!(lines.line_number(), 4);
        assert_eq!(lines.next_line().unwrap(), None);
    }

    #[test]
    fn field_helpers_report_missing_and_invalid_values() {
        assert_eq!(int_field::<usize>(Some("12"), "count"), Ok(12));
        assert_eq!(
            int_field::<usize>(Some("1x"), "count"),
            Err(LineErrorKind::InvalidInt {
                field: "count",
                value: "1x".to_string()
            })
        );
        assert_eq!(
            float_field(None, "x"),
            Err(LineErrorKind::MissingField { field: "x" })
        );
        assert_eq!(float_field(Some("-1.5e-1"), "x"), Ok(-0.15));
    }
}
