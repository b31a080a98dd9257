use std::io::Write;

/// Decimal places used for histogram bins unless configured otherwise.
pub const DEFAULT_HISTOGRAM_PRECISION: usize = 2;

/// Decimal places used for measurement tables.
pub const MEASUREMENT_PRECISION: usize = 6;

/// A single field of a feature row.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// A smoothed histogram bin, written with the histogram precision.
    Binned(f64),
    /// A raw measurement, written at full precision.
    Exact(f64),
    /// A tally or flag.
    Count(u64),
    /// Identifiers and labels copied from the input.
    Text(String),
    /// An absent value (e.g. the label of a prediction-only record).
    Empty,
}

impl FeatureValue {
    pub fn render(&self, histogram_precision: usize) -> String {
        match self {
            FeatureValue::Binned(v) => format!("{v:.histogram_precision$}"),
            FeatureValue::Exact(v) => v.to_string(),
            FeatureValue::Count(n) => n.to_string(),
            FeatureValue::Text(s) => s.clone(),
            FeatureValue::Empty => String::new(),
        }
    }
}

/// One comma-separated output row, built left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    values: Vec<FeatureValue>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: FeatureValue) {
        self.values.push(value);
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.values.push(FeatureValue::Text(text.into()));
    }

    pub fn push_exact(&mut self, value: f64) {
        self.values.push(FeatureValue::Exact(value));
    }

    pub fn push_count(&mut self, value: u64) {
        self.values.push(FeatureValue::Count(value));
    }

    pub fn extend_exact(&mut self, values: impl IntoIterator<Item = f64>) {
        self.values.extend(values.into_iter().map(FeatureValue::Exact));
    }

    pub fn extend_binned(&mut self, values: impl IntoIterator<Item = f64>) {
        self.values.extend(values.into_iter().map(FeatureValue::Binned));
    }

    pub fn extend_counts(&mut self, values: impl IntoIterator<Item = u64>) {
        self.values.extend(values.into_iter().map(FeatureValue::Count));
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = FeatureValue>) {
        self.values.extend(values);
    }
}

/// Writes feature rows as header-less comma-separated lines.
pub struct FeatureWriter<W: Write> {
    inner: csv::Writer<W>,
    histogram_precision: usize,
}

impl<W: Write> FeatureWriter<W> {
    pub fn new(writer: W, histogram_precision: usize) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);
        Self {
            inner,
            histogram_precision,
        }
    }

    pub fn write_row(&mut self, row: &FeatureRow) -> Result<(), csv::Error> {
        self.inner.write_record(
            row.values
                .iter()
                .map(|value| value.render(self.histogram_precision)),
        )
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.inner
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

/// Writes a measurement table: one line per frame, the frame number followed by one
/// value per task, separated by spaces.
pub fn write_measurement_table<W: Write>(
    writer: W,
    rows: &[(usize, Vec<f64>)],
) -> Result<(), csv::Error> {
    let mut table = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b' ')
        .from_writer(writer);
    for (frame, values) in rows {
        let mut record = Vec::with_capacity(values.len() + 1);
        record.push(frame.to_string());
        record.extend(values.iter().map(|v| format!("{v:.MEASUREMENT_PRECISION$}")));
        table.write_record(&record)?;
    }
    table.flush()?;
    Ok(())
}
