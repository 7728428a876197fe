//! Access to the performance data text of a scanned row
//!
//! The query engine owns its rows; the aggregator only ever needs the perfdata
//! string of a row, which it obtains through a [`PerfdataColumn`].

/// Read-only accessor yielding the performance data text of a row
pub trait PerfdataColumn<R: ?Sized> {
    /// Performance data of `row`, or `None` when the row has none
    fn perf_data<'r>(&self, row: &'r R) -> Option<&'r str>;
}

impl<R: ?Sized, C: PerfdataColumn<R> + ?Sized> PerfdataColumn<R> for &C {
    fn perf_data<'r>(&self, row: &'r R) -> Option<&'r str> {
        (**self).perf_data(row)
    }
}

/// Column for rows that are the performance data text themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct TextColumn;

impl PerfdataColumn<str> for TextColumn {
    fn perf_data<'r>(&self, row: &'r str) -> Option<&'r str> {
        Some(row)
    }
}

impl PerfdataColumn<String> for TextColumn {
    fn perf_data<'r>(&self, row: &'r String) -> Option<&'r str> {
        Some(row.as_str())
    }
}

impl PerfdataColumn<Option<String>> for TextColumn {
    fn perf_data<'r>(&self, row: &'r Option<String>) -> Option<&'r str> {
        row.as_deref()
    }
}

/// Column selecting one field of a delimited record
///
/// A record with fewer fields than `index + 1` has no performance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedColumn {
    index: usize,
    delimiter: char,
}

impl DelimitedColumn {
    /// Select field `index` (0-based) of tab separated records
    pub fn new(index: usize) -> Self {
        Self {
            index,
            delimiter: '\t',
        }
    }

    /// Use a different field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Selected field (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Field delimiter
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl PerfdataColumn<str> for DelimitedColumn {
    fn perf_data<'r>(&self, row: &'r str) -> Option<&'r str> {
        row.split(self.delimiter).nth(self.index)
    }
}

impl PerfdataColumn<String> for DelimitedColumn {
    fn perf_data<'r>(&self, row: &'r String) -> Option<&'r str> {
        self.perf_data(row.as_str())
    }
}
