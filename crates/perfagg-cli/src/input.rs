//! Line-oriented row input

use perfagg_query::{DelimitedColumn, PerfdataAggregator, PerfdataColumn, StatsOperation, TextColumn};
use std::io::BufRead;

/// How the perfdata text is located in an input line
#[derive(Debug, Clone, Copy)]
pub enum LineColumn {
    /// The whole line is the perfdata
    Whole(TextColumn),
    /// One field of a delimited line
    Field(DelimitedColumn),
}

impl LineColumn {
    pub fn new(field: Option<usize>, delimiter: char) -> Self {
        match field {
            Some(index) => LineColumn::Field(DelimitedColumn::new(index).with_delimiter(delimiter)),
            None => LineColumn::Whole(TextColumn),
        }
    }
}

impl PerfdataColumn<str> for LineColumn {
    fn perf_data<'r>(&self, row: &'r str) -> Option<&'r str> {
        match self {
            LineColumn::Whole(column) => column.perf_data(row),
            LineColumn::Field(column) => column.perf_data(row),
        }
    }
}

/// Feed every line of `reader` to a new aggregator, one row per line
pub fn aggregate_lines<B: BufRead>(
    reader: B,
    column: LineColumn,
    operation: StatsOperation,
) -> std::io::Result<PerfdataAggregator<LineColumn>> {
    let mut agg = PerfdataAggregator::new(column, operation);
    for line in reader.lines() {
        let line = line?;
        agg.consume(line.as_str());
    }
    Ok(agg)
}
