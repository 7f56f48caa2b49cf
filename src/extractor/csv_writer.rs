//! CSV output for decoded sheets.

use crate::extractor::workbook_reader::Table;
use csv::{Terminator, Writer, WriterBuilder};
use std::io::{self, Write};
use std::path::Path;

/// Comma-delimited, minimal quoting, rows end in `\n`.
pub fn csv_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.terminator(Terminator::Any(b'\n'));
    builder
}

/// Header row followed by every data row. No index column.
///
/// Returns the number of data rows. An empty table writes nothing.
pub fn write_table<W: Write>(writer: &mut Writer<W>, table: &Table) -> csv::Result<u64> {
    if table.is_empty() {
        return Ok(0);
    }

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    Ok(table.rows.len() as u64)
}

/// Write `table` to `path`, overwriting any existing file. Returns the
/// number of data rows written.
pub fn write_csv<P: AsRef<Path>>(path: P, table: &Table) -> io::Result<u64> {
    let mut writer = csv_builder().from_path(path).map_err(io::Error::from)?;
    let data_rows = write_table(&mut writer, table).map_err(io::Error::from)?;
    writer.flush()?;
    Ok(data_rows)
}
