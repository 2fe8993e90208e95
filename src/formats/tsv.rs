//! Tab-separated report writers.
//!
//! Each table is written as a header row followed by one row per record,
//! fields joined by '\t' and lines terminated by '\n'.

use std::io::{self, Write};

use crate::report::{CompositionTable, DiffTable};

fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            writer.write_all(b"\t")?;
        }
        writer.write_all(field.as_ref().as_bytes())?;
    }
    writer.write_all(b"\n")
}

/// Writes a composition table: code, full name, count, comma-joined positions.
pub fn write_composition<W: Write>(writer: &mut W, table: &CompositionTable) -> io::Result<()> {
    write_row(writer, &table.header())?;
    for row in &table.rows {
        write_row(writer, &row.fields())?;
    }
    Ok(())
}

/// Writes a diff table: position and the residue of each sequence.
pub fn write_diff<W: Write>(writer: &mut W, table: &DiffTable) -> io::Result<()> {
    write_row(writer, &table.header())?;
    for entry in &table.rows {
        write_row(writer, &DiffTable::fields(entry))?;
    }
    Ok(())
}
