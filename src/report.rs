use crate::catalog::{Interface, InterfaceLocation, InterfaceMap};
use std::io::{self, Write};

const HEADERS: [&str; 4] = ["Interface", "Package", "Source File", "Line"];
const COLUMN_GAP: &str = "  ";

/// One table row, already rendered to text
struct Row {
    cells: [String; 4],
}

impl Row {
    fn new(interface: &Interface, location: &InterfaceLocation) -> Self {
        Row {
            cells: [
                format!("[{}]({})", interface.name, location.link),
                interface.package.clone(),
                location.source_file.clone(),
                location.line_number.to_string(),
            ],
        }
    }
}

/// Interfaces ordered for display
pub struct Report {
    entries: Vec<(Interface, InterfaceLocation)>,
}

impl Report {
    /// Sort the merged interfaces by name (byte-wise). Equal names are ordered
    /// by package so the output stays stable between runs.
    pub fn new(interfaces: InterfaceMap) -> Self {
        let mut entries: Vec<(Interface, InterfaceLocation)> = interfaces.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then_with(|| a.package.cmp(&b.package)));
        Report { entries }
    }

    pub fn entries(&self) -> &[(Interface, InterfaceLocation)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the table: header, dash separator, then one left-justified row
    /// per interface, columns separated by two spaces. Column widths come from
    /// the data only, so a header wider than its column simply overflows.
    pub fn write_table<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|(interface, location)| Row::new(interface, location))
            .collect();

        let mut widths = [0usize; 4];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(output, &widths, &HEADERS)?;
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(output, "{}", separator.join(COLUMN_GAP))?;
        for row in &rows {
            write_line(output, &widths, &row.cells)?;
        }

        Ok(())
    }
}

#[inline]
fn write_line<W: Write, S: AsRef<str>>(output: &mut W, widths: &[usize; 4], cells: &[S; 4]) -> io::Result<()> {
    for (i, (width, cell)) in widths.iter().zip(cells).enumerate() {
        if i > 0 {
            output.write_all(COLUMN_GAP.as_bytes())?;
        }
        write!(output, "{:<width$}", cell.as_ref(), width = *width)?;
    }
    writeln!(output)
}
