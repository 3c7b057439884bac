//! CSV export of a placement arrangement.

use std::io::{self, Write};
use stowage::core::Placement;

/// Header row of the arrangement CSV.
pub const CSV_HEADER: &str = "Item ID,Container ID,\"(W1,D1,H1)\",\"(W2,D2,H2)\"";

/// Writes one row per placement: item, container, start corner and end corner.
pub fn write_arrangement_csv<W: Write>(mut writer: W, placements: &[Placement]) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for p in placements {
        writeln!(writer, "{}", row(p))?;
    }
    Ok(())
}

/// Renders the arrangement CSV to a string.
pub fn arrangement_csv(placements: &[Placement]) -> String {
    let mut csv = format!("{}\n", CSV_HEADER);
    for p in placements {
        csv.push_str(&row(p));
        csv.push('\n');
    }
    csv
}

fn row(p: &Placement) -> String {
    format!(
        "{},{},{},{}",
        field(&p.item_id),
        field(&p.container_id),
        corner(p.start()),
        corner(p.end())
    )
}

fn corner(p: [f64; 3]) -> String {
    format!("\"({},{},{})\"", p[0], p[1], p[2])
}

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
