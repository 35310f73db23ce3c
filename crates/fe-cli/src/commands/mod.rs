pub mod chart;
pub mod charts;
pub mod config;
pub mod gate;
pub mod plans;
pub mod reports;

use fe_core::format::format_number;

/// Integers print with separators, fractions as-is (power factor, kW/RT).
pub fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format_number(v, 0)
    } else {
        format!("{v}")
    }
}

/// Left-align every column to its widest cell.
pub fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(header)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(rows.iter().map(|r| line(r)));
    out.join("\n")
}
