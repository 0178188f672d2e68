use std::fmt::Write;

use byte_unit::{Byte, UnitType};

use crate::model::{ImageRef, Severity, SeverityTally};
use crate::report::ScanReport;

/// Format bytes into a human-readable string.
pub fn format_bytes(size: u64) -> String {
    if size == 0 {
        "0 B".to_string()
    } else {
        let adjusted = Byte::from_u64(size).get_appropriate_unit(UnitType::Decimal);
        format!("{adjusted:#.2}")
    }
}

/// The per-image block: the image name, then one line per canonical severity.
///
/// Labels outside [`Severity::ALL`] are not printed here.
pub fn render_summary(image: &ImageRef, tally: &SeverityTally) -> String {
    let mut out = format!("Image Name: {image}\n");
    for severity in Severity::ALL {
        let _ = writeln!(out, "{severity} Vulnerabilities: {}", tally.count_for(severity));
    }
    out
}

/// Extra lines shown with `--verbose`, placed after the counts.
pub fn render_details(report: &ScanReport, tally: &SeverityTally) -> String {
    let target = &report.source.target;
    let mut out = String::new();

    if !report.source.kind.is_empty() || !target.user_input.is_empty() {
        let _ = writeln!(
            out,
            "Source: {} ({}), {}, {} layer(s)",
            target.user_input,
            report.source.kind,
            format_bytes(target.image_size.unwrap_or_default()),
            target.layers.len()
        );
    }

    let _ = writeln!(out, "Total matches: {}", tally.total());

    let others = tally.uncategorized();
    if !others.is_empty() {
        let listed: Vec<String> = others
            .iter()
            .map(|(label, count)| {
                let label = if label.is_empty() { "(none)" } else { label };
                format!("{label}={count}")
            })
            .collect();
        let _ = writeln!(out, "Other severities: {}", listed.join(", "));
    }

    out
}
