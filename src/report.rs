use crate::results::{JobRecord, JobStatus};
use crate::utils::{single_line, truncate};

const HEADERS: [&str; 6] = ["Company", "Title", "Image", "URL", "Status", "Error"];
const MAX_WIDTHS: [usize; 6] = [24, 40, 40, 60, 8, 40];
const ABSENT: &str = "-";

/// Record counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub success: usize,
    pub filtered: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.success + self.filtered + self.failed
    }
}

pub fn summarize(records: &[JobRecord]) -> Summary {
    let mut summary = Summary::default();
    for record in records {
        match record.status() {
            JobStatus::Success => summary.success += 1,
            JobStatus::Filtered => summary.filtered += 1,
            JobStatus::Failed => summary.failed += 1,
        }
    }
    summary
}

fn row(record: &JobRecord) -> [String; 6] {
    let cell = |value: Option<&str>| single_line(value.unwrap_or(ABSENT));
    [
        cell(Some(record.company())),
        cell(record.title()),
        cell(record.image_url()),
        cell(Some(record.source_url())),
        record.status().to_string(),
        cell(record.error()),
    ]
}

/// Render records as a fixed-width text table, one line per record
pub fn render_table(records: &[JobRecord]) -> String {
    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|record| {
            let mut cells = row(record);
            for (cell, max) in cells.iter_mut().zip(MAX_WIDTHS) {
                *cell = truncate(cell, max);
            }
            cells
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = vec![format_line(&header), format_line(&separator)];
    lines.extend(rows.iter().map(|cells| format_line(cells)));
    lines.join("\n")
}

/// Serialize records as pretty-printed JSON
pub fn to_json(records: &[JobRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
