//! Day-log export formatting
//!
//! Pure transforms over the records returned by
//! [`crate::SyncCoordinator::read_day`]: one row per record, stable
//! column order. Where the result lands is the caller's business; a
//! convenience file write is provided.

use std::path::Path;

use shared::models::VisitorRecord;

const CSV_HEADERS: [&str; 9] = [
    "No", "Rank", "Surname", "Phone", "Zone", "Table", "Persons", "Time", "Status",
];

/// Seat label as printed on the log: "D-12" for a numbered table, the
/// zone abbreviation alone otherwise.
fn seat_label(record: &VisitorRecord) -> String {
    match record.table_number {
        Some(number) => format!("{}-{}", record.zone.abbrev(), number),
        None => record.zone.abbrev().to_string(),
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV rendering of a day's log, soft-deleted entries included (marked
/// cancelled).
pub fn day_log_csv(records: &[VisitorRecord]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADERS.join(","));
    out.push('\n');

    for record in records {
        let status = if record.is_deleted { "cancelled" } else { "active" };
        let row = [
            record.sequence_number.to_string(),
            csv_field(&record.rank),
            csv_field(&record.surname),
            csv_field(&record.phone),
            record.zone.label().to_string(),
            seat_label(record),
            record.person_count.to_string(),
            record.arrival_time.clone(),
            status.to_string(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Plain-text rendering of a day's log with per-record lines and totals.
pub fn day_log_text(records: &[VisitorRecord], day: &str) -> String {
    let active: Vec<&VisitorRecord> = records.iter().filter(|r| !r.is_deleted).collect();
    let total_persons: u32 = active.iter().map(|r| r.person_count).sum();
    let rule = "=".repeat(60);

    let mut out = String::new();
    out.push_str("Visitor Log\n");
    out.push_str(&format!("Date: {day}\n"));
    out.push_str(&format!("{rule}\n\n"));

    for record in records {
        let status = if record.is_deleted { " [CANCELLED]" } else { "" };
        out.push_str(&format!(
            "{}. {} {}{}\n",
            record.sequence_number, record.rank, record.surname, status
        ));
        out.push_str(&format!(
            "   Phone: {} | Table: {} | Persons: {} | Time: {}\n\n",
            record.phone,
            seat_label(record),
            record.person_count,
            record.arrival_time
        ));
    }

    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "Entries: {} ({} active)\n",
        records.len(),
        active.len()
    ));
    out.push_str(&format!("Total persons: {total_persons}\n"));
    out
}

/// Write an export to disk.
pub fn write_day_log(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableZone;

    fn record(sequence: u32, deleted: bool) -> VisitorRecord {
        VisitorRecord {
            id: format!("id-{sequence}"),
            sequence_number: sequence,
            day: "2025-03-07".to_string(),
            phone: "6900000000".to_string(),
            surname: "Nikolaou".to_string(),
            rank: "Captain".to_string(),
            zone: TableZone::DiningRoom,
            table_number: Some(4),
            person_count: 2,
            arrival_time: "20:30".to_string(),
            is_deleted: deleted,
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let csv = day_log_csv(&[record(1, false), record(2, true)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "No,Rank,Surname,Phone,Zone,Table,Persons,Time,Status"
        );
        assert_eq!(
            lines[1],
            "1,Captain,Nikolaou,6900000000,Dining room,D-4,2,20:30,active"
        );
        assert!(lines[2].ends_with("cancelled"));
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let mut v = record(1, false);
        v.surname = "Nikolaou, Jr".to_string();
        let csv = day_log_csv(&[v]);
        assert!(csv.contains("\"Nikolaou, Jr\""));
    }

    #[test]
    fn takeaway_has_bare_zone_label() {
        let mut v = record(1, false);
        v.zone = TableZone::Takeaway;
        v.table_number = None;
        assert_eq!(seat_label(&v), "TA");
    }

    #[test]
    fn text_totals_count_active_only() {
        let text = day_log_text(&[record(1, false), record(2, true)], "2025-03-07");
        assert!(text.contains("Date: 2025-03-07"));
        assert!(text.contains("Entries: 2 (1 active)"));
        assert!(text.contains("Total persons: 2"));
        assert!(text.contains("[CANCELLED]"));
    }
}
