use std::io;

use chrono::{NaiveDate, SecondsFormat};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::Result;
use crate::models::Participant;

/// Column headers of the roster export.
pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "Name",
    "Code",
    "Group",
    "Interest",
    "Score",
    "Link",
    "Timestamp",
];

/// Write a header row plus one row per record. Text fields are always quoted
/// with inner quotes doubled, even when they look like numbers; the id and
/// score stay bare integers.
pub fn write_csv<W: io::Write>(writer: W, records: &[&Participant]) -> Result<()> {
    // Quoting is decided per column in `row`, so the writer must not add any.
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for record in records {
        wtr.write_record(row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[&Participant]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    // The csv writer only ever emits the UTF-8 it was given.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// `badges_<YYYY-MM-DD>.csv`
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("badges_{}.csv", date.format("%Y-%m-%d"))
}

fn row(record: &Participant) -> [String; 8] {
    [
        record.id.clone(),
        quoted(&record.name),
        quoted(&record.code()),
        quoted(record.group.code()),
        quoted(&record.interest),
        record.score.to_string(),
        quoted(&record.link),
        quoted(
            &record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    ]
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::classifier::classify;
    use crate::models::AxisSelection;

    fn participant(name: &str, interest: &str) -> Participant {
        let selection = AxisSelection::from_code("ENTP").unwrap();
        Participant {
            id: "1700000000000".to_string(),
            name: name.to_string(),
            selection,
            group: classify(&selection),
            interest: interest.to_string(),
            score: 4,
            link: "https://example.com/a,b".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            printed: false,
        }
    }

    #[test]
    fn header_and_row_layout() {
        let record = participant("KIM", "AI");
        let text = to_csv_string(&[&record]).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Name,Code,Group,Interest,Score,Link,Timestamp")
        );
        assert_eq!(
            lines.next(),
            Some(
                r#"1700000000000,"KIM","ENTP","NT","AI",4,"https://example.com/a,b","2023-11-14T22:13:20.123Z""#
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn quotes_are_doubled_and_recoverable() {
        let record = participant("A\"B", "say \"hi\"");
        let text = to_csv_string(&[&record]).unwrap();
        assert!(text.contains(r#","A""B","#));

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let parsed = reader.records().next().unwrap().unwrap();
        assert_eq!(&parsed[1], "A\"B");
        assert_eq!(&parsed[4], "say \"hi\"");
        assert_eq!(&parsed[6], "https://example.com/a,b");
    }

    #[test]
    fn numeric_looking_text_is_still_quoted() {
        let record = participant("007", "2024");
        let text = to_csv_string(&[&record]).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some(
                r#"1700000000000,"007","ENTP","NT","2024",4,"https://example.com/a,b","2023-11-14T22:13:20.123Z""#
            )
        );

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let parsed = reader.records().next().unwrap().unwrap();
        assert_eq!(&parsed[1], "007");
        assert_eq!(&parsed[4], "2024");
    }

    #[test]
    fn line_breaks_stay_inside_the_field() {
        let record = participant("A\nB", "x");
        let text = to_csv_string(&[&record]).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "A\nB");
    }

    #[test]
    fn empty_roster_is_header_only() {
        let text = to_csv_string(&[]).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn file_name_uses_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert_eq!(csv_file_name(date), "badges_2026-01-09.csv");
    }
}
