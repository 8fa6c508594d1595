//! Flattening of invites, RSVPs and summary counts into downloadable tables.
//!
//! Tables are plain column/row string grids; rendering to CSV or JSON is a
//! pure transform with no access to storage.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::invite::{Invite, InviteStatus};
use super::notifications::EventDetails;
use super::rsvp::Rsvp;
use super::summary::SummaryCounts;

/// Which collection to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Rsvps,
    Invites,
    Summary,
}

impl ExportKind {
    /// Label used in generated file names.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rsvps => "RSVPs",
            Self::Invites => "Invites",
            Self::Summary => "Summary",
        }
    }
}

/// Raised for an unknown `type` parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export type: {0}")]
pub struct UnknownExportKind(pub String);

impl FromStr for ExportKind {
    type Err = UnknownExportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rsvps" => Ok(Self::Rsvps),
            "invites" => Ok(Self::Invites),
            "summary" => Ok(Self::Summary),
            other => Err(UnknownExportKind(other.to_owned())),
        }
    }
}

/// Output encoding of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

/// Raised for an unknown or unsupported `format` parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownExportFormat {
    #[error("spreadsheet export is not supported; use csv or json")]
    Spreadsheet,
    #[error("unknown export format: {0}")]
    Other(String),
}

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" | "xls" => Err(UnknownExportFormat::Spreadsheet),
            other => Err(UnknownExportFormat::Other(other.to_owned())),
        }
    }
}

/// A rectangular table of display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// A rendered export ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rsvps(rsvps: &[Rsvp]) -> Self {
        Self {
            columns: vec![
                "ID",
                "Name",
                "Email",
                "Attendance",
                "Dietary Requirements",
                "Confirmation ID",
                "RSVP Date",
                "Created At",
            ],
            rows: rsvps
                .iter()
                .map(|rsvp| {
                    vec![
                        rsvp.id.to_string(),
                        rsvp.name.clone(),
                        rsvp.email.clone(),
                        rsvp.attendance.to_string(),
                        optional(rsvp.dietary_requirements.as_deref()),
                        optional(rsvp.confirmation_id.as_deref()),
                        timestamp(rsvp.rsvp_date),
                        timestamp(rsvp.created_at),
                    ]
                })
                .collect(),
        }
    }

    pub fn invites(invites: &[Invite]) -> Self {
        Self {
            columns: vec![
                "ID",
                "Name",
                "Email",
                "Status",
                "Invite URL",
                "Sent At",
                "RSVP ID",
                "Created At",
            ],
            rows: invites
                .iter()
                .map(|invite| {
                    vec![
                        invite.id.to_string(),
                        invite.name.clone(),
                        invite.email.clone(),
                        invite.status.to_string(),
                        optional(invite.invite_url.as_deref()),
                        optional(invite.sent_at.map(timestamp)),
                        optional(invite.rsvp_id),
                        timestamp(invite.created_at),
                    ]
                })
                .collect(),
        }
    }

    /// Long-format summary: one `(section, metric, value)` row per figure.
    pub fn summary(counts: &SummaryCounts, event: &EventDetails) -> Self {
        let mut rows = vec![
            row("RSVP Summary", "Total RSVPs", counts.rsvps.total),
            row("RSVP Summary", "Attending", counts.rsvps.yes),
            row("RSVP Summary", "Not Attending", counts.rsvps.no),
            row("Invite Summary", "Total Invites", counts.invites.total),
        ];
        rows.extend(InviteStatus::ALL.iter().map(|status| {
            row(
                "Invite Summary",
                status_label(*status),
                counts.invites.get(*status),
            )
        }));
        rows.push(row("Event Details", "Event", &event.name));
        for (metric, value) in [
            ("Date", event.date.as_deref()),
            ("Time", event.time.as_deref()),
            ("Location", event.location.as_deref()),
        ] {
            if let Some(value) = value {
                rows.push(row("Event Details", metric, value));
            }
        }
        Self {
            columns: vec!["Section", "Metric", "Value"],
            rows,
        }
    }

    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(
            self.columns
                .iter()
                .map(|c| escape_csv_field(c))
                .collect::<Vec<_>>()
                .join(","),
        );
        lines.extend(self.rows.iter().map(|cells| {
            cells
                .iter()
                .map(|c| escape_csv_field(c))
                .collect::<Vec<_>>()
                .join(",")
        }));
        lines.join("\n")
    }

    /// Array of objects keyed by column name.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|cells| {
                    let object: Map<String, Value> = self
                        .columns
                        .iter()
                        .zip(cells)
                        .map(|(column, cell)| ((*column).to_owned(), Value::String(cell.clone())))
                        .collect();
                    Value::Object(object)
                })
                .collect(),
        )
    }

    pub fn render(&self, format: ExportFormat) -> String {
        match format {
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => self.to_json().to_string(),
        }
    }
}

fn row(section: &str, metric: &str, value: impl fmt::Display) -> Vec<String> {
    vec![section.to_owned(), metric.to_owned(), value.to_string()]
}

fn status_label(status: InviteStatus) -> &'static str {
    match status {
        InviteStatus::Pending => "Pending",
        InviteStatus::Sent => "Sent",
        InviteStatus::Responded => "Responded",
        InviteStatus::Declined => "Declined",
    }
}

/// Quote a CSV cell when it contains a comma, quote, CR or LF, doubling
/// embedded quotes.
///
/// # Examples
/// ```
/// use backend::domain::escape_csv_field;
///
/// assert_eq!(escape_csv_field("plain"), "plain");
/// assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
/// assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn escape_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// `{event}_{Kind}_{YYYY-MM-DD}.{ext}` with the event name reduced to
/// alphanumerics and underscores.
pub fn export_file_name(
    event_name: &str,
    kind: ExportKind,
    date: NaiveDate,
    format: ExportFormat,
) -> String {
    let mut slug = String::with_capacity(event_name.len());
    for ch in event_name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "Event" } else { slug };
    format!(
        "{slug}_{}_{}.{}",
        kind.label(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attendance, RsvpId};
    use crate::domain::summary::{AttendanceCounts, InviteStatusCounts};
    use rstest::rstest;

    fn rsvp(name: &str, dietary: Option<&str>) -> Rsvp {
        let at = DateTime::parse_from_rfc3339("2025-10-01T09:30:00Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        Rsvp {
            id: RsvpId::new(7),
            name: name.to_owned(),
            email: "alex@example.com".to_owned(),
            attendance: Attendance::Yes,
            dietary_requirements: dietary.map(str::to_owned),
            confirmation_id: None,
            rsvp_date: at,
            created_at: at,
        }
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("with,comma", "\"with,comma\"")]
    #[case("line\nbreak", "\"line\nbreak\"")]
    #[case("carriage\rreturn", "\"carriage\rreturn\"")]
    #[case("\"quoted\"", "\"\"\"quoted\"\"\"")]
    fn csv_escaping(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_csv_field(raw), expected);
    }

    #[rstest]
    fn rsvp_csv_has_header_and_rows() {
        let table = ExportTable::rsvps(&[rsvp("Lee, Alex", Some("vegan"))]);
        let csv = table.to_csv();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Name,Email,Attendance,Dietary Requirements,Confirmation ID,RSVP Date,Created At")
        );
        assert_eq!(
            lines.next(),
            Some("7,\"Lee, Alex\",alex@example.com,yes,vegan,,2025-10-01T09:30:00Z,2025-10-01T09:30:00Z")
        );
    }

    #[rstest]
    fn json_rows_are_keyed_by_column() {
        let table = ExportTable::rsvps(&[rsvp("Alex", None)]);
        let json = table.to_json();
        assert_eq!(json[0]["Name"], "Alex");
        assert_eq!(json[0]["Dietary Requirements"], "");
    }

    #[rstest]
    fn summary_lists_every_status_and_event_detail() {
        let counts = SummaryCounts {
            invites: InviteStatusCounts {
                pending: 1,
                sent: 2,
                responded: 3,
                declined: 0,
                total: 6,
            },
            rsvps: AttendanceCounts {
                yes: 2,
                no: 1,
                total: 3,
            },
        };
        let event = EventDetails {
            name: "Anniversary".to_owned(),
            date: Some("30 October".to_owned()),
            time: None,
            location: None,
        };
        let table = ExportTable::summary(&counts, &event);
        assert_eq!(table.columns, vec!["Section", "Metric", "Value"]);
        assert!(table.rows.contains(&vec![
            "Invite Summary".to_owned(),
            "Declined".to_owned(),
            "0".to_owned()
        ]));
        assert!(table.rows.contains(&vec![
            "Event Details".to_owned(),
            "Date".to_owned(),
            "30 October".to_owned()
        ]));
        assert!(!table.rows.iter().any(|r| r[1] == "Time"));
    }

    #[rstest]
    #[case("xlsx", UnknownExportFormat::Spreadsheet)]
    #[case("pdf", UnknownExportFormat::Other("pdf".to_owned()))]
    fn rejects_unsupported_formats(#[case] raw: &str, #[case] expected: UnknownExportFormat) {
        assert_eq!(raw.parse::<ExportFormat>(), Err(expected));
    }

    #[rstest]
    #[case("GJS 20th Anniversary", "GJS_20th_Anniversary_RSVPs_2025-10-30.csv")]
    #[case("  !!  ", "Event_RSVPs_2025-10-30.csv")]
    fn file_names_are_slugged(#[case] event: &str, #[case] expected: &str) {
        let date = NaiveDate::from_ymd_opt(2025, 10, 30).expect("date");
        assert_eq!(
            export_file_name(event, ExportKind::Rsvps, date, ExportFormat::Csv),
            expected
        );
    }
}
