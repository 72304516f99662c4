use clap::ValueEnum;
use tabled::{Table, Tabled, settings::Style};

use crate::domain::models::VersionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Tabled)]
struct VersionRow<'a> {
    #[tabled(rename = "Key")]
    key: &'a str,
    #[tabled(rename = "Version ID")]
    version_id: &'a str,
    #[tabled(rename = "ETag")]
    etag: &'a str,
    #[tabled(rename = "Size")]
    size: &'a str,
    #[tabled(rename = "Latest")]
    latest: &'a str,
    #[tabled(rename = "Last Modified")]
    last_modified: &'a str,
}

impl<'a> From<&'a VersionRecord> for VersionRow<'a> {
    fn from(record: &'a VersionRecord) -> Self {
        Self {
            key: &record.key,
            version_id: &record.version_id,
            etag: &record.etag,
            size: &record.size,
            latest: &record.latest,
            last_modified: &record.last_modified,
        }
    }
}

/// Render version records for stdout
pub fn render_versions(
    records: &[VersionRecord],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new(records.iter().map(VersionRow::from));
            table.with(Style::psql());
            Ok(table.to_string())
        }
        OutputFormat::Json => serde_json::to_string_pretty(records),
    }
}
