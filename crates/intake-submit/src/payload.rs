//! JSON body sent to the webhook.

use serde::Serialize;

use intake_model::{CsvRow, ParsedTable};

/// `{"headers": [...], "rows": [...], "rowCount": n}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload<'a> {
    pub headers: &'a [String],
    pub rows: &'a [CsvRow],
    pub row_count: usize,
}

impl<'a> From<&'a ParsedTable> for WebhookPayload<'a> {
    fn from(table: &'a ParsedTable) -> Self {
        Self {
            headers: &table.headers,
            rows: &table.rows,
            row_count: table.rows.len(),
        }
    }
}
