//! REST client for a Sheets-style values API.
//!
//! Endpoints used:
//!
//! ```text
//! GET  {endpoint}/v4/spreadsheets/{id}?fields=sheets.properties   (worksheet lookup)
//! GET  {endpoint}/v4/spreadsheets/{id}/values/{range}             (read all)
//! POST {endpoint}/v4/spreadsheets/{id}/values/{range}:clear       (clear)
//! PUT  {endpoint}/v4/spreadsheets/{id}/values/{range}             (bulk write)
//! POST {endpoint}/v4/spreadsheets/{id}:batchUpdate                (header formatting)
//! ```
//!
//! GETs are idempotent and retried with bounded backoff on transport
//! failures and 5xx answers. Clear and write are destructive and are issued
//! exactly once — the engine's read-back verification decides whether a
//! failed write actually applied.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use sheetsync_core::{SpreadsheetId, WorksheetTitle};

use crate::credentials;
use crate::error::RemoteError;
use crate::table::RemoteTable;

const MAX_READ_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(250);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RestTable {
    agent: ureq::Agent,
    endpoint: String,
    token: String,
    spreadsheet: SpreadsheetId,
}

impl RestTable {
    /// Build a client for `spreadsheet`, loading credentials from
    /// `credentials_file`. Fails before any network call if the credentials
    /// are missing or unusable.
    pub fn connect(
        spreadsheet: SpreadsheetId,
        credentials_file: &Path,
    ) -> Result<Self, RemoteError> {
        let creds = credentials::load(credentials_file)?;
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Ok(Self {
            agent,
            endpoint: creds.endpoint.trim_end_matches('/').to_owned(),
            token: creds.access_token,
            spreadsheet,
        })
    }

    fn values_url(&self, worksheet: &WorksheetTitle, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.endpoint,
            encode(&self.spreadsheet.0),
            encode(&sheet_range(worksheet)),
            suffix,
        )
    }

    fn metadata_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties",
            self.endpoint,
            encode(&self.spreadsheet.0),
        )
    }

    fn batch_update_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.endpoint,
            encode(&self.spreadsheet.0),
        )
    }

    /// Numeric sheet id for a worksheet title, or `TableNotFound`.
    fn resolve_sheet_id(&self, worksheet: &WorksheetTitle) -> Result<i64, RemoteError> {
        let url = self.metadata_url();
        let meta: SpreadsheetMeta = self.get_with_retry(&url)?;
        meta.sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == worksheet.0)
            .map(|p| p.sheet_id)
            .ok_or_else(|| RemoteError::TableNotFound {
                spreadsheet: self.spreadsheet.clone(),
                worksheet: worksheet.clone(),
            })
    }

    fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call()
            .map_err(|e| http_err(url, e))?;
        response.into_json::<T>().map_err(|e| RemoteError::Decode {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }

    fn get_with_retry<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let mut delay = INITIAL_BACKOFF;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_once(url) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < MAX_READ_ATTEMPTS => {
                    log::warn!("transient error on {url} (attempt {attempt}): {err}; retrying");
                    std::thread::sleep(delay);
                    delay *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn send_json(
        &self,
        method: &str,
        url: &str,
        body: serde_json::Value,
    ) -> Result<(), RemoteError> {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(body)
            .map_err(|e| http_err(url, e))?;
        Ok(())
    }
}

impl RemoteTable for RestTable {
    fn read_all(&self, worksheet: &WorksheetTitle) -> Result<Vec<Vec<String>>, RemoteError> {
        // Resolve the title first so a missing tab is a TableNotFound, not a
        // range-parse API error.
        self.resolve_sheet_id(worksheet)?;

        let url = self.values_url(worksheet, "");
        let body: ValuesResponse = self.get_with_retry(&url)?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    fn clear(&mut self, worksheet: &WorksheetTitle) -> Result<(), RemoteError> {
        let url = self.values_url(worksheet, ":clear");
        log::info!("clearing worksheet '{worksheet}'");
        self.send_json("POST", &url, json!({}))
    }

    fn write(
        &mut self,
        worksheet: &WorksheetTitle,
        rows: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        let url = format!(
            "{}?valueInputOption=RAW",
            self.values_url(worksheet, "")
        );
        log::info!("writing {} rows to worksheet '{worksheet}'", rows.len());
        self.send_json("PUT", &url, json!({ "values": rows }))
    }

    fn format_header(
        &mut self,
        worksheet: &WorksheetTitle,
        columns: usize,
    ) -> Result<(), RemoteError> {
        let sheet_id = self.resolve_sheet_id(worksheet)?;
        let body = json!({
            "requests": [{
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                        "startColumnIndex": 0,
                        "endColumnIndex": columns,
                    },
                    "cell": {
                        "userEnteredFormat": {
                            "backgroundColor": { "red": 0.2, "green": 0.4, "blue": 0.8 },
                            "textFormat": {
                                "bold": true,
                                "foregroundColor": { "red": 1, "green": 1, "blue": 1 },
                            },
                        },
                    },
                    "fields": "userEnteredFormat(backgroundColor,textFormat)",
                }
            }]
        });
        self.send_json("POST", &self.batch_update_url(), body)
    }
}

// ---------------------------------------------------------------------------
// Wire helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

/// A1 range covering a whole worksheet; embedded quotes are doubled per A1
/// notation.
fn sheet_range(worksheet: &WorksheetTitle) -> String {
    format!("'{}'", worksheet.0.replace('\'', "''"))
}

/// Values cells are usually strings, but the API may hand back bare numbers
/// or booleans; render those without JSON quoting.
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Minimal percent-encoding for URL path components.
fn encode(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for byte in component.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn http_err(url: &str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => RemoteError::Api {
            url: url.to_owned(),
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => RemoteError::Transport {
            url: url.to_owned(),
            message: transport.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
