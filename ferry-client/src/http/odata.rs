//! Orchestrator OData wire format
//!
//! Upstream records use PascalCase fields, JSON-encoded argument strings and
//! timestamps that may or may not carry an offset. Everything here converts
//! between that shape and the domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use ferry_core::domain::asset::{AssetType, AssetValue};
use ferry_core::domain::job::{JobFilter, JobRecord, JobStatus};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GatewayError, Result};

/// `{ "value": [...] }` collection envelope
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ODataJob {
    pub id: Option<Value>,
    pub release_name: Option<String>,
    pub state: Option<String>,
    pub creation_time: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub info: Option<String>,
    pub output_arguments: Option<String>,
}

impl ODataJob {
    /// Converts to a domain record
    ///
    /// `process_key` fills in for a missing `ReleaseName`, which the
    /// start-jobs response does not always echo back.
    pub fn into_record(self, process_key: Option<&str>) -> Result<JobRecord> {
        let job_id = match self.id {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            other => {
                return Err(GatewayError::Decode(format!("invalid job Id: {:?}", other)));
            }
        };

        let status: JobStatus = self
            .state
            .as_deref()
            .ok_or_else(|| GatewayError::Decode(format!("job {} has no State", job_id)))?
            .parse()
            .map_err(|e| GatewayError::Decode(format!("job {}: {}", job_id, e)))?;

        let created_at = self
            .creation_time
            .as_deref()
            .map(parse_timestamp)
            .transpose()?
            .ok_or_else(|| GatewayError::Decode(format!("job {} has no CreationTime", job_id)))?;

        let mut output_arguments = self
            .output_arguments
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_arguments)
            .transpose()?;

        // Terminal jobs always expose their outputs, even if upstream sent none
        let finished = matches!(status, JobStatus::Successful | JobStatus::Faulted);
        if finished && output_arguments.is_none() {
            output_arguments = Some(Map::new());
        }
        if !status.is_terminal() {
            output_arguments = None;
        }

        Ok(JobRecord {
            job_id,
            process_key: self
                .release_name
                .or_else(|| process_key.map(str::to_string))
                .unwrap_or_default(),
            status,
            created_at,
            started_at: self.start_time.as_deref().map(parse_timestamp).transpose()?,
            ended_at: self.end_time.as_deref().map(parse_timestamp).transpose()?,
            output_arguments,
            info: self.info,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ODataAsset {
    pub name: String,
    pub value_type: String,
    #[serde(default)]
    pub value: Value,
}

impl ODataAsset {
    pub fn into_asset(self) -> Result<AssetValue> {
        let asset_type: AssetType = self
            .value_type
            .parse()
            .map_err(|e| GatewayError::Decode(format!("asset {}: {}", self.name, e)))?;
        let value = match self.value {
            Value::String(value) => value,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Ok(AssetValue {
            name: self.name,
            asset_type,
            value,
        })
    }
}

/// Builds the `$filter` expression for a job listing, if any filter is set
pub(crate) fn job_filter_expression(filter: &JobFilter) -> Option<String> {
    let mut clauses = Vec::new();
    if let Some(key) = &filter.process_key {
        clauses.push(format!("ReleaseName eq {}", quote(key)));
    }
    if let Some(status) = filter.status {
        clauses.push(format!("State eq {}", quote(status.as_str())));
    }
    (!clauses.is_empty()).then(|| clauses.join(" and "))
}

pub(crate) fn asset_filter_expression(name: &str) -> String {
    format!("Name eq {}", quote(name))
}

/// OData string literal: single-quoted, inner quotes doubled
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn parse_arguments(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GatewayError::Decode(format!(
            "OutputArguments is not an object: {}",
            other
        ))),
        Err(e) => Err(GatewayError::Decode(format!(
            "OutputArguments is not valid JSON: {}",
            e
        ))),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| GatewayError::Decode(format!("invalid timestamp '{}': {}", raw, e)))
}
