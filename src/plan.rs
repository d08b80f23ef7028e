//! Request plan rendering
//!
//! Collects the built requests and the attribute mapping into one
//! serializable report for the `text`, `json` and `yaml` output formats.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::cli::OutputFormat;
use crate::collector::{AttributeMapping, HttpMethod, HttpRequest};

/// Built requests plus their response mapping
#[derive(Debug, Serialize)]
pub struct RequestPlan {
    pub method: HttpMethod,
    pub requests: Vec<PlannedRequest>,
    pub mappings: Vec<PlannedAttribute>,
}

#[derive(Debug, Serialize)]
pub struct PlannedRequest {
    pub method: HttpMethod,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct PlannedAttribute {
    pub mbean: String,
    pub attr: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event: String,
}

impl RequestPlan {
    /// Build a plan. Mapping entries are sorted by (mbean, attr) for stable output.
    pub fn new(
        method: HttpMethod,
        requests: &[HttpRequest],
        mapping: &AttributeMapping,
    ) -> Result<Self> {
        let requests = requests
            .iter()
            .map(|request| -> Result<PlannedRequest> {
                let body = match &request.body {
                    Some(body) => Some(serde_json::from_slice::<serde_json::Value>(body)?),
                    None => None,
                };
                Ok(PlannedRequest {
                    method: request.method,
                    url: request.url.clone(),
                    body,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut mappings: Vec<PlannedAttribute> = mapping
            .iter()
            .map(|(key, attribute)| PlannedAttribute {
                mbean: key.mbean.clone(),
                attr: key.attr.clone(),
                field: attribute.field.clone(),
                event: attribute.event.clone(),
            })
            .collect();
        mappings.sort_by(|a, b| (&a.mbean, &a.attr).cmp(&(&b.mbean, &b.attr)));

        Ok(Self {
            method,
            requests,
            mappings,
        })
    }

    /// Render the plan in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Text => Ok(self.render_text()?),
        }
    }

    fn render_text(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "Method: {}", self.method)?;
        writeln!(out, "Requests ({}):", self.requests.len())?;
        for request in &self.requests {
            writeln!(out, "  {} {}", request.method, request.url)?;
            if let Some(body) = &request.body {
                writeln!(out, "    {}", body)?;
            }
        }

        writeln!(out, "Mappings ({}):", self.mappings.len())?;
        for entry in &self.mappings {
            write!(out, "  {} {}", entry.mbean, entry.attr)?;
            if !entry.field.is_empty() {
                write!(out, " -> {}", entry.field)?;
            }
            if !entry.event.is_empty() {
                write!(out, " [event: {}]", entry.event)?;
            }
            writeln!(out)?;
        }

        Ok(out)
    }
}
