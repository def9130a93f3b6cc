use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rmcp::model::{Content, Tool};
use serde_json::{Value, json};
use site_model::FacilityDescriptor;

use crate::{
    FacilityRegistry, ToolExecutor,
    utils::{optional_str, text, tool},
};

pub struct ListFacilitiesTool {
    facilities: Arc<FacilityRegistry>,
}

impl ListFacilitiesTool {
    pub fn new(facilities: Arc<FacilityRegistry>) -> Self {
        Self { facilities }
    }

    fn format_facility(index: usize, facility: &FacilityDescriptor) -> String {
        let mut result = format!("{}. {}", index + 1, facility.name);
        if let Some(id) = facility.cache_id() {
            result.push_str(&format!(" (ID: {})", id));
        }
        result.push('\n');

        if !facility.company.is_empty() {
            result.push_str(&format!("   Company: {}\n", facility.company));
        }

        let place: Vec<&str> = [facility.city.as_deref(), facility.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if !place.is_empty() {
            result.push_str(&format!("   Location: {}\n", place.join(", ")));
        }

        if let Some(location) = facility.location() {
            result.push_str(&format!("   Coordinates: {:.4}, {:.4}\n", location.lat, location.lon));
        }
        if facility.analysis.is_some() {
            result.push_str("   Precomputed analysis: yes\n");
        }
        result
    }
}

#[async_trait]
impl ToolExecutor for ListFacilitiesTool {
    async fn execute(&self, arguments: Option<Value>) -> Result<Vec<Content>> {
        log::debug!("Executing ListFacilitiesTool");
        let args = arguments.unwrap_or_else(|| json!({}));

        let matches = self.facilities.filter(
            optional_str(&args, "company"),
            optional_str(&args, "state"),
        );

        if matches.is_empty() {
            return Ok(vec![text("No facilities found")]);
        }

        let mut result = format!("Found {} facilities:\n\n", matches.len());
        let listed: Vec<String> = matches
            .iter()
            .enumerate()
            .map(|(index, facility)| Self::format_facility(index, facility))
            .collect();
        result.push_str(&listed.join("\n"));

        Ok(vec![text(result)])
    }

    fn to_tool(&self) -> Tool {
        tool(
            "list_facilities",
            "List known data center facilities, optionally by company or state",
            json!({
                "type": "object",
                "properties": {
                    "company": {
                        "type": "string",
                        "description": "Operator name, matched case-insensitively"
                    },
                    "state": {
                        "type": "string",
                        "description": "State name, matched case-insensitively"
                    }
                }
            }),
        )
    }
}
