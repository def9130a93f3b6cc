use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use coordinates::{CoordinateResolver, ResolvedCoordinate};
use rmcp::model::{Content, Tool};
use serde_json::{Value, json};
use site_model::LocationDescriptor;

use crate::{
    ToolExecutor,
    utils::{optional_str, text, tool},
};

pub struct ResolveCoordinatesTool {
    resolver: Arc<CoordinateResolver>,
}

impl ResolveCoordinatesTool {
    pub fn new(resolver: Arc<CoordinateResolver>) -> Self {
        Self { resolver }
    }

    pub(crate) fn descriptor(args: &Value) -> Result<LocationDescriptor> {
        let city = optional_str(args, "city");
        let state = optional_str(args, "state");

        match (city, state, optional_str(args, "name")) {
            (None, None, Some(name)) => Ok(LocationDescriptor::name(name)),
            (None, None, None) => Err(anyhow!("Provide a city, a state, or a name")),
            (city, state, _) => Ok(LocationDescriptor::place(
                city.unwrap_or_default(),
                state.unwrap_or_default(),
            )),
        }
    }

    fn format_resolved(descriptor: &LocationDescriptor, resolved: &ResolvedCoordinate) -> String {
        let asked = match descriptor {
            LocationDescriptor::Place { city, state } => match (city.is_empty(), state.is_empty()) {
                (false, false) => format!("{}, {}", city, state),
                (false, true) => city.clone(),
                _ => state.clone(),
            },
            LocationDescriptor::Name(name) => name.clone(),
        };

        let mut result = format!("Location: {}\n", asked);
        result.push_str(&format!(
            "Coordinates: {:.4}, {:.4}\n",
            resolved.location.lat, resolved.location.lon
        ));
        result.push_str(&format!("Matched: {}\n", resolved.matched));
        result.push_str(&format!("Precision: {}\n", resolved.precision));
        result
    }
}

#[async_trait]
impl ToolExecutor for ResolveCoordinatesTool {
    async fn execute(&self, arguments: Option<Value>) -> Result<Vec<Content>> {
        log::debug!("Executing ResolveCoordinatesTool");
        let args = arguments.ok_or_else(|| anyhow!("Missing arguments"))?;

        let descriptor = Self::descriptor(&args)?;

        match self.resolver.resolve_descriptor(&descriptor) {
            Some(resolved) => Ok(vec![text(Self::format_resolved(&descriptor, &resolved))]),
            None => Ok(vec![text("No coordinates known for this location")]),
        }
    }

    fn to_tool(&self) -> Tool {
        tool(
            "resolve_coordinates",
            "Look up approximate coordinates for an Indian city or state, falling back to the state centroid",
            json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City or locality name, e.g. Navi Mumbai"
                    },
                    "state": {
                        "type": "string",
                        "description": "State or union territory, e.g. Maharashtra"
                    },
                    "name": {
                        "type": "string",
                        "description": "Free-text place name, tried as a city and then as a state"
                    }
                }
            }),
        )
    }
}
