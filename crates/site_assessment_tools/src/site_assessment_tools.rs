mod assess_site;
mod clear_cache;
mod facilities;
mod list_facilities;
mod live_weather;
mod resolve_coordinates;
mod server;
mod tool;
mod utils;

pub use crate::assess_site::AssessSiteTool;
pub use crate::clear_cache::ClearAssessmentCacheTool;
pub use crate::facilities::FacilityRegistry;
pub use crate::list_facilities::ListFacilitiesTool;
pub use crate::live_weather::LiveWeatherTool;
pub use crate::resolve_coordinates::ResolveCoordinatesTool;
pub use crate::server::SiteAssessmentServer;
pub use crate::tool::{ToolExecutor, ToolRegistry};

#[cfg(test)]
pub(crate) mod test_support;
