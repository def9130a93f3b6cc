mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Result, anyhow};
use assessment::{AssessmentCache, AssessmentResolver};
use backend_client::BackendClient;
use cache::{Cache, MemoryCache};
use coordinates::{CoordinateResolver, CoordinateTables};
use directories::ProjectDirs;
use local_cache::LocalCache;
use rmcp::{ServiceExt, transport::stdio};
use site_assessment_tools::{
    AssessSiteTool, ClearAssessmentCacheTool, FacilityRegistry, ListFacilitiesTool,
    LiveWeatherTool, ResolveCoordinatesTool, SiteAssessmentServer, ToolRegistry,
};
use site_model::{AnalysisService, WeatherService};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

struct ServerState {
    server: SiteAssessmentServer,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("in", "site-assessment", "site-assessment-server")
        .ok_or_else(|| anyhow!("unable to find project directory"))
}

fn database_dir(config: &Config) -> Result<PathBuf> {
    match &config.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(project_dirs()?.data_dir().join("cache.db")),
    }
}

/// The LMDB store when it opens; otherwise results are cached for this
/// process only.
fn open_cache(config: &Config) -> Arc<dyn Cache> {
    let opened = database_dir(config).and_then(|dir| {
        let cache = LocalCache::new(&dir)?;
        log::info!("Caching assessments in {}", dir.display());
        Ok(cache)
    });

    match opened {
        Ok(cache) => Arc::new(cache),
        Err(err) => {
            log::warn!("Local cache unavailable, using memory: {:#}", err);
            Arc::new(MemoryCache::new())
        }
    }
}

fn coordinate_tables(config: &Config) -> Result<CoordinateTables> {
    let mut tables = CoordinateTables::builtin();
    if let Some(path) = &config.coordinates_path {
        tables.extend_from_path(path)?;
        log::info!(
            "Coordinate tables now hold {} cities and {} states",
            tables.city_count(),
            tables.state_count()
        );
    }
    Ok(tables)
}

fn facility_registry(config: &Config) -> Result<FacilityRegistry> {
    match &config.facilities_path {
        Some(path) => {
            let registry = FacilityRegistry::from_path(path)?;
            log::info!("Loaded {} facilities from {}", registry.len(), path.display());
            Ok(registry)
        }
        None => Ok(FacilityRegistry::empty()),
    }
}

impl ServerState {
    fn new(config: &Config) -> Result<Self> {
        let backend = Arc::new(
            BackendClient::builder()
                .with_base_url(config.api_url.as_str())
                .with_timeout(config.api_timeout)
                .build()?,
        );
        let analysis: Arc<dyn AnalysisService> = backend.clone();
        let weather: Arc<dyn WeatherService> = backend;

        let assessment_cache = AssessmentCache::new(open_cache(config))
            .with_version(config.cache_version.as_str())
            .with_max_age(config.cache_ttl);
        let assessments = Arc::new(AssessmentResolver::new(
            analysis,
            weather.clone(),
            assessment_cache,
        ));

        let coordinates = Arc::new(CoordinateResolver::new(Arc::new(coordinate_tables(config)?)));
        let facilities = Arc::new(facility_registry(config)?);

        let tool_registry = Arc::new(ToolRegistry::default());
        tool_registry.register(Arc::new(ResolveCoordinatesTool::new(coordinates.clone())));
        tool_registry.register(Arc::new(
            AssessSiteTool::new(assessments.clone(), coordinates, facilities.clone())
                .with_strict_precision(config.strict_precision),
        ));
        tool_registry.register(Arc::new(LiveWeatherTool::new(weather)));
        tool_registry.register(Arc::new(ClearAssessmentCacheTool::new(assessments)));
        tool_registry.register(Arc::new(ListFacilitiesTool::new(facilities)));

        Ok(Self {
            server: SiteAssessmentServer::new(tool_registry)
                .with_server_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    log::info!("Analysis backend at {}", config.api_url);

    let state = ServerState::new(&config)?;

    log::info!("Serving site assessment tools over stdio");
    state.server.serve(stdio()).await?.waiting().await?;

    Ok(())
}
