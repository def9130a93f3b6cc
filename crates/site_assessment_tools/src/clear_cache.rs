use std::sync::Arc;

use anyhow::{Result, anyhow};
use assessment::AssessmentResolver;
use async_trait::async_trait;
use rmcp::model::{Content, Tool};
use serde_json::{Value, json};

use crate::{
    ToolExecutor,
    utils::{optional_str, text, tool},
};

pub struct ClearAssessmentCacheTool {
    assessments: Arc<AssessmentResolver>,
}

impl ClearAssessmentCacheTool {
    pub fn new(assessments: Arc<AssessmentResolver>) -> Self {
        Self { assessments }
    }
}

#[async_trait]
impl ToolExecutor for ClearAssessmentCacheTool {
    async fn execute(&self, arguments: Option<Value>) -> Result<Vec<Content>> {
        log::debug!("Executing ClearAssessmentCacheTool");
        let args = arguments.ok_or_else(|| anyhow!("Missing arguments"))?;

        let facility_id = optional_str(&args, "facility_id")
            .ok_or_else(|| anyhow!("Missing or invalid facility_id parameter"))?;

        let message = if self.assessments.clear_cache_for_id(facility_id)? {
            format!("Cleared cached assessment for {}", facility_id)
        } else {
            format!("No cached assessment for {}", facility_id)
        };

        Ok(vec![text(message)])
    }

    fn to_tool(&self) -> Tool {
        tool(
            "clear_assessment_cache",
            "Forget the cached assessment for one facility so the next assess_site call recomputes it",
            json!({
                "type": "object",
                "properties": {
                    "facility_id": {
                        "type": "string",
                        "description": "Facility id whose cached assessment should be dropped"
                    }
                },
                "required": ["facility_id"]
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        AssessSiteTool, FacilityRegistry,
        test_support::{FakeBackend, first_text, resolver},
    };
    use coordinates::CoordinateResolver;

    use super::*;

    #[tokio::test]
    async fn test_clear_forces_recompute() {
        let backend = Arc::new(FakeBackend::default());
        let assessments = resolver(backend.clone());
        let assess = AssessSiteTool::new(
            assessments.clone(),
            Arc::new(CoordinateResolver::default()),
            Arc::new(FacilityRegistry::empty()),
        );
        let clear = ClearAssessmentCacheTool::new(assessments);
        let args = json!({"facility_id": "f1", "lat": 12.97, "lon": 77.59});

        assess.execute(Some(args.clone())).await.unwrap();
        let content = clear
            .execute(Some(json!({"facility_id": "f1"})))
            .await
            .unwrap();
        assert_eq!(first_text(&content), "Cleared cached assessment for f1");

        assess.execute(Some(args)).await.unwrap();
        assert_eq!(backend.analysis_calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_missing_entry() {
        let clear = ClearAssessmentCacheTool::new(resolver(Arc::new(FakeBackend::default())));

        let content = clear
            .execute(Some(json!({"facility_id": "f2"})))
            .await
            .unwrap();
        assert_eq!(first_text(&content), "No cached assessment for f2");
        assert!(clear.execute(Some(json!({}))).await.is_err());
    }
}
