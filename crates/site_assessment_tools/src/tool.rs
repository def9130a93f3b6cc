use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use anyhow::Result;
use async_trait::async_trait;
use rmcp::model::{Content, Tool};
use serde_json::Value;

#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, arguments: Option<Value>) -> Result<Vec<Content>>;

    fn to_tool(&self) -> Tool;
}

/// Tools by name, listed alphabetically.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn ToolExecutor>>>,
}

impl ToolRegistry {
    pub fn register(&self, tool: Arc<dyn ToolExecutor>) {
        let name = tool.to_tool().name.to_string();
        match self.tools.write() {
            Ok(mut tools) => {
                if tools.insert(name.clone(), tool).is_some() {
                    log::warn!("Tool {} registered twice; keeping the latest", name);
                }
            }
            Err(_) => log::error!("Tool registry lock poisoned; dropping {}", name),
        }
    }

    pub fn list(&self) -> Vec<Tool> {
        self.tools
            .read()
            .map(|tools| tools.values().map(|tool| tool.to_tool()).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolExecutor>> {
        self.tools.read().ok()?.get(name).cloned()
    }
}
