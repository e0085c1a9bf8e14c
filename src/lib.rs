pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::advice::ExpertGuide;
use crate::application::content::{fetch_opportunities, generate_plan};
use crate::application::session::{SessionChannels, SessionController};
use crate::domain::entities::opportunity::Opportunity;
use crate::domain::entities::plan::Plan;
use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::ContentGenerator;
use crate::domain::values::tool::Tool;
use crate::infrastructure::api::http::HttpContentGenerator;
use crate::infrastructure::api::simulated::SimulatedContentGenerator;
use crate::infrastructure::config::AppConfig;
use std::sync::Arc;

pub struct AutoFlip {
    content: Arc<dyn ContentGenerator>,
    config: AppConfig,
}

impl AutoFlip {
    pub fn new(config: AppConfig) -> Self {
        let content: Arc<dyn ContentGenerator> = if config.offline {
            Arc::new(SimulatedContentGenerator::new())
        } else {
            Arc::new(HttpContentGenerator::new(config.api_base_url.clone()))
        };
        Self::with_content(content, config)
    }

    pub fn with_content(content: Arc<dyn ContentGenerator>, config: AppConfig) -> Self {
        Self { content, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn generator_name(&self) -> &str {
        self.content.name()
    }

    pub async fn opportunities(&self, tool: Tool) -> Result<Vec<Opportunity>, DomainError> {
        fetch_opportunities(self.content.as_ref(), tool).await
    }

    pub async fn plan(&self, opportunity: &Opportunity) -> Result<Plan, DomainError> {
        generate_plan(self.content.as_ref(), opportunity).await
    }

    pub fn expert_guide(&self) -> ExpertGuide {
        ExpertGuide::new(self.content.clone())
    }

    /// A fresh, unsubscribed session. Must be called inside a tokio runtime.
    pub fn session(&self) -> (SessionController, SessionChannels) {
        SessionController::start(self.content.clone(), self.config.session())
    }
}
