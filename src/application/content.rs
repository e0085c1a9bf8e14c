use crate::domain::entities::opportunity::Opportunity;
use crate::domain::entities::plan::Plan;
use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::ContentGenerator;
use crate::domain::values::tool::Tool;
use tracing::warn;

/// Fetches a fresh batch of opportunities for `tool`.
///
/// Items that could never be bought and sold (negative cost, no sale price)
/// are dropped.
pub async fn fetch_opportunities(
    content: &dyn ContentGenerator,
    tool: Tool,
) -> Result<Vec<Opportunity>, DomainError> {
    let items: Vec<Opportunity> = match tool {
        Tool::Products => content
            .fetch_products()
            .await?
            .into_iter()
            .map(Opportunity::from)
            .collect(),
        Tool::Domains => content
            .fetch_domains()
            .await?
            .into_iter()
            .map(Opportunity::from)
            .collect(),
    };
    Ok(items
        .into_iter()
        .filter(|item| {
            let ok = item.is_tradable();
            if !ok {
                warn!(%tool, item = item.name(), "dropping opportunity with unusable prices");
            }
            ok
        })
        .collect())
}

/// Generates the marketing plan or sales pitch matching the opportunity kind.
pub async fn generate_plan(
    content: &dyn ContentGenerator,
    opportunity: &Opportunity,
) -> Result<Plan, DomainError> {
    match opportunity {
        Opportunity::Product(p) => content.marketing_plan(p).await.map(Plan::Marketing),
        Opportunity::Domain(d) => content.domain_pitch(d).await.map(Plan::Pitch),
    }
}
