use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopy {
    pub platform: String,
    pub headline: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingPlan {
    pub product_name: String,
    pub target_audience: String,
    pub marketing_channels: Vec<String>,
    pub ad_copy: Vec<AdCopy>,
    pub sales_pitch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSalePitch {
    pub headline: String,
    pub description: String,
}

/// Promotional content generated for exactly one acquired opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Plan {
    Marketing(MarketingPlan),
    Pitch(DomainSalePitch),
}
