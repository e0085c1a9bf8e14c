//! Offline stand-in for the generation backend.
//!
//! Serves deterministic batches from built-in catalogs, rotating through them
//! on every fetch, and templated plans, pitches and advice.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::domain::entities::chat::ChatMessage;
use crate::domain::entities::opportunity::{ExpiredDomain, Product};
use crate::domain::entities::plan::{AdCopy, DomainSalePitch, MarketingPlan};
use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::{AdviceStream, ContentGenerator};

pub const BATCH_SIZE: usize = 5;

// (name, description, category, acquisition cost, suggested sale price)
const PRODUCTS: &[(&str, &str, &str, f64, f64)] = &[
    (
        "Notion Freelancer OS",
        "All-in-one Notion workspace for client, invoice and project tracking.",
        "Templates",
        45.0,
        180.0,
    ),
    (
        "Midjourney Prompt Vault",
        "1,200 curated prompts for product photography and brand imagery.",
        "AI Assets",
        30.0,
        120.0,
    ),
    (
        "Shopify Launch Checklist",
        "Step-by-step launch checklist with email sequences for new stores.",
        "E-commerce",
        25.0,
        95.0,
    ),
    (
        "Lightroom Film Presets",
        "Twenty film-emulation presets tuned for portraits and street work.",
        "Photography",
        20.0,
        75.0,
    ),
    (
        "SaaS Pitch Deck Kit",
        "Investor-ready deck template with financial model spreadsheet.",
        "Business",
        60.0,
        240.0,
    ),
    (
        "Etsy SEO Keyword Pack",
        "Researched keyword lists for 40 top-selling Etsy niches.",
        "Marketing",
        15.0,
        65.0,
    ),
    (
        "Procreate Brush Bundle",
        "Ink, texture and lettering brushes for digital illustrators.",
        "Design",
        35.0,
        130.0,
    ),
    (
        "Cold Email Playbook",
        "Proven outreach scripts and follow-up cadences for B2B sales.",
        "Sales",
        40.0,
        160.0,
    ),
];

// (domain, potential value, reasoning, category, acquisition cost)
const DOMAINS: &[(&str, &str, &str, &str, f64)] = &[
    (
        "aiworkflows.io",
        "$800 - $2,500",
        "Short, keyword-rich name in a fast-growing automation niche.",
        "Tech",
        12.0,
    ),
    (
        "greenmealprep.com",
        "$500 - $1,500",
        "Exact-match .com for a steady health and meal-kit audience.",
        "Health",
        10.0,
    ),
    (
        "remotehiring.co",
        "$600 - $1,800",
        "Brandable name aligned with distributed-team recruiting demand.",
        "Business",
        14.0,
    ),
    (
        "petinsurancehub.net",
        "$300 - $900",
        "Lead-generation potential in a high-CPC insurance vertical.",
        "Finance",
        9.0,
    ),
    (
        "cryptotaxguide.com",
        "$1,000 - $3,000",
        "Evergreen search demand every filing season.",
        "Finance",
        15.0,
    ),
    (
        "urbanbikeshop.com",
        "$400 - $1,200",
        "Local-commerce friendly name with clear intent.",
        "Retail",
        11.0,
    ),
    (
        "nocodeacademy.org",
        "$700 - $2,000",
        "Education brand riding the no-code tooling wave.",
        "Education",
        13.0,
    ),
];

pub struct SimulatedContentGenerator {
    product_batches: AtomicUsize,
    domain_batches: AtomicUsize,
}

impl SimulatedContentGenerator {
    pub fn new() -> Self {
        Self {
            product_batches: AtomicUsize::new(0),
            domain_batches: AtomicUsize::new(0),
        }
    }
}

impl Default for SimulatedContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of the `batch`-th window of `BATCH_SIZE` items over a catalog of `len`.
fn window(batch: usize, len: usize) -> impl Iterator<Item = usize> {
    (0..BATCH_SIZE).map(move |i| (batch * BATCH_SIZE + i) % len)
}

fn advice_reply(message: &str, turns: usize) -> String {
    let lower = message.to_lowercase();
    let tip = if lower.contains("domain") {
        "For domains, favour short exact-match names and list them at the low end of \
         their value range to sell quickly."
    } else if lower.contains("price") || lower.contains("pricing") {
        "Price digital products at three to four times acquisition cost, then test a \
         launch discount."
    } else {
        "Pick products with a clear audience, lead with one strong ad channel, and \
         reinvest profits into the next flip."
    };
    if turns > 1 {
        format!("Building on our chat: {tip}")
    } else {
        tip.to_string()
    }
}

#[async_trait]
impl ContentGenerator for SimulatedContentGenerator {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, DomainError> {
        let batch = self.product_batches.fetch_add(1, Ordering::Relaxed);
        Ok(window(batch, PRODUCTS.len())
            .map(|i| {
                let (name, description, category, cost, price) = PRODUCTS[i];
                Product {
                    product_name: name.into(),
                    description: description.into(),
                    category: category.into(),
                    estimated_acquisition_cost: cost,
                    suggested_sale_price: price,
                }
            })
            .collect())
    }

    async fn fetch_domains(&self) -> Result<Vec<ExpiredDomain>, DomainError> {
        let batch = self.domain_batches.fetch_add(1, Ordering::Relaxed);
        Ok(window(batch, DOMAINS.len())
            .map(|i| {
                let (name, value, reasoning, category, cost) = DOMAINS[i];
                ExpiredDomain {
                    domain_name: name.into(),
                    potential_value: value.into(),
                    reasoning: reasoning.into(),
                    category: category.into(),
                    acquisition_cost: cost,
                }
            })
            .collect())
    }

    async fn marketing_plan(&self, product: &Product) -> Result<MarketingPlan, DomainError> {
        let name = &product.product_name;
        Ok(MarketingPlan {
            product_name: name.clone(),
            target_audience: format!(
                "Buyers of {} resources looking for a ready-made shortcut",
                product.category.to_lowercase()
            ),
            marketing_channels: vec![
                "Instagram".into(),
                "Pinterest".into(),
                "Email newsletter".into(),
            ],
            ad_copy: vec![
                AdCopy {
                    platform: "Instagram".into(),
                    headline: format!("Stop starting from scratch: {name}"),
                    body: product.description.clone(),
                },
                AdCopy {
                    platform: "Pinterest".into(),
                    headline: format!("{name}: save hours this week"),
                    body: format!("Instant download. Only ${:.2}.", product.suggested_sale_price),
                },
            ],
            sales_pitch: format!(
                "{name} gives you a proven starting point so you can ship faster and earn sooner."
            ),
        })
    }

    async fn domain_pitch(&self, domain: &ExpiredDomain) -> Result<DomainSalePitch, DomainError> {
        Ok(DomainSalePitch {
            headline: format!(
                "Premium {} domain for sale: {}",
                domain.category.to_lowercase(),
                domain.domain_name
            ),
            description: format!(
                "{} {} Estimated value {}.",
                domain.domain_name, domain.reasoning, domain.potential_value
            ),
        })
    }

    async fn stream_advice(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<AdviceStream, DomainError> {
        let reply = advice_reply(new_message, history.len());
        let chunks: Vec<Result<String, DomainError>> = reply
            .split_inclusive(' ')
            .map(|word| Ok(word.to_string()))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }
}
