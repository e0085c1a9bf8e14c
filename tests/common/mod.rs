//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use autoflip::application::events::{SessionEvent, Update};
use autoflip::application::session::{SessionChannels, SessionConfig, SessionController};
use autoflip::domain::entities::chat::ChatMessage;
use autoflip::domain::entities::opportunity::{ExpiredDomain, Product};
use autoflip::domain::entities::plan::{AdCopy, DomainSalePitch, MarketingPlan};
use autoflip::domain::error::DomainError;
use autoflip::domain::ports::content_generator::{AdviceStream, ContentGenerator};
use autoflip::domain::values::notice::{Notice, NoticeLevel};
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn sample_product() -> Product {
    Product {
        product_name: "Notion Budget Planner".into(),
        description: "Monthly budgeting dashboard".into(),
        category: "Templates".into(),
        estimated_acquisition_cost: 50.0,
        suggested_sale_price: 200.0,
    }
}

pub fn sample_domain() -> ExpiredDomain {
    ExpiredDomain {
        domain_name: "greenledger.io".into(),
        potential_value: "$800 - $2,500".into(),
        reasoning: "Short fintech brandable".into(),
        category: "Finance".into(),
        acquisition_cost: 120.0,
    }
}

/// Scripted generator with call counters and failure switches.
#[derive(Default)]
pub struct FakeGenerator {
    pub product_calls: AtomicUsize,
    pub domain_calls: AtomicUsize,
    pub plan_calls: AtomicUsize,
    pub fail_listings: AtomicBool,
    pub fail_plans: AtomicBool,
    /// When set, plan requests wait for `release_plans`.
    pub hold_plans: AtomicBool,
    pub plan_gate: Notify,
    pub fail_advice: AtomicBool,
    /// When set, the advice stream stalls after its first chunk.
    pub stall_advice: AtomicBool,
    pub advice_chunks: Mutex<Vec<String>>,
    /// Appended to every product batch.
    pub extra_products: Mutex<Vec<Product>>,
    pub seen_history: Mutex<Vec<ChatMessage>>,
}

impl FakeGenerator {
    pub fn new() -> Arc<Self> {
        let fake = Self::default();
        *fake.advice_chunks.lock().unwrap() =
            vec!["Buy ".into(), "low, ".into(), "sell high.".into()];
        Arc::new(fake)
    }

    pub fn release_plans(&self) {
        self.plan_gate.notify_one();
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn domain_calls(&self) -> usize {
        self.domain_calls.load(Ordering::SeqCst)
    }

    async fn await_plan_slot(&self) -> Result<(), DomainError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_plans.load(Ordering::SeqCst) {
            self.plan_gate.notified().await;
        }
        if self.fail_plans.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteGeneration("plan backend down".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, DomainError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteGeneration("products unavailable".into()));
        }
        let mut second = sample_product();
        second.product_name = "Lightroom Preset Pack".into();
        let mut batch = vec![sample_product(), second];
        batch.extend(self.extra_products.lock().unwrap().iter().cloned());
        Ok(batch)
    }

    async fn fetch_domains(&self) -> Result<Vec<ExpiredDomain>, DomainError> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteGeneration("domains unavailable".into()));
        }
        Ok(vec![sample_domain()])
    }

    async fn marketing_plan(&self, product: &Product) -> Result<MarketingPlan, DomainError> {
        self.await_plan_slot().await?;
        Ok(MarketingPlan {
            product_name: product.product_name.clone(),
            target_audience: "Freelancers".into(),
            marketing_channels: vec!["Instagram".into()],
            ad_copy: vec![AdCopy {
                platform: "Instagram".into(),
                headline: "Budget better".into(),
                body: "Take control of your money.".into(),
            }],
            sales_pitch: "The last planner you will need.".into(),
        })
    }

    async fn domain_pitch(&self, domain: &ExpiredDomain) -> Result<DomainSalePitch, DomainError> {
        self.await_plan_slot().await?;
        Ok(DomainSalePitch {
            headline: format!("Own {}", domain.domain_name),
            description: "A memorable fintech name.".into(),
        })
    }

    async fn stream_advice(
        &self,
        history: &[ChatMessage],
        _new_message: &str,
    ) -> Result<AdviceStream, DomainError> {
        *self.seen_history.lock().unwrap() = history.to_vec();
        if self.fail_advice.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteGeneration("advice backend down".into()));
        }
        let chunks: Vec<Result<String, DomainError>> = self
            .advice_chunks
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(Ok)
            .collect();
        if self.stall_advice.load(Ordering::SeqCst) {
            let first = chunks.into_iter().take(1);
            return Ok(stream::iter(first).chain(stream::pending()).boxed());
        }
        Ok(stream::iter(chunks).boxed())
    }
}

pub fn start(fake: &Arc<FakeGenerator>) -> (SessionController, SessionChannels) {
    SessionController::start(fake.clone(), SessionConfig::default())
}

/// Waits for the next completion reported to the controller.
pub async fn next_update(channels: &mut SessionChannels) -> Update {
    tokio::time::timeout(Duration::from_secs(5), channels.updates.recv())
        .await
        .expect("timed out waiting for an update")
        .expect("update channel closed")
}

/// Waits out the refresh period for the next timer tick. Meant for paused-clock tests.
pub async fn next_refresh_tick(channels: &mut SessionChannels) -> Update {
    let update = tokio::time::timeout(Duration::from_secs(120), channels.updates.recv())
        .await
        .expect("timed out waiting for a refresh tick")
        .expect("update channel closed");
    assert!(
        matches!(update, Update::RefreshDue { .. }),
        "expected a refresh tick, got {update:?}"
    );
    update
}

/// Receives the next update and applies it.
pub async fn settle(controller: &mut SessionController, channels: &mut SessionChannels) {
    let update = next_update(channels).await;
    controller.apply(update);
}

/// A subscribed session whose initial product listing has loaded.
pub async fn subscribed(fake: &Arc<FakeGenerator>) -> (SessionController, SessionChannels) {
    let (mut controller, mut channels) = start(fake);
    controller.subscribe().unwrap();
    settle(&mut controller, &mut channels).await;
    (controller, channels)
}

pub fn drain_events(channels: &mut SessionChannels) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = channels.events.try_recv() {
        out.push(event);
    }
    out
}

pub fn notices(events: &[SessionEvent]) -> Vec<Notice> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Notice(n) => Some(n.clone()),
            _ => None,
        })
        .collect()
}

pub fn has_notice(events: &[SessionEvent], level: NoticeLevel, text: &str) -> bool {
    notices(events)
        .iter()
        .any(|n| n.level == level && n.message.contains(text))
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
