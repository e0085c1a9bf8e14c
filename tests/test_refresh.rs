mod common;

use autoflip::application::events::Update;
use autoflip::application::session::SessionChannels;
use autoflip::domain::values::tool::Tool;
use common::*;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::time::{timeout, Instant};

async fn wait_update(ch: &mut SessionChannels, limit: Duration) -> Option<Update> {
    timeout(limit, ch.updates.recv()).await.ok().flatten()
}

#[tokio::test(start_paused = true)]
async fn test_refresh_fires_after_one_period() {
    let fake = FakeGenerator::new();
    let (mut session, mut ch) = subscribed(&fake).await;
    let armed_at = Instant::now();

    let update = wait_update(&mut ch, Duration::from_secs(60)).await.unwrap();
    assert!(matches!(update, Update::RefreshDue { tool: Tool::Products, .. }));
    assert!(armed_at.elapsed() >= Duration::from_secs(30));

    session.apply(update);
    assert!(session.state().products.is_background_loading());
    settle(&mut session, &mut ch).await;
    assert_eq!(fake.product_calls(), 2);
    assert!(!session.state().products.is_background_loading());
}

#[tokio::test(start_paused = true)]
async fn test_no_refresh_during_autopilot() {
    let fake = FakeGenerator::new();
    fake.hold_plans.store(true, Ordering::SeqCst);
    let (mut session, mut ch) = subscribed(&fake).await;

    session.initiate_purchase(0).unwrap();
    session.confirm_purchase().unwrap();
    assert!(wait_update(&mut ch, Duration::from_secs(120)).await.is_none());
    assert_eq!(fake.product_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_rearms_after_returning_to_browsing() {
    let fake = FakeGenerator::new();
    fake.hold_plans.store(true, Ordering::SeqCst);
    let (mut session, mut ch) = subscribed(&fake).await;
    session.initiate_purchase(0).unwrap();
    session.confirm_purchase().unwrap();

    tokio::time::advance(Duration::from_secs(45)).await;
    session.back().unwrap();
    assert_eq!(session.armed_refresh(), Some(Tool::Products));
    let back_at = Instant::now();

    let update = wait_update(&mut ch, Duration::from_secs(60)).await.unwrap();
    assert!(matches!(update, Update::RefreshDue { tool: Tool::Products, .. }));
    assert!(back_at.elapsed() >= Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_refresh_follows_selected_tool() {
    let fake = FakeGenerator::new();
    let (mut session, mut ch) = subscribed(&fake).await;

    session.select_tool(Tool::Domains).unwrap();
    settle(&mut session, &mut ch).await;

    let update = wait_update(&mut ch, Duration::from_secs(60)).await.unwrap();
    assert!(matches!(update, Update::RefreshDue { tool: Tool::Domains, .. }));
    session.apply(update);
    settle(&mut session, &mut ch).await;
    assert_eq!(fake.domain_calls(), 2);
    assert_eq!(fake.product_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tick_from_disarmed_timer_is_ignored_after_rearm() {
    let fake = FakeGenerator::new();
    let (mut session, mut ch) = subscribed(&fake).await;

    // Tick is already queued when the session leaves browsing.
    let queued = next_refresh_tick(&mut ch).await;
    session.initiate_purchase(0).unwrap();
    session.confirm_purchase().unwrap();
    settle(&mut session, &mut ch).await;
    session.back().unwrap();
    assert_eq!(session.armed_refresh(), Some(Tool::Products));

    session.apply(queued);
    assert!(!session.state().products.is_background_loading());
    assert_eq!(fake.product_calls(), 1);

    // The new arming still fires a full period later.
    let rearmed_at = Instant::now();
    let tick = next_refresh_tick(&mut ch).await;
    assert!(rearmed_at.elapsed() >= Duration::from_secs(30));
    session.apply(tick);
    assert!(session.state().products.is_background_loading());
}

#[tokio::test(start_paused = true)]
async fn test_reselecting_tool_discards_queued_tick() {
    let fake = FakeGenerator::new();
    let (mut session, mut ch) = subscribed(&fake).await;

    let queued = next_refresh_tick(&mut ch).await;
    session.select_tool(Tool::Products).unwrap();
    session.apply(queued);

    let listing = session.state().current_listing();
    assert!(listing.is_loading());
    assert!(!listing.is_background_loading());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_session_stops_the_timer() {
    let fake = FakeGenerator::new();
    let (session, mut ch) = subscribed(&fake).await;
    drop(session);
    assert!(wait_update(&mut ch, Duration::from_secs(120)).await.is_none());
}
