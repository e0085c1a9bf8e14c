//! Plain-text rendering of session state and events for the terminal.

use std::fmt::Write;

use crate::application::events::{Reload, SessionEvent};
use crate::application::session::{Listing, Mode, SessionState};
use crate::domain::entities::opportunity::Opportunity;
use crate::domain::entities::plan::Plan;
use crate::domain::values::notice::Notice;

/// Number of transactions shown in a snapshot.
const RECENT_TRANSACTIONS: usize = 5;

pub const WELCOME: &str = "\
autoflip: flip AI-suggested digital products and expired domains.
Subscribe for $36 to start ('subscribe'), or type 'help'.";

pub const HELP: &str = "\
Session:  subscribe | tool products|domains | refresh | buy N | confirm | cancel
          launch [PRICE] | back | show
Wallet:   deposit X | withdraw X | revenue-withdraw X
Guide:    ask <question>   (Ctrl-C cancels a streaming answer)
Other:    help | quit";

pub fn render_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Notice(notice) => Some(render_notice(notice)),
        SessionEvent::ListingLoaded {
            tool,
            reload,
            count,
        } => match reload {
            Reload::Foreground => Some(format!(
                "[info] loaded {count} {tool}; type 'show' to list them"
            )),
            Reload::Background => Some(format!("[info] {tool} refreshed in the background")),
        },
        SessionEvent::PlanReady(plan) => Some(render_plan(plan)),
        SessionEvent::Snapshot(state) => Some(render_snapshot(state)),
    }
}

pub fn render_notice(notice: &Notice) -> String {
    format!("[{}] {}", notice.level, notice.message)
}

pub fn render_opportunity(position: usize, item: &Opportunity) -> String {
    let (outlook, detail) = match item {
        Opportunity::Product(p) => (
            format!("-> sells ${:.2}", p.suggested_sale_price),
            &p.description,
        ),
        Opportunity::Domain(d) => (format!("value {}", d.potential_value), &d.reasoning),
    };
    format!(
        "{position:>2}. {} [{}] cost ${:.2} {outlook}\n    {detail}",
        item.name(),
        item.category(),
        item.acquisition_cost()
    )
}

pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    match plan {
        Plan::Marketing(m) => {
            let _ = writeln!(out, "== Marketing plan: {} ==", m.product_name);
            let _ = writeln!(out, "Audience: {}", m.target_audience);
            let _ = writeln!(out, "Channels: {}", m.marketing_channels.join(", "));
            for ad in &m.ad_copy {
                let _ = writeln!(out, "- {}: {}\n  {}", ad.platform, ad.headline, ad.body);
            }
            let _ = writeln!(out, "Pitch: {}", m.sales_pitch);
            let _ = write!(
                out,
                "'launch' to sell at the suggested price, 'back' to keep browsing."
            );
        }
        Plan::Pitch(p) => {
            let _ = writeln!(out, "== {} ==", p.headline);
            let _ = writeln!(out, "{}", p.description);
            let _ = write!(out, "'launch [PRICE]' to list it, 'back' to keep browsing.");
        }
    }
    out
}

fn render_listing(out: &mut String, listing: &Listing) {
    if listing.is_loading() {
        let _ = writeln!(out, "  loading...");
        return;
    }
    if let Some(err) = &listing.error {
        let _ = writeln!(out, "  ! {err} ('retry' to try again)");
    }
    if listing.is_background_loading() {
        let _ = writeln!(out, "  (refreshing)");
    }
    if listing.items.is_empty() && listing.error.is_none() {
        let _ = writeln!(out, "  nothing listed yet");
    }
    for (i, item) in listing.items.iter().enumerate() {
        let _ = writeln!(out, "{}", render_opportunity(i + 1, item));
    }
}

pub fn render_snapshot(state: &SessionState) -> String {
    let mut out = String::new();
    if !state.subscribed {
        let _ = writeln!(out, "Not subscribed. Type 'subscribe' to start.");
    }
    match &state.mode {
        Mode::Browsing => {
            let _ = writeln!(out, "== Finding {} ==", state.tool);
            render_listing(&mut out, state.current_listing());
            if let Some(item) = &state.pending_purchase {
                let _ = writeln!(out, "Awaiting confirmation: {} (confirm / cancel)", item.name());
            }
        }
        Mode::Autopilot(acq) => {
            let _ = writeln!(out, "== Autopilot: {} ==", acq.opportunity.name());
            match &acq.plan {
                Some(plan) => {
                    let _ = writeln!(out, "{}", render_plan(plan));
                }
                None => {
                    let _ = writeln!(out, "  generating...");
                }
            }
        }
    }
    let _ = writeln!(out, "Wallet: ${:.2}", state.wallet.balance());
    for tx in state.wallet.transactions().iter().take(RECENT_TRANSACTIONS) {
        let sign = if tx.kind.is_credit() { '+' } else { '-' };
        let _ = writeln!(
            out,
            "  {} {:<10} {sign}${:.2}  {}",
            tx.date,
            tx.kind.to_string(),
            tx.amount,
            tx.description
        );
    }
    let _ = write!(out, "Creator revenue: ${:.2}", state.creator.revenue());
    out
}
