//! Balloon Pop entry point
//!
//! The playable game runs in the browser through the `web` bindings. Native
//! builds play one headless demo round with the auto-popper and print the
//! result as JSON.
//!
//! Usage: `balloon-pop [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::Duration;

    use balloon_pop::autoplay::AutoPopper;
    use balloon_pop::platform::{ManualTime, RoundSession};
    use balloon_pop::sim::RoundPhase;
    use balloon_pop::{RoundEngine, Settings};

    env_logger::init();
    log::info!("Balloon Pop (native demo) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .map(|path| Settings::load_from(&path))
        .unwrap_or_default();

    let time = ManualTime::new(0);
    let engine = RoundEngine::from_settings(&settings);
    let mut session = RoundSession::new(engine, time.clone(), ());
    let popper = AutoPopper::default();

    const FRAME_MS: u64 = 250;
    session.start();
    while session.engine().phase() == RoundPhase::Active {
        time.advance(FRAME_MS);
        if session.update(Duration::from_millis(FRAME_MS)) == 0 {
            continue;
        }

        let targets = popper.targets(&session.engine().state().balloons);
        for id in targets {
            time.advance(popper.reaction_ms);
            session.update(Duration::from_millis(popper.reaction_ms));
            if let Some(pop) = session.tap(id) {
                log::info!(
                    "Popped {} for {} (combo {})",
                    pop.kind.as_str(),
                    pop.points,
                    pop.combo
                );
            }
        }
    }

    let Some(outcome) = session.engine().outcome() else {
        log::error!("Demo round ended without an outcome");
        return;
    };
    let report = serde_json::json!({
        "score": outcome.score,
        "rating": outcome.rating.label(),
        "tier": outcome.rating.tier(),
        "passed": outcome.passed,
        "next_action": outcome.next_action(),
        "message": outcome.message(),
        "stats": session.engine().state().stats,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `web::wasm_main`
}
