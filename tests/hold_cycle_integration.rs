//! Integration tests for the hold cycle.
//!
//! These drive the public API the way the TUI loop does: the real tokio
//! interval ticker feeds ticks over its channel while the test plays the part
//! of the user. Time is paused so tick counts are exact.

use std::time::Duration;

use morse_tone::{SilentBackend, ToneCounters};
use morse_transmitter::{HoldTick, IntervalTicker, KeyerSettings, Symbol, Transmitter};
use tokio::sync::mpsc::UnboundedReceiver;

fn setup(settings: KeyerSettings) -> (Transmitter, UnboundedReceiver<HoldTick>, ToneCounters) {
    let backend = SilentBackend::new();
    let counters = backend.counters();
    let (ticker, rx) = IntervalTicker::channel();
    let tx = Transmitter::new(settings, Box::new(backend), Box::new(ticker));
    (tx, rx, counters)
}

/// Deliver the next `n` ticks from the channel
async fn pump(tx: &mut Transmitter, rx: &mut UnboundedReceiver<HoldTick>, n: usize) {
    for _ in 0..n {
        let tick = rx.recv().await.expect("ticker channel closed");
        tx.on_tick(tick);
    }
}

/// Deliver whatever is already queued
fn drain(tx: &mut Transmitter, rx: &mut UnboundedReceiver<HoldTick>) -> usize {
    let mut count = 0;
    while let Ok(tick) = rx.try_recv() {
        tx.on_tick(tick);
        count += 1;
    }
    count
}

// ── Classification through real ticks ──

#[tokio::test(start_paused = true)]
async fn quick_release_logs_dot() {
    let (mut tx, mut rx, _) = setup(KeyerSettings::default());

    tx.on_press_start();
    tokio::time::sleep(Duration::from_millis(50)).await;
    drain(&mut tx, &mut rx);

    assert_eq!(tx.on_press_end(), Some(Symbol::Dot));
}

#[tokio::test(start_paused = true)]
async fn one_tick_hold_logs_dash() {
    let (mut tx, mut rx, _) = setup(KeyerSettings::default());

    tx.on_press_start();
    pump(&mut tx, &mut rx, 1).await;
    assert_eq!(tx.elapsed(), Duration::from_millis(100));

    assert_eq!(tx.on_press_end(), Some(Symbol::Dash));
}

#[tokio::test(start_paused = true)]
async fn longer_threshold_needs_more_ticks() {
    let settings = KeyerSettings {
        tick_interval: Duration::from_millis(20),
        dash_threshold: Duration::from_millis(60),
        ..KeyerSettings::default()
    };
    let (mut tx, mut rx, _) = setup(settings);

    tx.on_press_start();
    pump(&mut tx, &mut rx, 2).await;
    assert_eq!(tx.on_press_end(), Some(Symbol::Dot));

    tx.on_press_start();
    pump(&mut tx, &mut rx, 3).await;
    assert_eq!(tx.on_press_end(), Some(Symbol::Dash));
}

// ── Timer lifetime ──

#[tokio::test(start_paused = true)]
async fn no_ticks_counted_after_release() {
    let (mut tx, mut rx, _) = setup(KeyerSettings::default());

    tx.on_press_start();
    pump(&mut tx, &mut rx, 3).await;
    tx.on_press_end();

    // Let plenty of tick periods pass; anything that arrives is stale
    tokio::time::sleep(Duration::from_secs(2)).await;
    drain(&mut tx, &mut rx);

    assert!(!tx.is_tracking());
    assert_eq!(tx.elapsed(), Duration::ZERO);
    assert_eq!(tx.message().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn ticks_from_previous_hold_do_not_leak_into_next() {
    let (mut tx, mut rx, _) = setup(KeyerSettings::default());

    tx.on_press_start();
    pump(&mut tx, &mut rx, 2).await;
    // Queue a tick for the first hold without delivering it
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.on_press_end();

    tx.on_press_start();
    // The queued tick belongs to the old hold
    drain(&mut tx, &mut rx);
    assert_eq!(tx.elapsed(), Duration::ZERO);
    assert_eq!(tx.on_press_end(), Some(Symbol::Dot));
}

#[tokio::test(start_paused = true)]
async fn dropping_transmitter_mid_hold_stops_ticks_and_tone() {
    let (mut tx, mut rx, counters) = setup(KeyerSettings::default());

    tx.on_press_start();
    pump(&mut tx, &mut rx, 1).await;
    drop(tx);

    assert_eq!(counters.live(), 0);
    tokio::time::sleep(Duration::from_secs(1)).await;
    let mut late = 0;
    while rx.try_recv().is_ok() {
        late += 1;
    }
    assert!(late <= 1, "ticker kept running after teardown: {late} ticks");
}

// ── Tone pairing ──

#[tokio::test(start_paused = true)]
async fn rapid_press_release_pairs_every_tone() {
    let (mut tx, mut rx, counters) = setup(KeyerSettings::default());

    for i in 0..20 {
        tx.on_press_start();
        if i % 2 == 0 {
            pump(&mut tx, &mut rx, 1).await;
        }
        tx.on_press_end();
        assert_eq!(counters.live(), 0);
    }

    assert_eq!(counters.started(), 20);
    assert_eq!(counters.stopped(), 20);
    assert_eq!(tx.message().to_string(), "-.".repeat(10));
}

#[tokio::test(start_paused = true)]
async fn failing_tone_never_blocks_logging() {
    let (ticker, mut rx) = IntervalTicker::channel();
    let mut tx = Transmitter::new(
        KeyerSettings::default(),
        Box::new(SilentBackend::failing("device busy")),
        Box::new(ticker),
    );

    tx.on_press_start();
    pump(&mut tx, &mut rx, 1).await;
    assert_eq!(tx.on_press_end(), Some(Symbol::Dash));
    assert!(tx.tone_fault().unwrap().contains("device busy"));
}

// ── Editing ──

#[tokio::test(start_paused = true)]
async fn dot_dash_space_dot_sequence() {
    let (mut tx, mut rx, _) = setup(KeyerSettings::default());

    tx.on_press_start();
    tx.on_press_end();

    tx.on_press_start();
    pump(&mut tx, &mut rx, 2).await;
    tx.on_press_end();

    tx.on_space();

    tx.on_press_start();
    tx.on_press_end();

    assert_eq!(tx.message().glyphs(), vec![".", "-", "/", "."]);
}

#[tokio::test(start_paused = true)]
async fn backspace_and_reset() {
    let (mut tx, _rx, _) = setup(KeyerSettings::default());

    assert_eq!(tx.on_backspace(), None);
    assert!(tx.message().is_empty());

    tx.on_space();
    tx.on_press_start();
    tx.on_press_end();
    tx.on_reset();
    assert!(tx.message().is_empty());

    tx.on_reset();
    assert!(tx.message().is_empty());
}
