//! Integration tests for the `time` module
//!
//! Cooldowns run on the tokio clock; every test pauses time and advances it
//! explicitly.

#![cfg(feature = "runtime")]

use std::time::Duration;

use futures::StreamExt;
use talentfolio_common::time::Cooldown;

#[tokio::test(start_paused = true)]
async fn resend_and_rate_limit_timers_run_independently() {
    let mut resend = Cooldown::new();
    let mut rate_limit = Cooldown::new();
    resend.start(30);
    rate_limit.start(60);

    tokio::time::advance(Duration::from_secs(30)).await;

    assert!(!resend.is_active());
    assert_eq!(rate_limit.label().as_deref(), Some("Try again in 30s…"));

    rate_limit.clear();
    assert!(!rate_limit.is_active());
}

#[tokio::test(start_paused = true)]
async fn ticks_keep_running_after_the_timer_is_restarted() {
    let mut cooldown = Cooldown::new();
    cooldown.start(2);
    let ticks = cooldown.ticks();

    cooldown.start(60);

    let seen: Vec<u64> = ticks.collect().await;
    assert_eq!(seen, vec![2, 1, 0]);
    assert!(cooldown.is_active());
}
