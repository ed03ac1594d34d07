use std::time::Duration;

use super::detector::*;

#[tokio::test]
async fn test_race_primary_wins_when_it_resolves() {
    let winner = race_with_fallback(async {}, Duration::from_secs(5)).await;
    assert_eq!(winner, RaceWinner::Primary);
}

#[tokio::test]
async fn test_race_fallback_wins_when_primary_hangs() {
    let winner = race_with_fallback(
        std::future::pending::<()>(),
        Duration::from_millis(10),
    )
    .await;
    assert_eq!(winner, RaceWinner::Fallback);
}

#[tokio::test(start_paused = true)]
async fn test_race_fallback_fires_after_its_full_delay() {
    let started = tokio::time::Instant::now();
    let winner = race_with_fallback(std::future::pending::<()>(), FALLBACK_DELAY).await;

    assert_eq!(winner, RaceWinner::Fallback);
    assert!(started.elapsed() >= FALLBACK_DELAY);
}

#[test]
fn test_idle_window_fits_inside_bound() {
    assert!(IDLE_WINDOW < IDLE_BOUND);
    assert!(RESOURCE_POLL_INTERVAL < IDLE_WINDOW);
    assert!(FALLBACK_DELAY < IDLE_BOUND);
}
