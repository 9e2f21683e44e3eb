use std::time::Duration;

use coursequiz::timer::{format_clock, format_elapsed, Countdown};

#[tokio::test(start_paused = true)]
async fn test_countdown_ticks_every_period() {
    let mut countdown = Countdown::every_second();
    for _ in 0..3 {
        assert_eq!(countdown.recv().await, Some(()));
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_countdown_stops_ticking() {
    let mut countdown = Countdown::spawn(Duration::from_millis(500));
    assert_eq!(countdown.recv().await, Some(()));

    tokio::time::sleep(Duration::from_secs(2)).await;
    countdown.cancel();
    assert_eq!(countdown.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_countdown_stops_its_task() {
    let mut countdown = Countdown::spawn(Duration::from_millis(500));
    assert_eq!(countdown.recv().await, Some(()));

    let task = countdown.abort_handle();
    drop(countdown);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(task.is_finished());
}

#[test]
fn test_time_labels() {
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(65), "1:05");
    assert_eq!(format_clock(600), "10:00");
    assert_eq!(format_elapsed(83), "1m 23s");
    assert_eq!(format_elapsed(7), "0m 7s");
}
