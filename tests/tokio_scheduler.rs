use std::{sync::Arc, time::Duration};

use coderush_timer::{
    state::HeadlessPage,
    tasks::TokioScheduler,
    timer::{CountdownTimer, Page, Scheduler, PAUSE_SCREEN_ID, TIMER_ELEMENT_ID},
};
use tokio::{
    sync::mpsc,
    time::{sleep, Instant},
};

struct Harness {
    timer: CountdownTimer,
    page: Arc<HeadlessPage>,
    scheduler: Arc<TokioScheduler>,
}

fn harness(seconds: u64) -> Harness {
    let page = Arc::new(HeadlessPage::game_layout());
    let scheduler = Arc::new(TokioScheduler::current());
    let timer = CountdownTimer::new(
        Duration::from_secs(seconds),
        Arc::clone(&page) as Arc<dyn Page>,
        Arc::clone(&scheduler) as Arc<dyn Scheduler>,
    );
    Harness { timer, page, scheduler }
}

#[tokio::test(start_paused = true)]
async fn first_tick_is_one_period_after_start() {
    let h = harness(10);
    h.timer.start();
    assert_eq!(h.timer.remaining_seconds(), 9);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(h.timer.remaining_seconds(), 9);

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(h.timer.remaining_seconds(), 8);
    assert_eq!(h.page.text(TIMER_ELEMENT_ID).as_deref(), Some("00:09"));
}

#[tokio::test(start_paused = true)]
async fn completes_after_full_duration() {
    let h = harness(3);
    let (tx, mut rx) = mpsc::unbounded_channel();
    h.timer.set_on_time_up(move || {
        let _ = tx.send(Instant::now());
    });

    let started = Instant::now();
    h.timer.start();

    let fired_at = rx.recv().await.expect("time-up");
    let elapsed = fired_at - started;
    assert!(elapsed >= Duration::from_secs(3), "fired after {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3100), "fired after {:?}", elapsed);

    assert!(!h.timer.is_running());
    assert_eq!(h.timer.remaining_seconds(), -1);
    assert_eq!(h.scheduler.active_count(), 0);
    assert_eq!(h.page.text(TIMER_ELEMENT_ID).as_deref(), Some("00:00"));

    // Nothing fires again
    sleep(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(h.timer.remaining_seconds(), -1);
}

#[tokio::test(start_paused = true)]
async fn pause_stops_the_clock() {
    let h = harness(10);
    h.timer.start();
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(h.timer.remaining_seconds(), 7);

    h.timer.pause();
    assert_eq!(h.scheduler.active_count(), 0);
    sleep(Duration::from_secs(5)).await;
    assert_eq!(h.timer.remaining_seconds(), 7);

    h.timer.resume();
    assert_eq!(h.scheduler.active_count(), 1);
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(h.timer.remaining_seconds(), 6);
}

#[tokio::test(start_paused = true)]
async fn pause_screen_holds_the_countdown() {
    let h = harness(10);
    h.timer.start();
    h.page.set_hidden(PAUSE_SCREEN_ID, false);

    sleep(Duration::from_millis(3500)).await;
    assert_eq!(h.timer.remaining_seconds(), 9);
    assert!(h.timer.is_running());
    assert_eq!(h.page.text(TIMER_ELEMENT_ID).as_deref(), Some("00:09"));

    h.page.set_hidden(PAUSE_SCREEN_ID, true);
    sleep(Duration::from_secs(1)).await;
    assert_eq!(h.timer.remaining_seconds(), 8);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_ticking() {
    let h = harness(10);
    h.timer.start();
    sleep(Duration::from_millis(2500)).await;

    h.timer.reset();
    assert_eq!(h.scheduler.active_count(), 0);
    assert_eq!(h.page.text(TIMER_ELEMENT_ID).as_deref(), Some("00:10"));

    sleep(Duration::from_secs(3)).await;
    assert_eq!(h.timer.remaining_seconds(), 10);
}

#[tokio::test(start_paused = true)]
async fn repeated_starts_keep_one_task() {
    let h = harness(10);
    for _ in 0..5 {
        h.timer.start();
        h.timer.resume();
    }
    assert_eq!(h.scheduler.active_count(), 1);

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(h.timer.remaining_seconds(), 9);
}
