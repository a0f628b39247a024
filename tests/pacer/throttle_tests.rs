// tests/pacer/throttle_tests.rs

// dependencies
use crate::{Recorder, inline_context, ms};
use pacer::{Pacer, ThrottleOptions};

#[tokio::test(start_paused = true)]
async fn calls_inside_active_window_are_dropped() {
    let pacer = Pacer::new();
    let context = inline_context();
    let recorder = Recorder::new();

    // 10 calls spaced 0.1s apart against a 1s window: only the first is
    // accepted, firing when its window closes.
    for i in 1..=10 {
        pacer.throttle(ms(1000), "k", ThrottleOptions::Default, &context, recorder.op_with(i));
        tokio::time::sleep(ms(100)).await;
    }
    tokio::time::sleep(ms(50)).await;

    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.last(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn accepted_starts_are_never_closer_than_the_window() {
    let pacer = Pacer::new();
    let context = inline_context();
    let recorder = Recorder::new();

    pacer.throttle(ms(1000), "k", ThrottleOptions::Default, &context, recorder.op_with(1));

    // Still inside the window at 0.9s: dropped.
    tokio::time::sleep(ms(900)).await;
    pacer.throttle(ms(1000), "k", ThrottleOptions::Default, &context, recorder.op_with(2));

    // Window closed (fire at 1.0s cleared the marker): accepted.
    tokio::time::sleep(ms(200)).await;
    pacer.throttle(ms(1000), "k", ThrottleOptions::Default, &context, recorder.op_with(3));
    tokio::time::sleep(ms(1100)).await;

    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.history(), vec![1, 3]);
}

#[tokio::test(start_paused = true)]
async fn run_first_immediately_fires_leading_and_windowed() {
    let pacer = Pacer::new();
    let context = inline_context();
    let recorder = Recorder::new();

    pacer.throttle(
        ms(1000),
        "k",
        ThrottleOptions::RunFirstImmediately,
        &context,
        recorder.op(),
    );
    // Leading fire is synchronous through the inline context.
    assert_eq!(recorder.count(), 1);

    // The windowed fire still happens at the end of the window.
    tokio::time::sleep(ms(1050)).await;
    assert_eq!(recorder.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn leading_fire_suppressed_while_window_active() {
    let pacer = Pacer::new();
    let context = inline_context();
    let recorder = Recorder::new();

    pacer.throttle(
        ms(1000),
        "k",
        ThrottleOptions::RunFirstImmediately,
        &context,
        recorder.op_with(1),
    );
    assert_eq!(recorder.count(), 1);

    tokio::time::sleep(ms(100)).await;
    pacer.throttle(
        ms(1000),
        "k",
        ThrottleOptions::RunFirstImmediately,
        &context,
        recorder.op_with(2),
    );
    // Inside the window: neither a leading nor a windowed fire.
    assert_eq!(recorder.count(), 1);

    tokio::time::sleep(ms(1000)).await;
    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.history(), vec![1, 1]);
}

#[tokio::test(start_paused = true)]
async fn last_guaranteed_fires_the_final_call_of_a_burst() {
    let pacer = Pacer::new();
    let context = inline_context();
    let recorder = Recorder::new();

    for i in 1..=3 {
        pacer.throttle(
            ms(1000),
            "k",
            ThrottleOptions::LastGuaranteed,
            &context,
            recorder.op_with(i),
        );
        tokio::time::sleep(ms(100)).await;
    }
    tokio::time::sleep(ms(1200)).await;

    // Windowed fire carries the first call, the trailing guarantee
    // carries the last one.
    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.history(), vec![1, 3]);
}

#[tokio::test(start_paused = true)]
async fn combined_unions_leading_windowed_and_trailing() {
    let pacer = Pacer::new();
    let context = inline_context();
    let recorder = Recorder::new();

    pacer.throttle(ms(1000), "k", ThrottleOptions::Combined, &context, recorder.op_with(1));
    // Leading fire.
    assert_eq!(recorder.count(), 1);

    tokio::time::sleep(ms(100)).await;
    pacer.throttle(ms(1000), "k", ThrottleOptions::Combined, &context, recorder.op_with(2));

    tokio::time::sleep(ms(1200)).await;

    // Leading (1), windowed (1), trailing guarantee (2).
    assert_eq!(recorder.count(), 3);
    assert_eq!(recorder.history(), vec![1, 1, 2]);
}
