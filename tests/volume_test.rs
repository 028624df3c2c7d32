use std::{sync::Arc, time::Duration};

use sporemote::management::{VolumeDebouncer, VolumeSink};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Sink that records every value the debouncer sends.
#[derive(Clone, Default)]
struct RecordingSink {
    sent: Arc<Mutex<Vec<u8>>>,
}

impl VolumeSink for RecordingSink {
    async fn send_volume(&self, percent: u8) -> sporemote::Result<()> {
        self.sent.lock().await.push(percent);
        Ok(())
    }
}

const INTERVAL: Duration = Duration::from_millis(25);

fn create_debouncer(sink: RecordingSink) -> VolumeDebouncer<RecordingSink> {
    VolumeDebouncer::new(sink, INTERVAL, CancellationToken::new())
}

#[tokio::test]
async fn test_burst_coalesces_to_final_value() {
    let sink = RecordingSink::default();
    let debouncer = create_debouncer(sink.clone());

    // Three changes within one debounce interval
    debouncer.submit(30).await;
    debouncer.submit(45).await;
    debouncer.submit(60).await;

    tokio::time::sleep(INTERVAL * 4).await;

    let sent = sink.sent.lock().await.clone();
    assert_eq!(sent, vec![60]);
}

#[tokio::test]
async fn test_settled_then_new_value_sends_again() {
    let sink = RecordingSink::default();
    let debouncer = create_debouncer(sink.clone());

    debouncer.submit(30).await;
    tokio::time::sleep(INTERVAL * 4).await;

    debouncer.submit(80).await;
    tokio::time::sleep(INTERVAL * 4).await;

    let sent = sink.sent.lock().await.clone();
    assert_eq!(sent, vec![30, 80]);
}

#[tokio::test]
async fn test_update_during_flush_is_not_dropped() {
    let sink = RecordingSink::default();
    let debouncer = create_debouncer(sink.clone());

    debouncer.submit(10).await;

    // Lands inside the running task's follow-up wait; no second task may
    // spawn, the running one has to pick the value up
    tokio::time::sleep(INTERVAL + INTERVAL / 2).await;
    debouncer.submit(90).await;

    tokio::time::sleep(INTERVAL * 4).await;

    let sent = sink.sent.lock().await.clone();
    assert_eq!(sent, vec![10, 90]);
}

#[tokio::test]
async fn test_call_rate_is_bounded() {
    let sink = RecordingSink::default();
    let debouncer = create_debouncer(sink.clone());

    let start = std::time::Instant::now();

    // Keep the cell dirty across several intervals
    for v in 0..=50u8 {
        debouncer.submit(v).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    tokio::time::sleep(INTERVAL * 6).await;

    let elapsed = start.elapsed();
    let sent = sink.sent.lock().await.clone();

    // At most one send per elapsed interval, and the final settled value
    // always goes out last
    let bound = elapsed.as_millis() / INTERVAL.as_millis() + 1;
    assert!(
        sent.len() as u128 <= bound,
        "{} sends in {:?}: {:?}",
        sent.len(),
        elapsed,
        sent
    );
    assert_eq!(*sent.last().unwrap(), 50);
}

#[tokio::test]
async fn test_cancellation_stops_flush_task() {
    let sink = RecordingSink::default();
    let cancel = CancellationToken::new();
    let debouncer = VolumeDebouncer::new(sink.clone(), Duration::from_secs(3600), cancel.clone());

    debouncer.submit(42).await;
    cancel.cancel();

    // Must return promptly despite the hour-long interval
    debouncer.shutdown().await;

    assert!(sink.sent.lock().await.is_empty());
}
