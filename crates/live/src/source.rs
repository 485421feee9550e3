//! Status event sources.
//!
//! The sync layer consumes an abstract stream of [`StatusEvent`]s; how they
//! are delivered is not its business. [`StatusFeed`] is the stream half of a
//! plain channel, so any push source (SSE client, websocket, hardware poll)
//! can feed it. [`spawn_simulator`] provides the periodic source used in
//! demos and tests: one random port flip per tick, cancellable, with no
//! dangling timer after shutdown.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use charge_map_markers::{PortStatus, StationDirectory};

use crate::patch::StyleSink;
use crate::sync::{StatusEvent, StatusStateSync};

/// Receiving end of a status event channel.
pub struct StatusFeed {
    rx: mpsc::Receiver<StatusEvent>,
}

impl StatusFeed {
    /// A bounded channel; hand the sender to whatever transport delivers
    /// status changes.
    pub fn channel(capacity: usize) -> (mpsc::Sender<StatusEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }

    /// Next event, or `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<StatusEvent> {
        self.rx.recv().await
    }
}

impl futures_core::Stream for StatusFeed {
    type Item = StatusEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SimulatorConfig {
    /// Time between simulated status flips.
    pub interval: Duration,
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            seed: 0,
        }
    }
}

/// Stops the simulator task and releases its timer.
///
/// Dropping the [`StatusFeed`] also stops the task (its next send fails);
/// the handle exists so a view teardown can cancel proactively instead of
/// waiting one tick.
pub struct SimulatorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Stop and wait for the task to finish.
    pub async fn stopped(self) {
        self.stop();
        let _ = self.task.await;
    }
}

/// Spawn a periodic status source over the given station set.
///
/// Each tick does a bounded amount of work: pick one station, one port, one
/// status, send one event. Ticks never block the control thread; if the feed
/// is not being drained the bounded channel applies backpressure to the
/// simulator only.
pub fn spawn_simulator(
    directory: StationDirectory,
    config: SimulatorConfig,
) -> (StatusFeed, SimulatorHandle) {
    let (tx, feed) = StatusFeed::channel(32);
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut ticker = tokio::time::interval(config.interval);
        // The first tick fires immediately; skip it so the initial sweep
        // from registration is what paints the first frame.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(event) = random_flip(&directory, &mut rng) else {
                        continue;
                    };
                    if tx.send(event).await.is_err() {
                        debug!("status feed dropped, simulator exiting");
                        break;
                    }
                }
                _ = shutdown_rx.changed() => {
                    debug!("status simulator stopped");
                    break;
                }
            }
        }
    });

    (feed, SimulatorHandle { shutdown, task })
}

fn random_flip(directory: &StationDirectory, rng: &mut SmallRng) -> Option<StatusEvent> {
    if directory.is_empty() {
        return None;
    }
    let station = &directory.stations()[rng.random_range(0..directory.len())];
    if station.ports().is_empty() {
        return None;
    }
    let port = &station.ports()[rng.random_range(0..station.ports().len())];

    let status = match rng.random_range(0..3) {
        0 => PortStatus::Free,
        1 => PortStatus::Busy,
        _ => PortStatus::Offline,
    };

    Some(StatusEvent {
        station: station.id().clone(),
        port: port.id.clone(),
        status,
    })
}

/// Drive a feed to completion on the control thread.
///
/// Patches are applied in emission order. Events addressed at unknown
/// stations or ports are logged and skipped rather than killing the feed;
/// a flaky source degrades to missing updates, never to a dead map.
pub async fn run_feed(
    mut feed: StatusFeed,
    sync: &mut StatusStateSync,
    sink: &mut impl StyleSink,
) {
    while let Some(event) = feed.next().await {
        if let Err(err) = sync.apply(&event, sink) {
            warn!(%err, "dropping status event for unknown target");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::RecordingSink;
    use charge_map_markers::{generate_stations, BadgeConfig, FactoryConfig};

    fn fixture_directory() -> StationDirectory {
        StationDirectory::new(generate_stations(&FactoryConfig {
            count: 5,
            seed: 7,
            ..Default::default()
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulator_emits_valid_events() {
        let directory = fixture_directory();
        let (mut feed, handle) = spawn_simulator(
            directory.clone(),
            SimulatorConfig {
                interval: Duration::from_millis(100),
                seed: 1,
            },
        );

        for _ in 0..10 {
            let event = feed.next().await.expect("simulator should be running");
            let station = directory.get(&event.station).expect("known station");
            assert!(station.port_index(&event.port).is_some());
        }

        handle.stopped().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulator_is_deterministic() {
        let directory = fixture_directory();
        let config = SimulatorConfig {
            interval: Duration::from_millis(50),
            seed: 42,
        };

        let mut runs = Vec::new();
        for _ in 0..2 {
            let (mut feed, handle) = spawn_simulator(directory.clone(), config);
            let mut events = Vec::new();
            for _ in 0..6 {
                events.push(feed.next().await.unwrap());
            }
            handle.stopped().await;
            runs.push(events);
        }

        assert_eq!(runs[0], runs[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_the_feed() {
        let (mut feed, handle) = spawn_simulator(fixture_directory(), SimulatorConfig::default());

        handle.stopped().await;
        // The task dropped its sender; the feed drains to None instead of
        // hanging on a dead timer.
        while feed.next().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_polls_as_a_stream() {
        use futures_core::Stream;

        let directory = fixture_directory();
        let station = directory.stations()[0].clone();
        let (tx, mut feed) = StatusFeed::channel(4);

        tx.send(StatusEvent {
            station: station.id().clone(),
            port: station.ports()[0].id.clone(),
            status: PortStatus::Busy,
        })
        .await
        .unwrap();
        drop(tx);

        let next = std::future::poll_fn(|cx| Pin::new(&mut feed).poll_next(cx)).await;
        assert_eq!(next.map(|e| e.status), Some(PortStatus::Busy));

        // Sender gone and buffer drained: the stream terminates.
        let end = std::future::poll_fn(|cx| Pin::new(&mut feed).poll_next(cx)).await;
        assert!(end.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_survives_bad_events() {
        let directory = fixture_directory();
        let (tx, feed) = StatusFeed::channel(8);

        let mut sink = RecordingSink::default();
        let mut sync = StatusStateSync::register(directory.clone(), BadgeConfig::default(), &mut sink);
        sink.patches.clear();

        let station = directory.stations()[0].clone();
        let port = station.ports()[0].clone();
        tx.send(StatusEvent {
            station: charge_map_markers::StationIdentifier::new("no-such-station"),
            port: port.id.clone(),
            status: PortStatus::Busy,
        })
        .await
        .unwrap();
        tx.send(StatusEvent {
            station: station.id().clone(),
            port: port.id.clone(),
            status: PortStatus::Offline,
        })
        .await
        .unwrap();
        drop(tx);

        run_feed(feed, &mut sync, &mut sink).await;

        // The bad event was skipped, the good one landed.
        assert_eq!(sink.patches.len(), 1);
        assert_eq!(
            sink.patches[0].feature_id.as_str(),
            format!("seg:{}:0", station.id())
        );
    }
}
