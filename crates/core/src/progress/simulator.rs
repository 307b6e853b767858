//! Cosmetic progress ticker.
//!
//! Runs as a spawned task for the duration of one request. It never looks at
//! transferred bytes; it only keeps the indicator moving until the cap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ProgressConfig;
use crate::events::{EventBroadcaster, UploadEvent};

use super::types::ProgressState;

/// Highest percentage a tick may reach; 100 is reserved for completion.
const MAX_CAP: u8 = 99;

/// Starts tickers with a fixed interval, step and cap.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    config: ProgressConfig,
}

impl ProgressSimulator {
    /// Out-of-range settings are pulled back: a zero interval becomes 1 ms
    /// and the cap is held below 100.
    pub fn new(mut config: ProgressConfig) -> Self {
        if config.interval_ms == 0 || config.cap > MAX_CAP {
            warn!(
                interval_ms = config.interval_ms,
                cap = config.cap,
                "Progress settings out of range, clamping"
            );
            config.interval_ms = config.interval_ms.max(1);
            config.cap = config.cap.min(MAX_CAP);
        }
        Self { config }
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Spawn a ticker advancing `progress` every interval. The first tick
    /// fires one full interval after this call.
    pub fn start(
        &self,
        cycle_id: Uuid,
        progress: Arc<RwLock<ProgressState>>,
        events: EventBroadcaster,
    ) -> ProgressTicker {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let period = Duration::from_millis(self.config.interval_ms);
        let step = self.config.step;
        let cap = self.config.cap;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut advanced = 0u32;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let mut state = progress.write().await;
                        if state.advance(step, cap) {
                            advanced += 1;
                            debug!(cycle_id = %cycle_id, percent = state.percent, "Progress tick");
                            events.emit(UploadEvent::ProgressTick {
                                cycle_id,
                                percent: state.percent,
                                status: state.status.clone(),
                            });
                        }
                    }
                }
            }

            advanced
        });

        ProgressTicker {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

/// Handle to a running ticker. Dropping it without [`stop`](Self::stop) aborts the task.
#[derive(Debug)]
pub struct ProgressTicker {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<u32>>,
}

impl ProgressTicker {
    /// Stop ticking and wait for the task to exit.
    ///
    /// Once this returns no further tick can touch the progress state.
    /// Returns how many ticks moved the percentage.
    pub async fn stop(mut self) -> u32 {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                warn!("Progress ticker task ended abnormally: {}", e);
                0
            }),
            None => 0,
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
