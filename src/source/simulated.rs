//! Timed scan simulation.
//!
//! A worker thread advances progress in fixed steps, then emits the
//! configured reading. Events arrive on a crossbeam channel so a UI can
//! render progress while the caller waits.

use crate::core::VitalsSnapshot;
use crate::source::types::{ScanEvent, ScanEventKind, SourceError};
use crate::source::VitalsSource;
use crossbeam_channel::{unbounded, Receiver};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Pacing of a simulated scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Progress added per tick, in percent
    pub step_percent: u8,
    /// Delay between ticks
    #[serde(with = "crate::config::duration_millis")]
    pub tick: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step_percent: 2,
            tick: Duration::from_millis(300),
        }
    }
}

impl ScanConfig {
    /// Number of ticks before the scan completes.
    pub fn tick_count(&self) -> u32 {
        let step = u32::from(self.step_percent.clamp(1, 100));
        (100 + step - 1) / step
    }

    /// Wall-clock length of a full scan.
    pub fn total_duration(&self) -> Duration {
        self.tick * self.tick_count()
    }
}

/// A scan that runs on a background thread.
pub struct SimulatedScan {
    config: ScanConfig,
    snapshot: VitalsSnapshot,
    /// Events from the current worker, which holds the only sender
    receiver: Receiver<ScanEvent>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SimulatedScan {
    /// Create a scan that will yield `snapshot` when done.
    pub fn new(config: ScanConfig, snapshot: VitalsSnapshot) -> Self {
        let (_, receiver) = unbounded();
        Self {
            config,
            snapshot,
            receiver,
            cancelled: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Start the worker thread.
    pub fn start(&mut self) -> Result<(), SourceError> {
        if self.worker.is_some() {
            return Err(SourceError::AlreadyRunning);
        }

        let (sender, receiver) = unbounded();
        self.receiver = receiver;
        let cancelled = self.cancelled.clone();
        let snapshot = self.snapshot;
        let step = self.config.step_percent.clamp(1, 100);
        let tick = self.config.tick;

        tracing::debug!(step, tick_ms = tick.as_millis() as u64, "starting simulated scan");

        self.worker = Some(thread::spawn(move || {
            let mut percent: u8 = 0;
            while percent < 100 {
                thread::sleep(tick);
                if cancelled.load(Ordering::SeqCst) {
                    let _ = sender.send(ScanEvent::cancelled());
                    return;
                }
                percent = percent.saturating_add(step).min(100);
                let _ = sender.send(ScanEvent::progress(percent));
            }
            let _ = sender.send(ScanEvent::complete(snapshot));
        }));

        Ok(())
    }

    /// Whether the worker has been started.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map(|w| !w.is_finished())
            .unwrap_or(false)
    }

    /// Flag that stops the scan at its next tick.
    ///
    /// Can be handed to a signal handler.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Receiver for events of the most recent run.
    ///
    /// Disconnects once that run's worker exits.
    pub fn receiver(&self) -> &Receiver<ScanEvent> {
        &self.receiver
    }

    /// Wait for the scan to finish, calling `on_progress` for each step.
    pub fn wait_with<F>(&mut self, mut on_progress: F) -> Result<VitalsSnapshot, SourceError>
    where
        F: FnMut(u8),
    {
        if self.worker.is_none() {
            self.start()?;
        }

        let result = loop {
            match self.receiver.recv() {
                Ok(event) => match event.kind {
                    ScanEventKind::Progress { percent } => on_progress(percent),
                    ScanEventKind::Complete { snapshot } => break Ok(snapshot),
                    ScanEventKind::Cancelled => break Err(SourceError::Cancelled),
                },
                Err(_) => break Err(SourceError::Disconnected),
            }
        };

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        // Allow the same scan to run again.
        self.cancelled.store(false, Ordering::SeqCst);
        result
    }
}

impl VitalsSource for SimulatedScan {
    fn read(&mut self) -> Result<VitalsSnapshot, SourceError> {
        self.wait_with(|_| {})
    }
}

impl Drop for SimulatedScan {
    fn drop(&mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> ScanConfig {
        ScanConfig {
            step_percent: 25,
            tick: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_default_pacing() {
        let config = ScanConfig::default();
        assert_eq!(config.tick_count(), 50);
        assert_eq!(config.total_duration(), Duration::from_secs(15));
    }

    #[test]
    fn test_uneven_step_still_reaches_100() {
        let config = ScanConfig {
            step_percent: 30,
            tick: Duration::from_millis(1),
        };
        assert_eq!(config.tick_count(), 4);

        let mut scan = SimulatedScan::new(config, VitalsSnapshot::baseline());
        let mut seen = Vec::new();
        let snapshot = scan.wait_with(|p| seen.push(p)).unwrap();
        assert_eq!(seen, vec![30, 60, 90, 100]);
        assert_eq!(snapshot, VitalsSnapshot::baseline());
    }

    #[test]
    fn test_read_yields_snapshot() {
        let mut scan = SimulatedScan::new(fast(), VitalsSnapshot::demo());
        assert_eq!(scan.read(), Ok(VitalsSnapshot::demo()));
        // A finished scan can be read again.
        assert_eq!(scan.read(), Ok(VitalsSnapshot::demo()));
    }

    #[test]
    fn test_double_start_rejected() {
        let mut scan = SimulatedScan::new(fast(), VitalsSnapshot::demo());
        scan.start().unwrap();
        assert_eq!(scan.start(), Err(SourceError::AlreadyRunning));
        assert!(scan.read().is_ok());
    }

    #[test]
    fn test_receiver_disconnects_after_worker_exits() {
        let mut scan = SimulatedScan::new(fast(), VitalsSnapshot::demo());
        scan.start().unwrap();

        // Drain the run by hand, including its terminal event.
        loop {
            let event = scan.receiver().recv().unwrap();
            if event.is_terminal() {
                break;
            }
        }

        // Nothing left to send and the worker is gone.
        assert_eq!(scan.read(), Err(SourceError::Disconnected));
        // A fresh run gets a fresh channel.
        assert_eq!(scan.read(), Ok(VitalsSnapshot::demo()));
    }

    #[test]
    fn test_cancel_before_completion() {
        let config = ScanConfig {
            step_percent: 1,
            tick: Duration::from_millis(5),
        };
        let mut scan = SimulatedScan::new(config, VitalsSnapshot::demo());
        scan.start().unwrap();
        scan.cancel();
        assert_eq!(scan.read(), Err(SourceError::Cancelled));
    }
}
