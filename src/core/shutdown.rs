//! Signal-driven shutdown
//!
//! The first SIGINT/SIGTERM/SIGHUP/SIGQUIT (or Ctrl-C elsewhere) requests a
//! graceful stop, which cancels the running coordinator. A second signal exits
//! the process immediately with status 130.

use crate::coordinator::CancelHandle;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Exit status used when a run is interrupted
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Fans a shutdown request out to everything that subscribed
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
    signal_count: Arc<AtomicUsize>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);

        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            signal_count: Arc::new(AtomicUsize::new(0)),
        };

        (coordinator, shutdown_rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Cancel the run behind `cancel` as soon as shutdown is requested
    pub fn cancel_on_shutdown(&self, cancel: CancelHandle) -> JoinHandle<()> {
        let mut shutdown_rx = self.subscribe();
        tokio::spawn(async move {
            match shutdown_rx.recv().await {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => cancel.cancel(),
                Err(broadcast::error::RecvError::Closed) => {}
            }
        })
    }

    /// Install process signal handlers; must be called inside a tokio runtime
    pub fn install_signal_handlers(&self) {
        #[cfg(unix)]
        {
            // Writing reports into a closed pipe should end the process quietly
            unsafe {
                libc::signal(libc::SIGPIPE, libc::SIG_DFL);
            }

            use tokio::signal::unix::{signal, SignalKind};
            let signals = [
                SignalKind::interrupt(),
                SignalKind::terminate(),
                SignalKind::hangup(),
                SignalKind::quit(),
            ];

            for kind in signals {
                let handler = self.handler();
                tokio::spawn(async move {
                    if let Ok(mut sig) = signal(kind) {
                        while sig.recv().await.is_some() {
                            handler.on_signal();
                        }
                    }
                });
            }
        }

        #[cfg(not(unix))]
        {
            let handler = self.handler();
            tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    handler.on_signal();
                }
            });
        }
    }

    fn handler(&self) -> SignalHandler {
        SignalHandler {
            shutdown_tx: self.shutdown_tx.clone(),
            shutdown_requested: Arc::clone(&self.shutdown_requested),
            signal_count: Arc::clone(&self.signal_count),
        }
    }
}

struct SignalHandler {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
    signal_count: Arc<AtomicUsize>,
}

impl SignalHandler {
    fn on_signal(&self) {
        let previous = self.signal_count.fetch_add(1, Ordering::AcqRel);
        if previous >= 1 {
            log::warn!("Second signal received; exiting");
            crate::core::logging::flush_logging();
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }

        log::warn!("Signal received; stopping (send again to force exit)");
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }
}
