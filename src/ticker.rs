//! Recurring tick sources.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Something that can deliver a tick every `period`.
///
/// Dropping the returned handle must stop further ticks.
pub trait TickSource {
    type Handle;

    fn schedule(&mut self, period: Duration) -> Self::Handle;
}

/// No scheduling at all; the host calls `tick` on its own cadence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manual;

impl TickSource for Manual {
    type Handle = ();

    fn schedule(&mut self, _period: Duration) -> Self::Handle {}
}

/// Posts `message` on a channel from a background thread every period.
pub struct ThreadTicker<M> {
    sender: Sender<M>,
    message: M,
}

impl<M: Clone + Send + 'static> ThreadTicker<M> {
    pub fn new(sender: Sender<M>, message: M) -> Self {
        Self { sender, message }
    }
}

impl<M: Clone + Send + 'static> TickSource for ThreadTicker<M> {
    type Handle = TickerHandle;

    fn schedule(&mut self, period: Duration) -> TickerHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);
        let sender = self.sender.clone();
        let message = self.message.clone();

        let spawned = thread::Builder::new()
            .name("pomo-ticker".to_string())
            .spawn(move || {
                loop {
                    thread::sleep(period);
                    if flag.load(Ordering::Acquire) || sender.send(message.clone()).is_err() {
                        break;
                    }
                }
                debug!("ticker stopped");
            });

        if let Err(error) = spawned {
            warn!(%error, "could not spawn ticker thread");
        }

        TickerHandle { stopped }
    }
}

/// Cancels its ticker when dropped.
#[derive(Debug)]
pub struct TickerHandle {
    stopped: Arc<AtomicBool>,
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::Release);
    }
}
