use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const UNMEASURED: u64 = u64::MAX;

/// Gateway connection status shared between the gateway task, the ping
/// command, and the health endpoint.
#[derive(Debug, Clone)]
pub struct GatewayStatus {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    connected: AtomicBool,
    latency_micros: AtomicU64,
}

impl Default for GatewayStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayStatus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                connected: AtomicBool::new(false),
                latency_micros: AtomicU64::new(UNMEASURED),
            }),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.inner.connected.store(connected, Ordering::Relaxed);
        if !connected {
            self.inner.latency_micros.store(UNMEASURED, Ordering::Relaxed);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::Relaxed)
    }

    /// Record the round trip between a heartbeat and its ack.
    pub fn record_latency(&self, rtt: Duration) {
        let micros = u64::try_from(rtt.as_micros()).unwrap_or(UNMEASURED - 1);
        self.inner.latency_micros.store(micros, Ordering::Relaxed);
    }

    /// Latest heartbeat round trip; `None` until the first ack arrives.
    pub fn latency(&self) -> Option<Duration> {
        match self.inner.latency_micros.load(Ordering::Relaxed) {
            UNMEASURED => None,
            micros => Some(Duration::from_micros(micros)),
        }
    }
}
