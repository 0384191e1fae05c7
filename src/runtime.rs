use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::timer::TimerToken;

/// Unified event type consumed by the quiz runner
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// A line of user input, without the trailing newline.
    Line(String),
    /// One clock second elapsed for the timer run identified by the token.
    Tick(TimerToken),
    /// Input is exhausted.
    Closed,
    /// Nothing arrived within the poll interval.
    Idle,
}

/// Source of host events (user input, scheduled ticks)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError>;
}

/// Event source fed through an mpsc channel; used by the binary and by tests.
pub struct ChannelEventSource {
    rx: Receiver<HostEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<HostEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Forward lines from `reader` as [`HostEvent::Line`], then send `Closed`.
pub fn spawn_line_reader<R>(reader: R, tx: Sender<HostEvent>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.send(HostEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!("input reader stopped: {e}");
                    break;
                }
            }
        }
        let _ = tx.send(HostEvent::Closed);
    })
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Emits `HostEvent::Tick(token)` every ticker interval for the armed token.
///
/// Re-arming stops the previous emitter. A tick already in flight when that
/// happens still reaches the channel carrying the old token; the session
/// drops it as stale.
pub struct TickScheduler<T: Ticker> {
    ticker: T,
    tx: Sender<HostEvent>,
    stop: Option<Arc<AtomicBool>>,
}

impl<T: Ticker> TickScheduler<T> {
    pub fn new(ticker: T, tx: Sender<HostEvent>) -> Self {
        Self {
            ticker,
            tx,
            stop: None,
        }
    }

    pub fn arm(&mut self, token: TimerToken) {
        self.disarm();

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let tx = self.tx.clone();
        let interval = self.ticker.interval();

        thread::spawn(move || loop {
            thread::sleep(interval);
            if thread_stop.load(Ordering::Acquire) {
                break;
            }
            if tx.send(HostEvent::Tick(token)).is_err() {
                break;
            }
        });

        tracing::trace!(token = %token, "tick scheduler armed");
        self.stop = Some(stop);
    }

    pub fn disarm(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.store(true, Ordering::Release);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.stop.is_some()
    }
}

impl<T: Ticker> Drop for TickScheduler<T> {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.store(true, Ordering::Release);
        }
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    poll: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, poll: Duration) -> Self {
        Self { event_source, poll }
    }

    /// Blocks up to the poll interval; `Idle` on timeout, `Closed` once every sender is gone.
    pub fn step(&self) -> HostEvent {
        match self.event_source.recv_timeout(self.poll) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => HostEvent::Idle,
            Err(RecvTimeoutError::Disconnected) => HostEvent::Closed,
        }
    }
}
