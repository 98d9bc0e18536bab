//! Timer-driven simulation of autoregressive generation.
//!
//! For every token of the fixed response the sequencer walks the pipeline
//! sub-steps, pausing one step duration on each, then appends the token and
//! pauses once more before the next walk.
//!
//! ## Timer chain
//!
//! ```text
//! start() ──► Tokenize ─800ms─► Embed ─800ms─► Transform ─800ms─►
//!             Probabilities ─800ms─► Sample ─800ms─► append R[n]
//!                                                      │
//!             ◄──────────── step + 200ms ──────────────┘
//! ```
//!
//! Each run attempt gets a fresh epoch. The chain for an epoch is a single
//! spawned task, and every resumption compares its captured epoch against
//! the current one before touching state. Aborting the task on pause, reset
//! or teardown is only an optimisation: a continuation that slips through
//! still finds its epoch stale and does nothing.
//!
//! Snapshots are queued in an outbox while the state lock is still held and
//! delivered outside it by one thread at a time, so every observer sees
//! transitions in the order they happened. A transition made from inside an
//! observer is queued behind the snapshot being delivered.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use std::time::Duration;

use log::{debug, info, trace};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::state::{GenerationState, Phase, SubStep};
use crate::config::{SequencerConfig, clamp_speed};
use crate::error::{Error, Result};

/// Callback receiving a snapshot after every state change.
pub type Observer = Arc<dyn Fn(&GenerationState) + Send + Sync>;

/// Handle returned by [`GenerationSequencer::on_state_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Result of applying one continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advance {
    /// Continuation belongs to an old epoch or a torn-down sequencer.
    Stale,
    /// State changed; resume at `cursor` after `delay`.
    Continue { delay: Duration, cursor: usize },
    /// State changed; the chain ends.
    Halt,
}

/// Snapshot plus the observers it is owed, delivered outside the lock.
struct Notification {
    snapshot: GenerationState,
    observers: Vec<Observer>,
}

impl Notification {
    fn deliver(self) {
        for observer in &self.observers {
            observer(&self.snapshot);
        }
    }
}

/// Notifications waiting for delivery, in transition order.
#[derive(Default)]
struct Outbox {
    pending: VecDeque<Notification>,
    /// Thread currently delivering, if any.
    drainer: Option<ThreadId>,
}

struct Inner {
    state: GenerationState,
    timer: Option<JoinHandle<()>>,
    shut_down: bool,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
}

impl Inner {
    fn new(config: &SequencerConfig) -> Self {
        Self {
            state: GenerationState::new(config.response.len(), clamp_speed(config.default_speed)),
            timer: None,
            shut_down: false,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn notification(&self) -> Notification {
        Notification {
            snapshot: self.state.clone(),
            observers: self.observers.iter().map(|(_, o)| Arc::clone(o)).collect(),
        }
    }

    /// Apply the continuation for `epoch` resuming at sub-step `cursor`.
    ///
    /// `cursor == SubStep::COUNT` means the walk is done and the next
    /// response token is due.
    fn advance(&mut self, config: &SequencerConfig, epoch: u64, cursor: usize) -> Advance {
        if self.shut_down || self.state.run_epoch != epoch || !self.state.is_running {
            trace!(
                "dropping stale continuation (epoch {epoch}, current {})",
                self.state.run_epoch
            );
            return Advance::Stale;
        }

        let state = &mut self.state;
        if state.is_finished() {
            state.is_running = false;
            state.current_sub_step = None;
            return Advance::Halt;
        }

        if let Some(&step) = SubStep::ALL.get(cursor) {
            state.current_sub_step = Some(step);
            debug!(
                "token {} sub-step {}",
                state.emitted_tokens.len(),
                step.as_str()
            );
            return Advance::Continue {
                delay: step_delay(config, state.speed_multiplier),
                cursor: cursor + 1,
            };
        }

        state.current_sub_step = None;
        let Some(token) = config.response.get(state.emitted_tokens.len()) else {
            state.is_running = false;
            return Advance::Halt;
        };
        state.emitted_tokens.push(token.clone());
        debug!(
            "emitted {token:?} ({}/{})",
            state.emitted_tokens.len(),
            state.total_tokens
        );

        if state.is_finished() {
            state.is_running = false;
            info!("generation finished after {} tokens", state.total_tokens);
            Advance::Halt
        } else {
            Advance::Continue {
                delay: step_delay(config, state.speed_multiplier) + config.settle_gap(),
                cursor: 0,
            }
        }
    }
}

/// One sub-step's duration at `speed`.
fn step_delay(config: &SequencerConfig, speed: f32) -> Duration {
    config.base_step_duration().div_f64(f64::from(speed))
}

struct Shared {
    config: SequencerConfig,
    inner: Mutex<Inner>,
    outbox: Mutex<Outbox>,
    drained: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_outbox(&self) -> MutexGuard<'_, Outbox> {
        self.outbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a snapshot of `inner`, release it, and deliver.
    fn publish(&self, inner: MutexGuard<'_, Inner>) {
        self.lock_outbox().pending.push_back(inner.notification());
        drop(inner);
        self.drain();
    }

    /// Deliver queued notifications until the outbox is empty.
    ///
    /// Returns at once when called from an observer: the delivery loop
    /// further up this thread's stack picks the new snapshot up next.
    fn drain(&self) {
        let me = thread::current().id();
        let mut outbox = self.lock_outbox();
        if outbox.drainer == Some(me) {
            return;
        }
        while outbox.drainer.is_some() {
            outbox = self
                .drained
                .wait(outbox)
                .unwrap_or_else(PoisonError::into_inner);
        }
        outbox.drainer = Some(me);
        let _release = ReleaseDrainer(self);
        while let Some(notification) = outbox.pending.pop_front() {
            drop(outbox);
            notification.deliver();
            outbox = self.lock_outbox();
        }
        drop(outbox);
    }

    /// Run one continuation and notify observers if anything changed.
    fn fire(&self, epoch: u64, cursor: usize) -> Advance {
        let mut inner = self.lock();
        let advance = inner.advance(&self.config, epoch, cursor);
        if advance == Advance::Stale {
            return advance;
        }
        if advance == Advance::Halt {
            inner.timer = None;
        }
        self.publish(inner);
        advance
    }
}

/// Hands the outbox to the next waiting thread, even if an observer panics.
struct ReleaseDrainer<'a>(&'a Shared);

impl Drop for ReleaseDrainer<'_> {
    fn drop(&mut self) {
        self.0.lock_outbox().drainer = None;
        self.0.drained.notify_all();
    }
}

/// Timer chain for one epoch.
async fn drive(shared: Arc<Shared>, epoch: u64, mut delay: Duration, mut cursor: usize) {
    loop {
        tokio::time::sleep(delay).await;
        match shared.fire(epoch, cursor) {
            Advance::Continue {
                delay: next_delay,
                cursor: next_cursor,
            } => {
                delay = next_delay;
                cursor = next_cursor;
            }
            Advance::Halt | Advance::Stale => return,
        }
    }
}

/// Deterministic, cancellable generation loop simulator.
///
/// # Example
///
/// ```no_run
/// use llm_explainer::{GenerationSequencer, SequencerConfig};
///
/// # async fn demo() -> llm_explainer::Result<()> {
/// let sequencer = GenerationSequencer::new(SequencerConfig::default())?;
/// sequencer.on_state_change(|state| println!("{:?}", state.current_sub_step));
/// sequencer.start();
/// # Ok(())
/// # }
/// ```
pub struct GenerationSequencer {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl GenerationSequencer {
    /// Create a sequencer driven by the current Tokio runtime.
    pub fn new(config: SequencerConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Self::with_handle(config, runtime)
    }

    /// Create a sequencer whose timers run on `runtime`.
    pub fn with_handle(config: SequencerConfig, runtime: Handle) -> Result<Self> {
        config.validate()?;
        let inner = Inner::new(&config);
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                inner: Mutex::new(inner),
                outbox: Mutex::new(Outbox::default()),
                drained: Condvar::new(),
            }),
            runtime,
        })
    }

    /// The configuration this sequencer plays.
    pub fn config(&self) -> &SequencerConfig {
        &self.shared.config
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> GenerationState {
        self.shared.lock().state.clone()
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> Phase {
        self.shared.lock().state.phase()
    }

    /// Begin or resume generation.
    ///
    /// Does nothing when already running, finished, or shut down. Resuming
    /// after [`pause`](Self::pause) opens a new epoch and restarts the
    /// current token's walk from [`SubStep::Tokenize`].
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        if inner.shut_down || inner.state.is_running || inner.state.is_finished() {
            return;
        }
        inner.cancel_timer();
        inner.state.is_running = true;
        inner.state.run_epoch += 1;
        let epoch = inner.state.run_epoch;
        info!(
            "starting epoch {epoch} at token {}",
            inner.state.emitted_tokens.len()
        );

        if let Advance::Continue { delay, cursor } = inner.advance(&self.shared.config, epoch, 0) {
            let shared = Arc::clone(&self.shared);
            inner.timer = Some(self.runtime.spawn(drive(shared, epoch, delay, cursor)));
        }
        self.shared.publish(inner);
    }

    /// Stop advancing, keeping the emitted tokens.
    ///
    /// The displayed sub-step is cleared, so a paused snapshot never shows
    /// a sub-step.
    pub fn pause(&self) {
        let mut inner = self.shared.lock();
        if inner.shut_down || !inner.state.is_running {
            return;
        }
        inner.cancel_timer();
        inner.state.is_running = false;
        inner.state.current_sub_step = None;
        info!(
            "paused epoch {} at token {}",
            inner.state.run_epoch,
            inner.state.emitted_tokens.len()
        );
        self.shared.publish(inner);
    }

    /// Return to an empty idle state, invalidating any in-flight continuation.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        if inner.shut_down {
            return;
        }
        inner.cancel_timer();
        let state = &mut inner.state;
        state.is_running = false;
        state.emitted_tokens.clear();
        state.current_sub_step = None;
        state.run_epoch += 1;
        info!("reset to epoch {}", state.run_epoch);
        self.shared.publish(inner);
    }

    /// Change the speed for delays scheduled from now on.
    ///
    /// The value is clamped with [`clamp_speed`]; the applied speed is
    /// returned. A delay already in flight keeps its original length.
    pub fn set_speed(&self, multiplier: f32) -> f32 {
        let speed = clamp_speed(multiplier);
        let mut inner = self.shared.lock();
        if inner.shut_down || inner.state.speed_multiplier == speed {
            return speed;
        }
        inner.state.speed_multiplier = speed;
        debug!("speed set to {speed}x");
        self.shared.publish(inner);
        speed
    }

    /// Register a callback run after every state change.
    ///
    /// Callbacks run in transition order, outside the state lock, so a
    /// callback may call back into the sequencer.
    pub fn on_state_change<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&GenerationState) + Send + Sync + 'static,
    {
        let mut inner = self.shared.lock();
        let id = ObserverId(inner.next_observer_id);
        inner.next_observer_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        id
    }

    /// Unregister an observer. Returns `false` if it was not registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut inner = self.shared.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(oid, _)| *oid != id);
        inner.observers.len() != before
    }

    /// Tear down: cancel the pending timer and refuse all further work.
    ///
    /// Observers are dropped without a final notification. Called
    /// automatically on drop.
    pub fn shutdown(&self) {
        let mut inner = self.shared.lock();
        if inner.shut_down {
            return;
        }
        inner.shut_down = true;
        inner.cancel_timer();
        inner.state.is_running = false;
        inner.state.current_sub_step = None;
        inner.observers.clear();
        debug!("sequencer shut down at epoch {}", inner.state.run_epoch);
    }

    /// Check if [`shutdown`](Self::shutdown) has run.
    pub fn is_shut_down(&self) -> bool {
        self.shared.lock().shut_down
    }
}

impl Drop for GenerationSequencer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for GenerationSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationSequencer")
            .field("config", &self.shared.config)
            .field("state", &self.snapshot())
            .finish()
    }
}
