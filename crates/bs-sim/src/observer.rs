//! "Positions updated" subscribers.
//!
//! After every tick the simulation hands each observer a borrowed view of
//! the whole fleet plus a [`ClockControl`].  Observers may ask the clock to
//! pause or stop through the control; the request is applied once every
//! observer has been notified, never in the middle of a tick.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use tracing::trace;

use bs_core::Tick;
use bs_fleet::{Bus, TickReport};

// ── Event payloads ────────────────────────────────────────────────────────────

/// Borrowed view passed to [`PositionsObserver::on_positions_updated`].
#[derive(Copy, Clone, Debug)]
pub struct PositionsUpdate<'a> {
    /// Ticks completed so far, including this one.
    pub tick:    Tick,
    /// Wall-clock stamp of this tick, Unix milliseconds.
    pub unix_ms: i64,
    pub buses:   &'a [Bus],
    pub report:  TickReport,
}

impl PositionsUpdate<'_> {
    pub fn snapshot(&self) -> PositionsUpdated {
        PositionsUpdated {
            tick:    self.tick,
            unix_ms: self.unix_ms,
            buses:   self.buses.to_vec(),
        }
    }
}

/// Owned copy of a [`PositionsUpdate`], for sending across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionsUpdated {
    pub tick:    Tick,
    pub unix_ms: i64,
    pub buses:   Vec<Bus>,
}

// ── ClockControl ──────────────────────────────────────────────────────────────

/// Requests an observer can make of the clock from inside a notification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockControl {
    pause: bool,
    stop:  bool,
}

impl ClockControl {
    /// Pause after this notification round.  Repeat calls are harmless.
    pub fn pause(&mut self) {
        self.pause = true;
    }

    /// Stop after this notification round.  Wins over `pause`.
    pub fn stop(&mut self) {
        self.stop = true;
    }

    pub fn pause_requested(&self) -> bool {
        self.pause
    }

    pub fn stop_requested(&self) -> bool {
        self.stop
    }

    /// Whether any request would end continuous ticking.
    pub fn halts(&self) -> bool {
        self.pause || self.stop
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Callbacks invoked by the simulation.
///
/// Both methods have no-op defaults so implementors only override what they
/// need.
///
/// # Example — pause when a bus fills up
///
/// ```rust,ignore
/// struct PauseWhenFull;
///
/// impl PositionsObserver for PauseWhenFull {
///     fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, control: &mut ClockControl) {
///         if update.buses.iter().any(|b| b.occupancy == Occupancy::High) {
///             control.pause();
///         }
///     }
/// }
/// ```
pub trait PositionsObserver {
    /// Called once per tick after every bus has moved.
    fn on_positions_updated(&mut self, _update: &PositionsUpdate<'_>, _control: &mut ClockControl) {}

    /// Called once when a driven run ends.
    fn on_stopped(&mut self, _final_tick: Tick) {}
}

impl<O: PositionsObserver + ?Sized> PositionsObserver for &mut O {
    fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, control: &mut ClockControl) {
        (**self).on_positions_updated(update, control);
    }

    fn on_stopped(&mut self, final_tick: Tick) {
        (**self).on_stopped(final_tick);
    }
}

impl<O: PositionsObserver + ?Sized> PositionsObserver for Box<O> {
    fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, control: &mut ClockControl) {
        (**self).on_positions_updated(update, control);
    }

    fn on_stopped(&mut self, final_tick: Tick) {
        (**self).on_stopped(final_tick);
    }
}

/// A [`PositionsObserver`] that does nothing.
pub struct NoopObserver;

impl PositionsObserver for NoopObserver {}

// ── ObserverSet ───────────────────────────────────────────────────────────────

/// Ordered list of subscribers, notified in registration order.  All of
/// them see the same [`ClockControl`].
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn PositionsObserver + Send>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: impl PositionsObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn with(mut self, observer: impl PositionsObserver + Send + 'static) -> Self {
        self.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl PositionsObserver for ObserverSet {
    fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, control: &mut ClockControl) {
        for o in &mut self.observers {
            o.on_positions_updated(update, control);
        }
    }

    fn on_stopped(&mut self, final_tick: Tick) {
        for o in &mut self.observers {
            o.on_stopped(final_tick);
        }
    }
}

// ── ChannelObserver ───────────────────────────────────────────────────────────

/// Forwards an owned copy of every update to a crossbeam channel.
///
/// A dropped receiver is not an error: updates are discarded from then on.
/// On a bounded channel an update that finds the queue full is dropped too,
/// so a slow reader sees gaps rather than stalling the clock.
pub struct ChannelObserver {
    tx: Sender<PositionsUpdated>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<PositionsUpdated>) -> Self {
        Self { tx }
    }

    /// An observer plus the receiving end of a fresh unbounded channel.
    ///
    /// Every update is a full copy of the fleet.  A receiver that is kept
    /// alive but never drained grows the queue by one copy per tick; use
    /// [`bounded`](Self::bounded) when the reader may fall behind.
    pub fn unbounded() -> (Self, Receiver<PositionsUpdated>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }

    /// An observer plus the receiving end of a channel holding at most
    /// `capacity` updates.  Updates beyond that are dropped.
    pub fn bounded(capacity: usize) -> (Self, Receiver<PositionsUpdated>) {
        let (tx, rx) = bounded(capacity);
        (Self::new(tx), rx)
    }
}

impl PositionsObserver for ChannelObserver {
    fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, _control: &mut ClockControl) {
        match self.tx.try_send(update.snapshot()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                trace!(tick = %update.tick, "positions queue full; update dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!(tick = %update.tick, "positions receiver dropped; update discarded");
            }
        }
    }
}
