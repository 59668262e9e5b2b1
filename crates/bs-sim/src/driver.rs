//! Fixed-period timer driver on tokio.
//!
//! [`drive`] owns the [`Sim`] for the length of a run and fires one tick per
//! `tick_interval_ms`.  Other tasks and threads steer it through a
//! [`ClockHandle`]; commands are drained at the top of every period, before
//! the tick they affect.
//!
//! A late firing is skipped rather than caught up
//! (`MissedTickBehavior::Skip`): a stalled runtime never produces a burst
//! of ticks.
//!
//! The run ends when the clock is stopped, by a command or an observer, or
//! when every handle has been dropped while the clock is not running.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use bs_core::RandomSource;

use crate::{ClockStatus, PositionsObserver, Sim};

/// A request to the timer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClockCommand {
    Start,
    Pause,
    Resume,
    SetSpeed(f64),
    Stop,
}

/// Cloneable remote control for a driven [`Sim`].
#[derive(Clone, Debug)]
pub struct ClockHandle {
    tx: Sender<ClockCommand>,
}

impl ClockHandle {
    /// Queue `command`.  Returns `false` once the driver has gone away.
    pub fn send(&self, command: ClockCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn start(&self) -> bool {
        self.send(ClockCommand::Start)
    }

    pub fn pause(&self) -> bool {
        self.send(ClockCommand::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send(ClockCommand::Resume)
    }

    pub fn set_speed(&self, multiplier: f64) -> bool {
        self.send(ClockCommand::SetSpeed(multiplier))
    }

    pub fn stop(&self) -> bool {
        self.send(ClockCommand::Stop)
    }
}

/// A handle plus the receiver to pass to [`drive`].
pub fn channel() -> (ClockHandle, Receiver<ClockCommand>) {
    let (tx, rx) = unbounded();
    (ClockHandle { tx }, rx)
}

/// Start `sim` and tick it on a fixed period until the run ends.  Calls
/// [`PositionsObserver::on_stopped`] once at the end and returns the number
/// of ticks fired.
pub async fn drive<R, O>(sim: &mut Sim<R>, observer: &mut O, commands: Receiver<ClockCommand>) -> u64
where
    R: RandomSource,
    O: PositionsObserver + ?Sized,
{
    let period = Duration::from_millis(sim.config.tick_interval_ms.max(1));
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of a tokio interval completes immediately.
    timer.tick().await;

    sim.start();
    let mut fired = 0u64;

    loop {
        timer.tick().await;

        let disconnected = apply_pending(sim, &commands);
        if sim.status() == ClockStatus::Stopped {
            break;
        }
        if sim.fire(observer).is_some() {
            fired += 1;
        }
        match sim.status() {
            ClockStatus::Stopped => break,
            ClockStatus::Paused if disconnected => {
                debug!("all clock handles dropped while paused");
                break;
            }
            _ => {}
        }
    }

    let final_tick = sim.current_tick();
    observer.on_stopped(final_tick);
    info!(tick = %final_tick, fired, "timer driver finished");
    fired
}

/// Apply every queued command.  Returns `true` when no handle is left.
fn apply_pending<R: RandomSource>(sim: &mut Sim<R>, commands: &Receiver<ClockCommand>) -> bool {
    loop {
        match commands.try_recv() {
            Ok(command) => apply(sim, command),
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => return true,
        }
    }
}

fn apply<R: RandomSource>(sim: &mut Sim<R>, command: ClockCommand) {
    match command {
        ClockCommand::Start         => { sim.start(); }
        ClockCommand::Pause         => { sim.pause(); }
        ClockCommand::Resume        => { sim.resume(); }
        ClockCommand::SetSpeed(m)   => { sim.set_speed(m); }
        ClockCommand::Stop          => { sim.stop(); }
    }
}
