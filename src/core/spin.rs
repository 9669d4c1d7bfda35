//! # One spin: chase, commit, emphasize, settle.
//!
//! [`SpinRun`] is spawned by the coordinator once the exclusive lock is held and
//! the winner has been drawn. It owns the lock guard, so the lock is released
//! exactly when the run finishes, even if the caller that triggered it is dropped.
//!
//! ## Event flow
//! ```text
//! chase   : set_exclusive(i % N), sleep(base + i·step)      i = 0 .. steps-1
//! commit  : state.winner = w, state.spins += 1         ──► WinnerCommitted
//! flash   : all off, blink w `flash.times` times
//! final   : w lit (hold_winner) or all off
//! settle  : phase = Settled, drop lock, resolve ticket ──► SpinSettled
//! ```
//!
//! ## Rules
//! - The winner is committed **before** the emphasis phase; readers polling the
//!   state during the flash already see it.
//! - Output write faults never abort the run; each publishes `OutputFault`.

use std::sync::Arc;

use tokio::sync::{OwnedMutexGuard, watch};
use tokio::time::{self, Instant};

use super::state::{Outcome, Phase, WheelState};
use crate::events::{Bus, Event, EventKind};
use crate::policies::{FlashPolicy, SpinCadence};
use crate::ring::{OutputRing, SlotFault};

pub(crate) struct SpinRun {
    pub(crate) ring: OwnedMutexGuard<OutputRing>,
    pub(crate) state: Arc<watch::Sender<WheelState>>,
    pub(crate) done: watch::Sender<Option<Outcome>>,
    pub(crate) bus: Bus,
    pub(crate) cadence: SpinCadence,
    pub(crate) flash: FlashPolicy,
    pub(crate) hold_winner: bool,
    pub(crate) winner: usize,
    pub(crate) spin: u64,
}

impl SpinRun {
    pub(crate) async fn run(mut self) -> Outcome {
        let started = Instant::now();
        let slots = self.ring.len();
        let winner = self.winner;

        for round in 0..self.cadence.steps(winner, slots) {
            let res = self.ring.set_exclusive(round as usize % slots);
            self.report(res);
            time::sleep(self.cadence.delay(round)).await;
        }

        self.commit();

        let res = self.ring.clear();
        self.report(res);
        let res = self.ring.flash(winner, &self.flash).await;
        self.report(res);
        let res = if self.hold_winner {
            self.ring.set_exclusive(winner)
        } else {
            self.ring.clear()
        };
        self.report(res);

        self.settle(started)
    }

    fn commit(&self) {
        let (winner, spin) = (self.winner, self.spin);
        self.state.send_modify(|s| {
            s.winner = Some(winner);
            s.spins = spin;
        });
        self.bus.publish(
            Event::new(EventKind::WinnerCommitted)
                .with_spin(spin)
                .with_slot(winner),
        );
    }

    fn settle(self, started: Instant) -> Outcome {
        let SpinRun {
            ring,
            state,
            done,
            bus,
            winner,
            spin,
            ..
        } = self;
        let outcome = Outcome {
            spin,
            winner: Some(winner),
        };

        state.send_modify(|s| s.phase = Phase::Settled);
        drop(ring);
        let _ = done.send(Some(outcome));

        bus.publish(
            Event::new(EventKind::SpinSettled)
                .with_spin(spin)
                .with_slot(winner)
                .with_elapsed(started.elapsed()),
        );
        outcome
    }

    fn report(&self, res: Result<(), SlotFault>) {
        if let Err(fault) = res {
            self.bus.publish(
                Event::new(EventKind::OutputFault)
                    .with_spin(self.spin)
                    .with_slot(fault.slot)
                    .with_reason(fault.error.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::Mutex;

    use super::*;
    use crate::ring::{OutputBank, SimulatedBank};

    const LINES: [u32; 4] = [1, 2, 3, 4];

    fn quick_cadence(rounds: u32) -> SpinCadence {
        SpinCadence {
            rounds,
            base: Duration::from_millis(10),
            step: Duration::from_millis(1),
            ..SpinCadence::default()
        }
    }

    fn quick_flash() -> FlashPolicy {
        FlashPolicy {
            times: 2,
            on: Duration::from_millis(5),
            off: Duration::from_millis(5),
        }
    }

    async fn run_with(bank: Arc<SimulatedBank>, winner: usize, hold_winner: bool) -> (Outcome, WheelState) {
        let ring = OutputRing::acquire(bank, &LINES, "t").expect("acquire");
        let ring = Arc::new(Mutex::new(ring));
        let (state, _) = watch::channel(WheelState::default());
        let state = Arc::new(state);
        let (done, _) = watch::channel(None);

        let run = SpinRun {
            ring: Arc::clone(&ring).lock_owned().await,
            state: state.clone(),
            done,
            bus: Bus::new(16),
            cadence: quick_cadence(6),
            flash: quick_flash(),
            hold_winner,
            winner,
            spin: 1,
        };
        let outcome = run.run().await;
        assert!(ring.try_lock().is_ok(), "lock released after settle");
        let snapshot = state.borrow().clone();
        (outcome, snapshot)
    }

    #[tokio::test(start_paused = true)]
    async fn chase_visits_slots_in_ring_order() {
        let bank = Arc::new(SimulatedBank::new(LINES));
        let (outcome, state) = run_with(bank.clone(), 2, true).await;

        assert_eq!(outcome, Outcome { spin: 1, winner: Some(2) });
        assert_eq!(state.winner(), Some(2));
        assert_eq!(state.spins(), 1);
        assert_eq!(state.state(), crate::SpinState::Settled);

        let lit: Vec<u32> = bank
            .history()
            .into_iter()
            .filter_map(|(line, on)| on.then_some(line))
            .collect();
        // 6 chase steps, 2 flashes of slot 2, then held.
        assert_eq!(lit, vec![1, 2, 3, 4, 1, 2, 3, 3, 3]);
        assert_eq!(bank.lit(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn without_hold_every_slot_ends_dark() {
        let bank = Arc::new(SimulatedBank::new(LINES));
        let (_, state) = run_with(bank.clone(), 0, false).await;
        assert_eq!(state.winner(), Some(0));
        assert!(bank.lit().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn write_faults_are_reported_not_fatal() {
        let bank = Arc::new(SimulatedBank::new(LINES));
        let ring = OutputRing::acquire(bank.clone(), &LINES, "t").expect("acquire");
        bank.release(4);

        let bus = Bus::new(256);
        let mut rx = bus.subscribe();
        let ring = Arc::new(Mutex::new(ring));
        let (state, _) = watch::channel(WheelState::default());
        let (done, mut done_rx) = watch::channel(None);

        let run = SpinRun {
            ring: Arc::clone(&ring).lock_owned().await,
            state: Arc::new(state),
            done,
            bus,
            cadence: quick_cadence(4),
            flash: quick_flash(),
            hold_winner: true,
            winner: 1,
            spin: 7,
        };
        run.run().await;
        assert_eq!(*done_rx.borrow_and_update(), Some(Outcome { spin: 7, winner: Some(1) }));

        let mut faults = 0;
        let mut settled = false;
        while let Ok(ev) = rx.try_recv() {
            match ev.kind {
                EventKind::OutputFault => {
                    assert_eq!(ev.slot, Some(3));
                    faults += 1;
                }
                EventKind::SpinSettled => settled = true,
                _ => {}
            }
        }
        assert!(faults > 0);
        assert!(settled);
    }
}
