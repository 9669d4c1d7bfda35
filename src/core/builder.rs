use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{config::WheelConfig, coordinator::SpinCoordinator, roulette::Roulette};
use crate::{
    error::RingError,
    events::{Bus, Event, EventKind},
    ring::{OutputBank, OutputRing},
    selector::{Selector, UniformSelector},
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Roulette`] with optional features.
pub struct RouletteBuilder {
    cfg: WheelConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    selector: Arc<dyn Selector>,
}

impl RouletteBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: WheelConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            selector: Arc::new(UniformSelector),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (claims, spins, faults)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Replaces the default [`UniformSelector`].
    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }

    /// Claims the ring from `bank` and starts the wheel.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// On failure nothing stays claimed, subscribers receive `ClaimFailed`
    /// and the error is returned.
    pub fn build(self, bank: Arc<dyn OutputBank>) -> Result<Arc<Roulette>, RingError> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let host = bank.name();

        let ring = match OutputRing::acquire(bank, &self.cfg.lines, &self.cfg.consumer) {
            Ok(ring) => ring,
            Err(e) => {
                let mut ev = Event::new(EventKind::ClaimFailed)
                    .with_source(host)
                    .with_reason(e.to_string());
                if let RingError::ResourceUnavailable { slot, .. } = &e {
                    ev = ev.with_slot(*slot);
                }
                // Dropping the set lets the workers drain this last event and exit.
                subs.emit(&ev);
                return Err(e);
            }
        };

        let stop = CancellationToken::new();
        let listener = Roulette::subscriber_listener(&bus, subs, stop.clone());
        bus.publish(
            Event::new(EventKind::RingAcquired)
                .with_source(host)
                .with_slot(ring.len()),
        );

        let coordinator = Arc::new(SpinCoordinator::new(ring, self.selector, &self.cfg, bus.clone()));
        Ok(Arc::new(Roulette::new_internal(
            self.cfg,
            bus,
            coordinator,
            listener,
            stop,
        )))
    }
}
