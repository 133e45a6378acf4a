//! Hero slider: rotating slide index plus the autoplay timer.

use crate::dom::Element;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const ACTIVE: &str = "active";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDeck {
    len: usize,
    current: usize,
}

impl SlideDeck {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    /// Moves the active marker in `container` so only the current slide
    /// carries it.
    pub fn apply(&self, container: &mut Element) {
        for index in 0..container.count(".hero-slide") {
            if let Some(slide) = container.query_nth_mut(".hero-slide", index) {
                slide.toggle_class(ACTIVE, index == self.current);
            }
        }
    }
}

#[derive(Debug, Default)]
struct SliderState {
    deck: SlideDeck,
    hovered_until: Option<Instant>,
}

impl SliderState {
    fn hovered(&self) -> bool {
        self.hovered_until.map_or(false, |deadline| Instant::now() < deadline)
    }
}

/// Shared slider driven by a single tokio interval task. `start` always
/// aborts the previous task before spawning, so hover toggling never stacks
/// timers.
///
/// A hover is a lease of two intervals: a pointer that never reports leaving
/// pauses autoplay only until the lease runs out and the next `sync`.
#[derive(Debug)]
pub struct HeroSlider {
    state: Arc<Mutex<SliderState>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl HeroSlider {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SliderState::default())),
            timer: Mutex::new(None),
            interval,
        }
    }

    fn state(&self) -> MutexGuard<'_, SliderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn timer(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current(&self) -> usize {
        self.state().deck.current()
    }

    pub fn len(&self) -> usize {
        self.state().deck.len()
    }

    pub fn deck(&self) -> SlideDeck {
        self.state().deck.clone()
    }

    pub fn is_running(&self) -> bool {
        self.timer().as_ref().map_or(false, |h| !h.is_finished())
    }

    /// Adopts the slide count of freshly loaded content. A changed count
    /// restarts from the first slide; autoplay runs whenever there is more
    /// than one slide and the pointer is not over the hero.
    pub fn sync(&self, len: usize) {
        let changed = {
            let mut state = self.state();
            let changed = state.deck.len() != len;
            if changed {
                state.deck = SlideDeck::new(len);
            }
            changed
        };
        if changed {
            tracing::debug!("Hero slider now has {} slide(s)", len);
            self.stop();
        }
        if !self.is_running() {
            self.start();
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.state().hovered()
    }

    pub fn advance(&self) -> usize {
        self.state().deck.advance()
    }

    /// Starts autoplay unless a hover lease is active or there is nothing to
    /// rotate. The lease is checked under the timer lock so a concurrent
    /// `pointer_enter` either sees the new task or prevents it.
    pub fn start(&self) {
        let mut timer = self.timer();
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        {
            let mut state = self.state();
            if state.hovered() {
                return;
            }
            state.hovered_until = None;
            if state.deck.len() <= 1 {
                return;
            }
        }

        let state = Arc::clone(&self.state);
        let period = self.interval;
        *timer = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                state
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .deck
                    .advance();
            }
        }));
    }

    pub fn stop(&self) {
        if let Some(handle) = self.timer().take() {
            handle.abort();
        }
    }

    pub fn pointer_enter(&self) {
        self.state().hovered_until = Some(Instant::now() + self.interval * 2);
        self.stop();
    }

    pub fn pointer_leave(&self) {
        self.state().hovered_until = None;
        self.start();
    }
}

impl Drop for HeroSlider {
    fn drop(&mut self) {
        self.stop();
    }
}
