//! "Press search" nudge shown while the user types an address.
//!
//! Each slot moves `Idle -> Pending(deadline) -> Shown`. Typing restarts the
//! slot's timer, and an explicit search or a dismissal returns it to idle.
//! Only one advisory is visible at a time; a shown advisory hides itself
//! after [`AUTO_HIDE`].
//!
//! Time is always passed in, so the machine never reads a clock itself.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::domain::Slot;

/// How long the user must pause typing before the nudge appears.
pub const SHOW_DELAY: Duration = Duration::from_millis(2000);

/// How long a shown nudge stays visible.
pub const AUTO_HIDE: Duration = Duration::from_millis(5000);

/// Visibility change reported by [`InputAdvisory::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "slot", rename_all = "lowercase")]
pub enum AdvisoryEvent {
    Shown(Slot),
    Hidden(Slot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotTimer {
    Idle,
    Pending(Instant),
}

#[derive(Debug, Clone)]
pub struct InputAdvisory {
    primary: SlotTimer,
    secondary: SlotTimer,
    /// The visible advisory and when it auto-hides.
    shown: Option<(Slot, Instant)>,
    show_delay: Duration,
    auto_hide: Duration,
}

impl Default for InputAdvisory {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAdvisory {
    pub fn new() -> Self {
        Self::with_timings(SHOW_DELAY, AUTO_HIDE)
    }

    pub fn with_timings(show_delay: Duration, auto_hide: Duration) -> Self {
        Self {
            primary: SlotTimer::Idle,
            secondary: SlotTimer::Idle,
            shown: None,
            show_delay,
            auto_hide,
        }
    }

    fn timer_mut(&mut self, slot: Slot) -> &mut SlotTimer {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
        }
    }

    /// The slot whose advisory is currently visible.
    pub fn visible(&self) -> Option<Slot> {
        self.shown.map(|(slot, _)| slot)
    }

    /// Whether a timer is running for `slot`.
    pub fn is_pending(&self, slot: Slot) -> bool {
        let timer = match slot {
            Slot::Primary => self.primary,
            Slot::Secondary => self.secondary,
        };
        matches!(timer, SlotTimer::Pending(_))
    }

    /// Record a keystroke. The slot's advisory is hidden if visible, any
    /// running timer is cancelled and, if the trimmed text is longer than
    /// one character, a new one starts.
    pub fn on_text_change(&mut self, slot: Slot, text: &str, now: Instant) {
        if self.visible() == Some(slot) {
            self.shown = None;
        }
        let deadline = now + self.show_delay;
        *self.timer_mut(slot) = if text.trim().chars().count() > 1 {
            SlotTimer::Pending(deadline)
        } else {
            SlotTimer::Idle
        };
    }

    /// The user ran a search from `slot`: cancel its timer and hide its
    /// advisory.
    pub fn on_search_triggered(&mut self, slot: Slot) {
        *self.timer_mut(slot) = SlotTimer::Idle;
        if self.visible() == Some(slot) {
            self.shown = None;
        }
    }

    /// The user dismissed the visible advisory.
    pub fn on_dismiss(&mut self) {
        if let Some((slot, _)) = self.shown.take() {
            *self.timer_mut(slot) = SlotTimer::Idle;
        }
    }

    /// Fire every timer that has expired by `now`, in deadline order.
    pub fn poll(&mut self, now: Instant) -> Vec<AdvisoryEvent> {
        let mut events = Vec::new();

        while let Some(next) = self.next_due(now) {
            match next {
                Due::Show(slot, at) => {
                    *self.timer_mut(slot) = SlotTimer::Idle;
                    if let Some((previous, _)) = self.shown.take() {
                        events.push(AdvisoryEvent::Hidden(previous));
                    }
                    self.shown = Some((slot, at + self.auto_hide));
                    events.push(AdvisoryEvent::Shown(slot));
                }
                Due::Hide(slot) => {
                    self.shown = None;
                    events.push(AdvisoryEvent::Hidden(slot));
                }
            }
        }

        events
    }

    fn next_due(&self, now: Instant) -> Option<Due> {
        let mut best: Option<(Instant, Due)> = None;
        let mut consider = |at: Instant, due: Due| {
            if at <= now && best.is_none_or(|(b, _)| at < b) {
                best = Some((at, due));
            }
        };

        if let Some((slot, hide_at)) = self.shown {
            consider(hide_at, Due::Hide(slot));
        }
        for (slot, timer) in [(Slot::Primary, self.primary), (Slot::Secondary, self.secondary)] {
            if let SlotTimer::Pending(at) = timer {
                consider(at, Due::Show(slot, at));
            }
        }

        best.map(|(_, due)| due)
    }
}

#[derive(Debug, Clone, Copy)]
enum Due {
    Show(Slot, Instant),
    Hide(Slot),
}
