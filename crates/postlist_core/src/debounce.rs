use std::time::Duration;

/// Default settling delay for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies one scheduled settle timer. Only the newest token settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// A timer the host must start; deliver `token` back when `delay` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTimer {
    pub token: TimerToken,
    pub delay: Duration,
}

/// A raw value plus its debounced ("settled") counterpart.
///
/// Time is external: [`observe`](Debounced::observe) hands out a timer and
/// [`elapsed`](Debounced::elapsed) is called when it fires. A newer observe
/// or a force-settle invalidates every earlier token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    raw: T,
    settled: T,
    pending: Option<TimerToken>,
    delay: Duration,
    issued: u64,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            raw: initial.clone(),
            settled: initial,
            pending: None,
            delay,
            issued: 0,
        }
    }

    /// A fresh holder for `initial` whose tokens continue after this one's,
    /// so timers handed out earlier can never match.
    pub fn successor(&self, initial: T) -> Self {
        Self {
            issued: self.issued,
            ..Self::new(initial, self.delay)
        }
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new raw value and restarts the delay window.
    ///
    /// Returns `None` when `raw` equals the current raw value, in which case
    /// the running window is left untouched.
    pub fn observe(&mut self, raw: T) -> Option<SettleTimer> {
        if raw == self.raw {
            return None;
        }
        self.raw = raw;
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.pending = Some(token);
        Some(SettleTimer {
            token,
            delay: self.delay,
        })
    }

    /// Handles a fired timer. Returns the newly settled value when `token`
    /// is current and settling changed the value.
    pub fn elapsed(&mut self, token: TimerToken) -> Option<T> {
        if self.pending != Some(token) {
            return None;
        }
        self.pending = None;
        if self.settled == self.raw {
            return None;
        }
        self.settled = self.raw.clone();
        Some(self.settled.clone())
    }

    /// Sets raw and settled at once and cancels any pending timer.
    /// Returns `true` when the settled value changed.
    pub fn force_settle(&mut self, value: T) -> bool {
        self.pending = None;
        self.raw = value.clone();
        if self.settled == value {
            return false;
        }
        self.settled = value;
        true
    }
}
