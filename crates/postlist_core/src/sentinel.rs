/// Scroll sentinel placed after the last row.
///
/// Fires once per stretch of visibility. A stretch that begins while the
/// sentinel is disabled keeps its trigger until the sentinel is enabled
/// again or leaves view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSentinel {
    visible: bool,
    fired: bool,
}

impl ScrollSentinel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Allows one more trigger within the current visibility stretch. Used
    /// when the content above the sentinel was replaced wholesale.
    pub fn rearm(&mut self) {
        self.fired = false;
    }

    /// Feeds a visibility report. Returns `true` when load-more should run.
    pub fn visibility_changed(&mut self, visible: bool, disabled: bool) -> bool {
        if !visible {
            self.visible = false;
            self.fired = false;
            return false;
        }
        self.visible = true;
        self.poll(disabled)
    }

    /// Re-evaluates without a visibility change, e.g. after a load finished.
    pub fn poll(&mut self, disabled: bool) -> bool {
        if !self.visible || self.fired || disabled {
            return false;
        }
        self.fired = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_visibility_period() {
        let mut s = ScrollSentinel::new();
        assert!(s.visibility_changed(true, false));
        assert!(!s.visibility_changed(true, false));
        assert!(!s.poll(false));
        assert!(!s.visibility_changed(false, false));
        assert!(s.visibility_changed(true, false));
    }

    #[test]
    fn disabled_entry_fires_once_enabled() {
        let mut s = ScrollSentinel::new();
        assert!(!s.visibility_changed(true, true));
        assert!(!s.poll(true));
        assert!(s.poll(false));
        assert!(!s.poll(false));
    }

    #[test]
    fn hidden_sentinel_never_fires() {
        let mut s = ScrollSentinel::new();
        assert!(!s.poll(false));
        assert!(!s.visibility_changed(false, false));
    }
}
