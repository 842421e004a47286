use std::ops::Range;

/// Callback fed with sentinel visibility reports.
pub type VisibilityCallback = Box<dyn FnMut(bool) + Send>;

/// Platform capability behind the scroll sentinel.
pub trait VisibilityCapability {
    fn register_visibility_callback(&mut self, callback: VisibilityCallback);
}

/// Line-based window over the rendered rows.
///
/// The sentinel sits right after the last row. It is reported whenever its
/// visibility changes, and again on every refresh while it stays visible so
/// a trigger held back by a loading list still fires once the list is ready.
pub struct Viewport {
    offset: usize,
    height: usize,
    last_reported: Option<bool>,
    callback: Option<VisibilityCallback>,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
            last_reported: None,
            callback: None,
        }
    }

    pub fn visible_rows(&self, rows: usize) -> Range<usize> {
        self.offset.min(rows)..(self.offset + self.height).min(rows)
    }

    pub fn sentinel_visible(&self, rows: usize) -> bool {
        rows < self.offset + self.height
    }

    pub fn scroll_down(&mut self, by: usize, rows: usize) {
        self.offset = (self.offset + by).min(self.max_offset(rows));
    }

    pub fn scroll_up(&mut self, by: usize) {
        self.offset = self.offset.saturating_sub(by);
    }

    /// Clamps to the current row count and reports sentinel visibility.
    pub fn refresh(&mut self, rows: usize) {
        self.offset = self.offset.min(self.max_offset(rows));
        let visible = self.sentinel_visible(rows);
        if !visible && self.last_reported == Some(false) {
            return;
        }
        self.last_reported = Some(visible);
        if let Some(callback) = self.callback.as_mut() {
            callback(visible);
        }
    }

    /// Furthest scroll that still shows the last row above the sentinel.
    fn max_offset(&self, rows: usize) -> usize {
        rows.saturating_sub(self.height - 1)
    }
}

impl VisibilityCapability for Viewport {
    fn register_visibility_callback(&mut self, callback: VisibilityCallback) {
        self.callback = Some(callback);
        self.last_reported = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording(viewport: &mut Viewport) -> Arc<Mutex<Vec<bool>>> {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink = reports.clone();
        viewport.register_visibility_callback(Box::new(move |visible| {
            sink.lock().unwrap().push(visible);
        }));
        reports
    }

    #[test]
    fn empty_list_shows_sentinel() {
        let mut viewport = Viewport::new(5);
        let reports = recording(&mut viewport);
        viewport.refresh(0);
        assert_eq!(*reports.lock().unwrap(), vec![true]);
        assert_eq!(viewport.visible_rows(0), 0..0);
    }

    #[test]
    fn hidden_sentinel_is_reported_once() {
        let mut viewport = Viewport::new(5);
        let reports = recording(&mut viewport);
        viewport.refresh(10);
        viewport.refresh(10);
        viewport.refresh(12);
        assert_eq!(*reports.lock().unwrap(), vec![false]);
    }

    #[test]
    fn visible_sentinel_is_reported_on_every_refresh() {
        let mut viewport = Viewport::new(5);
        let reports = recording(&mut viewport);
        viewport.refresh(3);
        viewport.refresh(3);
        assert_eq!(*reports.lock().unwrap(), vec![true, true]);
    }

    #[test]
    fn scrolling_to_the_bottom_reveals_sentinel() {
        let mut viewport = Viewport::new(5);
        let reports = recording(&mut viewport);
        viewport.refresh(10);
        viewport.scroll_down(100, 10);
        assert_eq!(viewport.visible_rows(10), 6..10);
        viewport.refresh(10);

        // More rows push the sentinel out of view again.
        viewport.refresh(20);
        assert_eq!(*reports.lock().unwrap(), vec![false, true, false]);
    }

    #[test]
    fn shrinking_list_pulls_the_window_back() {
        let mut viewport = Viewport::new(5);
        viewport.scroll_down(20, 30);
        assert_eq!(viewport.visible_rows(30), 20..25);
        viewport.refresh(4);
        assert_eq!(viewport.visible_rows(4), 0..4);
        viewport.scroll_up(3);
        assert_eq!(viewport.visible_rows(4), 0..4);
    }
}
