/// Default number of slices rasterized at once.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward older slices (start decreases).
    Back,
    /// Toward newer slices (start increases).
    Forward,
}

/// Contiguous range of slice indices currently on screen.
///
/// Invariant: `0 <= start <= max(0, total - size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportWindow {
    start: usize,
    size: usize,
    total: usize,
}

impl ViewportWindow {
    pub fn new(total: usize, size: usize) -> Self {
        Self { start: 0, size: size.max(1), total }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Rows actually drawn: `min(total, size)`.
    pub fn visible_rows(&self) -> usize {
        self.total.min(self.size)
    }

    /// One past the last visible index.
    pub fn end(&self) -> usize {
        self.start + self.visible_rows()
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    fn max_start(&self) -> usize {
        self.total.saturating_sub(self.size)
    }

    fn clamp(&mut self) {
        self.start = self.start.min(self.max_start());
    }

    /// Move by `step` slices (a whole window when `None`). Returns whether
    /// `start` changed.
    pub fn scroll(&mut self, direction: ScrollDirection, step: Option<usize>) -> bool {
        let step = step.unwrap_or(self.size);
        let before = self.start;
        self.start = match direction {
            ScrollDirection::Back => self.start.saturating_sub(step),
            ScrollDirection::Forward => self.start.saturating_add(step),
        };
        self.clamp();
        self.start != before
    }

    /// Shift the window the minimum amount needed to show `index`.
    /// Returns whether `start` changed.
    pub fn ensure_visible(&mut self, index: usize) -> bool {
        let before = self.start;
        if index < self.start {
            self.start = index;
        } else if index >= self.start + self.size {
            self.start = index + 1 - self.size;
        }
        self.clamp();
        self.start != before
    }

    /// Jump so the newest data is in view.
    pub fn show_latest(&mut self) {
        self.start = self.max_start();
    }

    pub fn can_scroll_back(&self) -> bool {
        self.start > 0
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.start + self.size < self.total
    }
}
