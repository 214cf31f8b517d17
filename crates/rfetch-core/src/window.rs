//! Fetch window type and range planning.

/// A single fetch window: byte range [start, end) (half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl Window {
    /// Length of this window in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// True if the window covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// HTTP Range header value (inclusive end): `bytes=start-(end-1)`.
    pub fn range_header_value(&self) -> String {
        if self.is_empty() {
            "bytes=0-0".to_string()
        } else {
            format!("bytes={}-{}", self.start, self.end - 1)
        }
    }
}

/// Iterator over the contiguous windows that cover `[0, total)` in steps of
/// `chunk_size`, with the last window clipped to `total`.
///
/// This is the one windowing policy used everywhere: each window ends at the
/// absolute next chunk boundary, never at "total remaining length".
#[derive(Debug, Clone)]
pub struct WindowPlan {
    total: u64,
    chunk_size: u64,
    offset: u64,
}

impl WindowPlan {
    /// Plan windows for `total` bytes in chunks of `chunk_size`.
    /// Yields nothing if `total` or `chunk_size` is 0.
    pub fn new(total: u64, chunk_size: u64) -> Self {
        Self {
            total,
            chunk_size,
            offset: 0,
        }
    }

    /// Plan starting at `offset` instead of 0 (used when the first window was
    /// already consumed during length discovery).
    pub fn resume_at(total: u64, chunk_size: u64, offset: u64) -> Self {
        Self {
            total,
            chunk_size,
            offset: offset.min(total),
        }
    }
}

impl Iterator for WindowPlan {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.chunk_size == 0 || self.offset >= self.total {
            return None;
        }
        let start = self.offset;
        let end = start.saturating_add(self.chunk_size).min(self.total);
        self.offset = end;
        Some(Window { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_covers_total_exactly() {
        let windows: Vec<Window> = WindowPlan::new(1000, 250).collect();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], Window { start: 0, end: 250 });
        assert_eq!(windows[3], Window { start: 750, end: 1000 });
        let sum: u64 = windows.iter().map(|w| w.len()).sum();
        assert_eq!(sum, 1000);
    }

    #[test]
    fn plan_clips_last_window() {
        // 150000 bytes in 64 KiB chunks: three windows, last one short.
        let windows: Vec<Window> = WindowPlan::new(150_000, 65_536).collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], Window { start: 0, end: 65_536 });
        assert_eq!(windows[1], Window { start: 65_536, end: 131_072 });
        assert_eq!(windows[2], Window { start: 131_072, end: 150_000 });
    }

    #[test]
    fn plan_windows_are_contiguous() {
        let windows: Vec<Window> = WindowPlan::new(10, 3).collect();
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(windows.last().unwrap().end, 10);
    }

    #[test]
    fn plan_smaller_than_one_chunk() {
        let windows: Vec<Window> = WindowPlan::new(5, 100).collect();
        assert_eq!(windows, vec![Window { start: 0, end: 5 }]);
    }

    #[test]
    fn plan_empty() {
        assert_eq!(WindowPlan::new(0, 100).count(), 0);
        assert_eq!(WindowPlan::new(100, 0).count(), 0);
    }

    #[test]
    fn plan_resume_skips_consumed_prefix() {
        let windows: Vec<Window> = WindowPlan::resume_at(10, 4, 4).collect();
        assert_eq!(
            windows,
            vec![Window { start: 4, end: 8 }, Window { start: 8, end: 10 }]
        );
    }

    #[test]
    fn plan_chunk_size_one() {
        let windows: Vec<Window> = WindowPlan::new(3, 1).collect();
        assert_eq!(windows.len(), 3);
        for w in &windows {
            assert_eq!(w.len(), 1);
        }
    }

    #[test]
    fn window_range_header() {
        let w = Window { start: 0, end: 99 };
        assert_eq!(w.range_header_value(), "bytes=0-98");
        assert_eq!(w.len(), 99);
    }

    #[test]
    fn window_range_header_single_byte() {
        let w = Window { start: 42, end: 43 };
        assert_eq!(w.range_header_value(), "bytes=42-42");
    }
}
