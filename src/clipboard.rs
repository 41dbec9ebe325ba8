//! System clipboard access and the transient "copied" indicator.

use std::time::{Duration, Instant};

use arboard::Clipboard;

/// How long the copied check mark stays on after a copy.
pub const COPIED_RESET: Duration = Duration::from_millis(2000);

/// Deadline-owned indicator. A new copy replaces the pending deadline, it is
/// never stacked, so the indicator stays true until exactly `COPIED_RESET`
/// after the latest copy.
#[derive(Debug, Default)]
pub struct CopyIndicator {
    deadline: Option<Instant>,
}

impl CopyIndicator {
    pub fn mark(&mut self, now: Instant) {
        self.deadline = Some(now + COPIED_RESET);
    }

    pub fn active(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now < d)
    }
}

#[derive(Default)]
pub struct ClipboardService {
    indicator: CopyIndicator,
}

impl ClipboardService {
    /// Write `text` to the system clipboard and arm the indicator. Returns
    /// false when the clipboard is unavailable; the indicator is left off and
    /// the cause goes to the diagnostics log.
    pub fn copy(&mut self, text: &str) -> bool {
        match Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => {
                self.indicator.mark(Instant::now());
                true
            }
            Err(e) => {
                tracing::warn!("clipboard write failed: {e}");
                false
            }
        }
    }

    /// Read the system clipboard, for pasting into the focused field.
    pub fn read(&self) -> Option<String> {
        Clipboard::new().and_then(|mut cb| cb.get_text()).ok()
    }

    pub fn copied(&self) -> bool {
        self.indicator.active(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_off_by_default() {
        let ind = CopyIndicator::default();
        assert!(!ind.active(Instant::now()));
    }

    #[test]
    fn test_indicator_on_until_deadline() {
        let mut ind = CopyIndicator::default();
        let t0 = Instant::now();
        ind.mark(t0);

        assert!(ind.active(t0));
        assert!(ind.active(t0 + Duration::from_millis(1999)));
        assert!(!ind.active(t0 + COPIED_RESET));
    }

    #[test]
    fn test_second_copy_replaces_deadline() {
        let mut ind = CopyIndicator::default();
        let t0 = Instant::now();
        ind.mark(t0);
        let t1 = t0 + Duration::from_millis(1500);
        ind.mark(t1);

        // Continuously true through the first deadline and until exactly
        // 2000 ms after the latest copy.
        assert!(ind.active(t0 + Duration::from_millis(1999)));
        assert!(ind.active(t1 + Duration::from_millis(1999)));
        assert!(!ind.active(t1 + COPIED_RESET));
    }
}
