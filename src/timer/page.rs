//! Display collaborator: the page elements the countdown reads and writes

/// Id of the element whose text shows the remaining time
pub const TIMER_ELEMENT_ID: &str = "timer";

/// Id of the overlay element whose visibility gates ticking
pub const PAUSE_SCREEN_ID: &str = "pause-screen";

/// State of the pause overlay as seen by the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseScreen {
    /// No overlay element on the page
    Absent,
    /// Overlay present with its `hidden` attribute set
    Hidden,
    /// Overlay present and shown
    Visible,
}

impl PauseScreen {
    /// Whether the overlay suppresses decrementing
    pub fn is_paused(self) -> bool {
        matches!(self, PauseScreen::Visible)
    }
}

/// A page holding elements addressed by id.
///
/// Missing elements are an expected case: writes to them are dropped and
/// reads report absence.
pub trait Page: Send + Sync {
    /// Overwrite the text content of `id`. Returns `false` if no such element exists.
    fn set_text(&self, id: &str, text: &str) -> bool;

    /// The `hidden` attribute of `id`, or `None` if no such element exists.
    fn is_hidden(&self, id: &str) -> Option<bool>;

    /// Current state of the pause overlay
    fn pause_screen(&self) -> PauseScreen {
        match self.is_hidden(PAUSE_SCREEN_ID) {
            None => PauseScreen::Absent,
            Some(true) => PauseScreen::Hidden,
            Some(false) => PauseScreen::Visible,
        }
    }
}

/// Format seconds as zero-padded `MM:SS`. Negative values show as `00:00`.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn minutes_are_not_wrapped_into_hours() {
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn negative_clock_is_clamped() {
        assert_eq!(format_clock(-1), "00:00");
    }

    #[test]
    fn only_a_visible_overlay_pauses() {
        assert!(PauseScreen::Visible.is_paused());
        assert!(!PauseScreen::Hidden.is_paused());
        assert!(!PauseScreen::Absent.is_paused());
    }
}
