//! Local UI chrome state: the transient notice banner.
//!
//! DESIGN
//! ======
//! Keeps user-facing notices out of domain state (`wallet`, `message`) so any
//! flow can raise one without knowing how it is rendered. `notice_seq` lets a
//! delayed auto-dismiss skip a notice that has since been replaced.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// How long a notice stays on screen before auto-dismissing.
pub const NOTICE_TTL_MS: u64 = 6_000;

/// Severity of a notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    #[default]
    Info,
    Warning,
    Error,
}

/// A one-line message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// UI state for the notice banner.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub notice: Option<Notice>,
    pub notice_seq: u64,
}

impl UiState {
    /// Replace the current notice. Returns the sequence number of the new one.
    pub fn show(&mut self, notice: Notice) -> u64 {
        self.notice = Some(notice);
        self.notice_seq += 1;
        self.notice_seq
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }

    /// Dismiss only if notice `seq` is still the one on screen.
    pub fn dismiss_if_current(&mut self, seq: u64) {
        if self.notice_seq == seq {
            self.notice = None;
        }
    }
}
