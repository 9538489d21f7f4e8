//! Transient success/error banners.

use std::time::Duration;

/// How long a banner stays visible before it is dismissed.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Which banner a notice is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// One banner slot per kind.
///
/// Showing a notice replaces whatever that slot held. Dismissal is by kind,
/// so a dismiss timer started for an older notice also hides a newer one.
#[derive(Debug, Default, Clone)]
pub struct Notices {
    success: Option<Notice>,
    error: Option<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>) {
        *self.slot_mut(kind) = Some(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn dismiss(&mut self, kind: NoticeKind) {
        *self.slot_mut(kind) = None;
    }

    /// Notice currently held in the given slot.
    pub fn get(&self, kind: NoticeKind) -> Option<&Notice> {
        match kind {
            NoticeKind::Success => self.success.as_ref(),
            NoticeKind::Error => self.error.as_ref(),
        }
    }

    /// Message currently visible in the given slot.
    pub fn visible(&self, kind: NoticeKind) -> Option<&str> {
        self.get(kind).map(|notice| notice.message.as_str())
    }

    fn slot_mut(&mut self, kind: NoticeKind) -> &mut Option<Notice> {
        match kind {
            NoticeKind::Success => &mut self.success,
            NoticeKind::Error => &mut self.error,
        }
    }
}
