//! Transient user-facing notifications.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// How long a notice stays visible.
pub const NOTICE_TTL_SECS: i64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message. Notices are never queued; several may be visible at
/// once, each expiring on its own clock.
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
            shown_at: now,
        }
    }

    pub fn error(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at >= Duration::seconds(NOTICE_TTL_SECS)
    }
}
