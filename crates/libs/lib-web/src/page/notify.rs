//! # Notifications
//!
//! Transient toasts shown at the bottom of the page. Each toast gets a lifecycle
//! token ([`ToastId`]) so the action that created it can dismiss it later.
//! Toasts with a duration disappear on their own; loading toasts stay until
//! dismissed.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use shared::dto::drop::{NotificationDto, NotificationKind};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifetime of toasts created without an explicit duration.
pub const DEFAULT_TOAST_MS: i64 = 4_000;

/// Lifecycle token of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ToastId(u64);

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToastStyle {
    pub background: &'static str,
    pub color: &'static str,
}

impl ToastStyle {
    pub fn for_kind(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Loading => Self { background: "white", color: "green" },
            NotificationKind::Success => Self { background: "green", color: "white" },
            NotificationKind::Error => Self { background: "red", color: "white" },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: NotificationKind,
    pub message: String,
    pub style: ToastStyle,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Toast {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }

    pub fn to_dto(&self) -> NotificationDto {
        NotificationDto {
            id: self.id.0,
            kind: self.kind,
            message: self.message.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Toast queue of one mounted page.
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indefinite progress toast.
    pub fn loading(&self, message: impl Into<String>) -> ToastId {
        self.push(NotificationKind::Loading, message.into(), None)
    }

    pub fn success(&self, message: impl Into<String>, duration: Duration) -> ToastId {
        self.push(NotificationKind::Success, message.into(), Some(duration))
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.push(
            NotificationKind::Error,
            message.into(),
            Some(Duration::milliseconds(DEFAULT_TOAST_MS)),
        )
    }

    /// Remove a toast. Unknown or already expired ids are ignored.
    pub fn dismiss(&self, id: ToastId) {
        self.toasts.lock().retain(|t| t.id != id);
    }

    /// Toasts still visible now, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Utc::now())
    }

    /// Toasts visible at `now`. Expired toasts are dropped from the queue.
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut toasts = self.toasts.lock();
        toasts.retain(|t| t.is_live(now));
        toasts.clone()
    }

    fn push(&self, kind: NotificationKind, message: String, duration: Option<Duration>) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let toast = Toast {
            id,
            kind,
            message,
            style: ToastStyle::for_kind(kind),
            expires_at: duration.map(|d| Utc::now() + d),
        };
        self.toasts.lock().push(toast);
        id
    }
}
