//! User-facing toasts. A [`Notifier`] is handed to whoever needs one; there
//! is no process-wide channel.

use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => tracing::info!("{}: {}", toast.title, toast.description),
            ToastVariant::Destructive => tracing::warn!("{}: {}", toast.title, toast.description),
        }
    }
}

/// Keeps every toast so a host can render or inspect them later.
#[derive(Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut t| std::mem::take(&mut *t))
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().ok().and_then(|t| t.last().cloned())
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_log_collects_in_order() {
        let log = ToastLog::new();
        log.notify(Toast::success("Success", "Item added successfully"));
        log.notify(Toast::error("Error", "Failed to delete item"));

        assert_eq!(log.last().unwrap().variant, ToastVariant::Destructive);
        let toasts = log.take();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].title, "Success");
        assert!(log.take().is_empty(), "take drains the log");
    }
}
