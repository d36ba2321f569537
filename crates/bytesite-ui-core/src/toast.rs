use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Danger,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }

    pub fn class_name(self) -> String {
        format!("alert alert-{} mt-3", self.as_str())
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "rgba(34,197,94,.15)",
            Self::Danger => "rgba(239,68,68,.15)",
        }
    }
}

pub const TOAST_BORDER: &str = "1px solid rgba(255,255,255,.12)";
pub const TOAST_COLOR: &str = "#e6edf3";
pub const TOAST_ROLE: &str = "alert";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at_ms: u64,
}

/// Live notifications in display order (newest first, since each one is
/// prepended). Nothing is de-duplicated: submitting twice shows two toasts.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    lifetime_ms: u64,
    next_id: u64,
    live: Vec<Toast>,
    shown_total: u64,
}

impl ToastQueue {
    pub fn new(lifetime_ms: u32) -> Self {
        Self {
            lifetime_ms: u64::from(lifetime_ms),
            next_id: 1,
            live: Vec::new(),
            shown_total: 0,
        }
    }

    pub fn lifetime_ms(&self) -> u64 {
        self.lifetime_ms
    }

    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>, now_ms: u64) -> Toast {
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            expires_at_ms: now_ms.saturating_add(self.lifetime_ms),
        };
        self.next_id += 1;
        self.shown_total += 1;
        self.live.insert(0, toast.clone());
        toast
    }

    /// Removes every toast whose lifetime has elapsed at `now_ms`.
    pub fn expire(&mut self, now_ms: u64) -> Vec<u64> {
        let (expired, live): (Vec<Toast>, Vec<Toast>) = std::mem::take(&mut self.live)
            .into_iter()
            .partition(|toast| toast.expires_at_ms <= now_ms);
        self.live = live;
        expired.into_iter().map(|toast| toast.id).collect()
    }

    pub fn live(&self) -> &[Toast] {
        &self.live
    }

    pub fn shown_total(&self) -> u64 {
        self.shown_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_maps_to_alert_classes_and_background() {
        assert_eq!(ToastKind::Success.class_name(), "alert alert-success mt-3");
        assert_eq!(ToastKind::Danger.class_name(), "alert alert-danger mt-3");
        assert_eq!(ToastKind::Success.background(), "rgba(34,197,94,.15)");
        assert_eq!(ToastKind::Danger.background(), "rgba(239,68,68,.15)");
    }

    #[test]
    fn toast_expires_after_lifetime() {
        let mut queue = ToastQueue::new(6_000);
        let toast = queue.show(ToastKind::Success, "saved", 1_000);
        assert_eq!(toast.expires_at_ms, 7_000);
        assert_eq!(queue.expire(6_999), Vec::<u64>::new());
        assert_eq!(queue.live().len(), 1);
        assert_eq!(queue.expire(7_000), vec![toast.id]);
        assert!(queue.live().is_empty());
    }

    #[test]
    fn rapid_submissions_stack_newest_first() {
        let mut queue = ToastQueue::new(6_000);
        let first = queue.show(ToastKind::Success, "one", 0);
        let second = queue.show(ToastKind::Success, "one", 10);
        let ids: Vec<u64> = queue.live().iter().map(|toast| toast.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(queue.expire(6_000), vec![first.id]);
        assert_eq!(queue.expire(6_010), vec![second.id]);
        assert_eq!(queue.expire(6_010), Vec::<u64>::new());
        assert_eq!(queue.shown_total(), 2);
    }
}
