use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Undrained notices kept at most; the oldest are dropped first.
pub const MAX_PENDING_NOTICES: usize = 32;

/// Toast queue shared by every screen. The host drains and displays it.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.lock().drain(..).collect()
    }

    pub fn pending(&self) -> Vec<Notice> {
        self.lock().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.lock().back().cloned()
    }

    fn push(&self, level: NoticeLevel, message: String) {
        log::debug!("Notice ({:?}): {}", level, message);
        let mut queue = self.lock();
        while queue.len() >= MAX_PENDING_NOTICES {
            queue.pop_front();
        }
        queue.push_back(Notice { level, message });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notice>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
