//! 汇总加载槽位
//!
//! 每个教师一个槽位。每次加载先领取递增的令牌，只有令牌仍是最新的结果才会写入槽位，
//! 较慢返回的旧请求被丢弃。

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::models::recap::LoadState;

#[derive(Debug, Clone)]
struct Slot<T> {
    latest: u64,
    state: LoadState,
    value: Option<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            state: LoadState::Idle,
            value: None,
        }
    }
}

/// 槽位快照
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSnapshot<T> {
    pub token: u64,
    pub state: LoadState,
    pub value: Option<T>,
}

#[derive(Debug)]
pub struct LoadSlots<T> {
    next_token: AtomicU64,
    slots: DashMap<i64, Slot<T>>,
}

impl<T> Default for LoadSlots<T> {
    fn default() -> Self {
        Self {
            next_token: AtomicU64::new(0),
            slots: DashMap::new(),
        }
    }
}

impl<T: Clone> LoadSlots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始加载：idle/ready/empty -> loading，返回本次令牌
    pub fn begin(&self, owner: i64) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        let mut slot = self.slots.entry(owner).or_default();
        slot.latest = token;
        slot.state = LoadState::Loading;
        token
    }

    /// 提交结果：value 为 None 时进入 empty。令牌已过期则丢弃并返回 false
    pub fn complete(&self, owner: i64, token: u64, value: Option<T>) -> bool {
        let Some(mut slot) = self.slots.get_mut(&owner) else {
            return false;
        };
        if slot.latest != token {
            return false;
        }
        slot.state = if value.is_some() {
            LoadState::Ready
        } else {
            LoadState::Empty
        };
        slot.value = value;
        true
    }

    /// 加载失败：若仍是最新请求，回到 idle 并保留旧值
    pub fn abandon(&self, owner: i64, token: u64) {
        if let Some(mut slot) = self.slots.get_mut(&owner) {
            if slot.latest == token {
                slot.state = LoadState::Idle;
            }
        }
    }

    pub fn snapshot(&self, owner: i64) -> SlotSnapshot<T> {
        match self.slots.get(&owner) {
            Some(slot) => SlotSnapshot {
                token: slot.latest,
                state: slot.state,
                value: slot.value.clone(),
            },
            None => SlotSnapshot {
                token: 0,
                state: LoadState::Idle,
                value: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_loading_ready() {
        let slots: LoadSlots<&str> = LoadSlots::new();
        assert_eq!(slots.snapshot(1).state, LoadState::Idle);

        let token = slots.begin(1);
        assert_eq!(slots.snapshot(1).state, LoadState::Loading);

        assert!(slots.complete(1, token, Some("recap")));
        let snapshot = slots.snapshot(1);
        assert_eq!(snapshot.state, LoadState::Ready);
        assert_eq!(snapshot.value, Some("recap"));
        assert_eq!(snapshot.token, token);
    }

    #[test]
    fn test_empty_result() {
        let slots: LoadSlots<u32> = LoadSlots::new();
        let token = slots.begin(1);
        assert!(slots.complete(1, token, None));
        assert_eq!(slots.snapshot(1).state, LoadState::Empty);
    }

    #[test]
    fn test_stale_response_discarded() {
        let slots: LoadSlots<&str> = LoadSlots::new();
        let slow = slots.begin(1);
        let fast = slots.begin(1);
        assert!(fast > slow);

        assert!(slots.complete(1, fast, Some("fresh")));
        assert!(!slots.complete(1, slow, Some("stale")));

        let snapshot = slots.snapshot(1);
        assert_eq!(snapshot.value, Some("fresh"));
        assert_eq!(snapshot.token, fast);
    }

    #[test]
    fn test_stale_response_while_newer_still_loading() {
        let slots: LoadSlots<&str> = LoadSlots::new();
        let slow = slots.begin(1);
        let _pending = slots.begin(1);

        assert!(!slots.complete(1, slow, Some("stale")));
        assert_eq!(slots.snapshot(1).state, LoadState::Loading);
    }

    #[test]
    fn test_owners_are_independent() {
        let slots: LoadSlots<&str> = LoadSlots::new();
        let a = slots.begin(1);
        let b = slots.begin(2);
        assert!(slots.complete(2, b, Some("two")));
        assert!(slots.complete(1, a, None));
        assert_eq!(slots.snapshot(1).state, LoadState::Empty);
        assert_eq!(slots.snapshot(2).value, Some("two"));
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        let slots: LoadSlots<&str> = LoadSlots::new();
        let first = slots.begin(1);
        slots.complete(1, first, Some("old"));
        let second = slots.begin(1);
        slots.abandon(1, second);

        let snapshot = slots.snapshot(1);
        assert_eq!(snapshot.state, LoadState::Idle);
        assert_eq!(snapshot.value, Some("old"));
    }
}
