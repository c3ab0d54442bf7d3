use crate::domain::ports::IdGenerator;
use crate::utils::error::{PlaceError, Result};
use std::sync::atomic::{AtomicI64, Ordering};

/// 以毫秒時間戳為基礎的 id，同一毫秒內連續產生時往上遞增
#[derive(Debug, Default)]
pub struct MonotonicIdGenerator {
    last: AtomicI64,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&self) -> Result<i64> {
        let now = Self::now_millis();
        let next = |last: i64| last.checked_add(1).map(|bumped| now.max(bumped));

        // 更新成功代表 previous + 1 未溢位
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, next)
        {
            Ok(previous) => Ok(now.max(previous + 1)),
            Err(last) => Err(PlaceError::IdSpaceExhausted { last }),
        }
    }

    fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}
