//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, NaiveTime};

/// Wall-clock format used for chat message timestamps (`HH:MM:SS`).
pub const CHAT_TIME_FORMAT: &str = "%H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current local wall-clock time formatted as `HH:MM:SS`
    fn now_hms(&self) -> String;
}

/// System clock implementation (uses actual local time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_hms(&self) -> String {
        format_hms(Local::now().time())
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: NaiveTime,
}

impl FixedClock {
    /// Create a new fixed clock at the given wall-clock time
    pub fn new(fixed_time: NaiveTime) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock from hour, minute and second
    ///
    /// Returns `None` when the components do not form a valid time.
    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now_hms(&self) -> String {
        format_hms(self.fixed_time)
    }
}

/// Format a time as `HH:MM:SS`, dropping sub-second precision
pub fn format_hms(time: NaiveTime) -> String {
    time.format(CHAT_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_hms_format() {
        // テスト項目: SystemClock が HH:MM:SS 形式の文字列を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let now = clock.now_hms();

        // then (期待する結果):
        assert_eq!(now.len(), 8);
        assert!(NaiveTime::parse_from_str(&now, CHAT_TIME_FORMAT).is_ok());
    }

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock が固定された時刻を返す
        // given (前提条件):
        let clock = FixedClock::from_hms(10, 0, 0).unwrap();

        // when (操作):
        let now = clock.now_hms();

        // then (期待する結果):
        assert_eq!(now, "10:00:00");
    }

    #[test]
    fn test_fixed_clock_returns_consistent_time() {
        // テスト項目: FixedClock が複数回呼び出しても同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::from_hms(23, 59, 7).unwrap();

        // when (操作):
        let first = clock.now_hms();
        let second = clock.now_hms();

        // then (期待する結果):
        assert_eq!(first, "23:59:07");
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_clock_rejects_invalid_time() {
        // テスト項目: 不正な時刻では FixedClock を生成できない
        // given (前提条件):

        // when (操作):
        let clock = FixedClock::from_hms(24, 0, 0);

        // then (期待する結果):
        assert!(clock.is_none());
    }

    #[test]
    fn test_format_hms_drops_subseconds() {
        // テスト項目: ミリ秒以下は切り捨てられる
        // given (前提条件):
        let time = NaiveTime::from_hms_milli_opt(9, 5, 3, 999).unwrap();

        // when (操作):
        let formatted = format_hms(time);

        // then (期待する結果):
        assert_eq!(formatted, "09:05:03");
    }
}
