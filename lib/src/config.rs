use std::time::Duration;

use crate::constants::DEFAULT_RECEIVE_TIMEOUT_MS;

// 原实现是进程级可变配置，这里改成显式传递

#[derive(Debug, Clone)]
pub struct Config {
    // 每次recv的独立期限
    pub receive_timeout: Duration,
}

impl Config {
    pub fn new(receive_timeout: Duration) -> Self {
        Self { receive_timeout }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_millis(DEFAULT_RECEIVE_TIMEOUT_MS),
        }
    }
}
