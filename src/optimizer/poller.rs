// 实时数据轮询任务
// 以固定间隔拉取电站实时状态，维护共享快照

use crate::optimizer::client::OptimizerClientManager;
use crate::optimizer::models::LiveState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// 实时数据共享状态
///
/// 轮询任务是唯一写入方，任意数量的读取方通过 RwLock 共享访问。
/// 拉取失败时保留上一份快照，只更新错误信息与失败计数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveFeedState {
    /// 最近一次成功获取的快照
    pub snapshot: Option<LiveState>,
    /// 最近一次成功时间
    pub last_success_at: Option<DateTime<Utc>>,
    /// 最近一次失败的错误信息
    pub last_error: Option<String>,
    /// 连续失败次数
    pub consecutive_failures: u32,
    /// 是否尚未完成首次拉取
    pub is_loading: bool,
}

impl Default for LiveFeedState {
    fn default() -> Self {
        Self {
            snapshot: None,
            last_success_at: None,
            last_error: None,
            consecutive_failures: 0,
            is_loading: true,
        }
    }
}

impl LiveFeedState {
    /// 快照是否可用
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// 数据是否过期（距最近成功超过 max_age）
    pub fn is_stale(&self, max_age: Duration) -> bool {
        match self.last_success_at {
            Some(at) => {
                let age = Utc::now() - at;
                age.num_seconds() >= max_age.as_secs() as i64
            }
            None => true,
        }
    }

    /// 记录一次成功
    fn record_success(&mut self, snapshot: LiveState) {
        self.snapshot = Some(snapshot);
        self.last_success_at = Some(Utc::now());
        self.last_error = None;
        self.consecutive_failures = 0;
        self.is_loading = false;
    }

    /// 记录一次失败
    fn record_failure(&mut self, error: String) {
        self.last_error = Some(error);
        self.consecutive_failures += 1;
        self.is_loading = false;
    }
}

/// 实时数据轮询器
///
/// 单任务循环：tick -> 请求 -> 更新状态。请求在 tick 内同步等待，
/// 因此同一时刻最多只有一个在途请求，不会出现定时器与请求竞争。
pub struct LivePoller {
    manager: Arc<OptimizerClientManager>,
    state: Arc<RwLock<LiveFeedState>>,
    interval: Duration,
}

impl LivePoller {
    /// 创建新的轮询器
    pub fn new(manager: Arc<OptimizerClientManager>, interval_secs: u64) -> Self {
        Self {
            manager,
            state: Arc::new(RwLock::new(LiveFeedState::default())),
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// 获取共享状态句柄
    pub fn state(&self) -> Arc<RwLock<LiveFeedState>> {
        self.state.clone()
    }

    /// 启动后台轮询任务
    pub fn spawn(self) -> (Arc<RwLock<LiveFeedState>>, JoinHandle<()>) {
        let state = self.state.clone();
        let handle = tokio::spawn(self.run());
        (state, handle)
    }

    /// 轮询主循环
    #[instrument(skip(self), fields(interval_secs = self.interval.as_secs()))]
    async fn run(self) {
        info!("实时数据轮询启动");

        let mut ticker = tokio::time::interval(self.interval);
        // 请求耗时超过间隔时顺延下一次 tick，而不是补发
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// 执行一次拉取并更新共享状态
    async fn poll_once(&self) {
        let client = self.manager.client();

        match client.live_state().await {
            Ok(snapshot) => {
                debug!(
                    total_power = snapshot.total_power_generated,
                    pressure_alert = snapshot.pressure_alert,
                    "实时快照更新"
                );
                let mut state = self.state.write().await;
                state.record_success(snapshot);
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.record_failure(e.to_string());
                warn!(
                    consecutive_failures = state.consecutive_failures,
                    error = %e,
                    "实时数据拉取失败，保留上一份快照"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::client::MockOptimizerClient;
    use crate::optimizer::client::OptimizerClient;

    fn sample_state() -> LiveState {
        // Mock 客户端的快照形状即上游契约
        futures::executor::block_on(MockOptimizerClient::new().live_state()).unwrap()
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = LiveFeedState::default();
        assert!(state.is_loading);
        assert!(!state.has_snapshot());
        assert!(state.is_stale(Duration::from_secs(10)));
    }

    #[test]
    fn test_success_clears_error_and_failures() {
        let mut state = LiveFeedState::default();
        state.record_failure("连接被拒绝".to_string());
        state.record_failure("连接被拒绝".to_string());
        assert_eq!(state.consecutive_failures, 2);

        state.record_success(sample_state());
        assert!(state.has_snapshot());
        assert_eq!(state.consecutive_failures, 0);
        assert!(state.last_error.is_none());
        assert!(!state.is_loading);
        assert!(!state.is_stale(Duration::from_secs(10)));
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut state = LiveFeedState::default();
        state.record_success(sample_state());

        state.record_failure("超时".to_string());
        assert!(state.has_snapshot(), "失败不应清空已有快照");
        assert_eq!(state.consecutive_failures, 1);
        assert_eq!(state.last_error.as_deref(), Some("超时"));
    }

    #[tokio::test]
    async fn test_poll_once_updates_state() {
        use crate::config::OptimizerConfig;

        let config = OptimizerConfig {
            base_url: "mock".to_string(),
            timeout: 5,
            retry_attempts: 1,
            poll_interval: 5,
            poll_enabled: true,
        };
        let manager = Arc::new(OptimizerClientManager::new(config).unwrap());
        let poller = LivePoller::new(manager, 5);
        let state = poller.state();

        poller.poll_once().await;

        let state = state.read().await;
        assert!(state.has_snapshot());
        assert!(!state.is_loading);
        assert!(state.last_error.is_none());
    }
}
