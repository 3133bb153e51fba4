// ==========================================
// 燃料月报汇总 - 任务调度
// ==========================================
// 职责: 每种报表同一时刻只允许一个任务运行
// 实现: 每类报表一把 tokio::sync::Mutex；任务在 spawn_blocking 中执行并持有锁，
//       同类型重叠请求立即返回 JobAlreadyRunning（不排队）
// ==========================================

use crate::api::error::{ReportError, ReportResult};
use crate::api::report_api::{run_report, RunSummary};
use crate::config::ReportConfig;
use crate::domain::ReportKind;
use crate::progress::ProgressSink;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Clone, Default)]
pub struct ReportJobRunner {
    assay: Arc<Mutex<()>>,
    weighing: Arc<Mutex<()>>,
}

/// 已启动的任务
pub struct ReportJob {
    pub kind: ReportKind,
    handle: JoinHandle<ReportResult<RunSummary>>,
}

impl ReportJob {
    /// 等待任务结束
    pub async fn wait(self) -> ReportResult<RunSummary> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!(kind = %self.kind, error = %e, "任务异常终止");
                Err(ReportError::JobPanicked(e.to_string()))
            }
        }
    }
}

impl ReportJobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, kind: ReportKind) -> &Arc<Mutex<()>> {
        match kind {
            ReportKind::Assay => &self.assay,
            ReportKind::Weighing => &self.weighing,
        }
    }

    /// 该类型是否有任务在运行
    pub fn is_running(&self, kind: ReportKind) -> bool {
        self.lock_for(kind).try_lock().is_err()
    }

    /// 启动任务（必须在 tokio 运行时内调用）
    pub fn spawn(
        &self,
        kind: ReportKind,
        config: ReportConfig,
        sink: Arc<dyn ProgressSink>,
    ) -> ReportResult<ReportJob> {
        let guard = self
            .lock_for(kind)
            .clone()
            .try_lock_owned()
            .map_err(|_| ReportError::JobAlreadyRunning(kind))?;

        info!(kind = %kind, "任务已启动");
        let handle = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            run_report(kind, &config, sink.as_ref())
        });

        Ok(ReportJob { kind, handle })
    }

    /// 启动并等待任务结束
    pub async fn run(
        &self,
        kind: ReportKind,
        config: ReportConfig,
        sink: Arc<dyn ProgressSink>,
    ) -> ReportResult<RunSummary> {
        self.spawn(kind, config, sink)?.wait().await
    }
}
