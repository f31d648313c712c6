//! 求解服務傳輸介面

use sched_core::Result;

use crate::request::SolveRequest;

/// 求解服務的原始回應
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP 狀態碼
    pub status: u16,

    /// 回應內容（成功時為 JSON，失敗時為純文字錯誤訊息）
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx 視為成功
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 求解服務傳輸
///
/// 實際的 HTTP 呼叫由外部提供；網路失敗時回傳 [`sched_core::SchedError::Transport`]。
pub trait SolverTransport {
    /// 以 POST 送出求解請求
    fn post(&self, request: &SolveRequest) -> Result<TransportResponse>;
}
