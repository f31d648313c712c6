//! # Sched Session
//!
//! 求解請求、回應解碼與結果狀態機

pub mod request;
pub mod response;
pub mod state;
pub mod transport;

// Re-export 主要類型
pub use request::{AlgorithmParams, SolveRequest};
pub use response::{decode_response, interpret};
pub use state::{ReadyState, Session, SessionState};
pub use transport::{SolverTransport, TransportResponse};
