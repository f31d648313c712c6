//! 求解回應解碼

use sched_core::{Result, RunCollection, RunRecord, SchedError, SolverKind};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::transport::TransportResponse;

/// 伺服器未附錯誤訊息時使用
const FALLBACK_FAILURE: &str = "求解服務執行失敗";

/// 回應外層；`preserve_order` 讓 `Map` 保留文件順序
#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    run: Option<Map<String, Value>>,
}

/// 解碼成功回應的 JSON 內容
///
/// 回應中的記錄不帶類型標記，依呼叫的端點附加 `kind`。
/// 沒有任何執行時回傳 [`SchedError::EmptyCollection`]。
pub fn decode_response(kind: SolverKind, body: &str) -> Result<RunCollection> {
    let wire: WireResponse = serde_json::from_str(body)?;

    let runs = wire.run.unwrap_or_default();
    let mut entries = Vec::with_capacity(runs.len());
    for (run_id, value) in runs {
        let record = RunRecord::from_wire(kind, value).map_err(|err| SchedError::InvalidRun {
            run_id: run_id.clone(),
            reason: err.to_string(),
        })?;
        record.validate(&run_id)?;
        entries.push((run_id, record));
    }

    if entries.is_empty() {
        return Err(SchedError::EmptyCollection);
    }

    let collection = RunCollection::from_entries(entries)?;
    tracing::debug!("解碼 {} 筆 {} 執行結果", collection.len(), kind);

    Ok(collection)
}

/// 解讀傳輸回應：非 2xx 時以伺服器文字作為失敗原因
pub fn interpret(kind: SolverKind, response: &TransportResponse) -> Result<RunCollection> {
    if !response.is_success() {
        let reason = response.body.trim();
        let reason = if reason.is_empty() {
            FALLBACK_FAILURE
        } else {
            response.body.as_str()
        };
        return Err(SchedError::Transport(reason.to_string()));
    }
    decode_response(kind, &response.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HILL_BODY: &str = r#"{
        "run": {
            "2": {
                "alokasi_ruangan_awal": {"7601": [{"kode_kelas_kuliah": "A", "hari": "Senin", "waktu_mulai": 7, "waktu_akhir": 9}]},
                "alokasi_ruangan": {"7601": [{"kode_kelas_kuliah": "A", "hari": "Kamis", "waktu_mulai": 10, "waktu_akhir": 12}]},
                "search_time": 0.4,
                "iteration": 12,
                "objective_over_iteration": [20, 15, 11]
            },
            "0": {
                "alokasi_ruangan_awal": {},
                "alokasi_ruangan": {},
                "search_time": 0.2,
                "iteration": 3,
                "objective_over_iteration": [20, 18]
            }
        }
    }"#;

    #[test]
    fn test_decode_keeps_document_order() {
        let collection = decode_response(SolverKind::Hill, HILL_BODY).unwrap();

        assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["2", "0"]);
        assert!(collection.iter().all(|(_, run)| run.kind() == SolverKind::Hill));
    }

    #[test]
    fn test_decode_empty_run_map() {
        let err = decode_response(SolverKind::Genetic, r#"{"run": {}}"#).unwrap_err();
        assert!(matches!(err, SchedError::EmptyCollection));

        let err = decode_response(SolverKind::Genetic, r#"{}"#).unwrap_err();
        assert!(matches!(err, SchedError::EmptyCollection));

        let err = decode_response(SolverKind::Genetic, r#"{"run": null}"#).unwrap_err();
        assert!(matches!(err, SchedError::EmptyCollection));
    }

    #[test]
    fn test_decode_wrong_shape_for_kind() {
        // 爬山法記錄缺少模擬退火必要欄位
        let err = decode_response(SolverKind::Simulated, HILL_BODY).unwrap_err();
        assert!(matches!(err, SchedError::InvalidRun { run_id, .. } if run_id == "2"));
    }

    #[test]
    fn test_decode_not_json() {
        let err = decode_response(SolverKind::Hill, "<html>").unwrap_err();
        assert!(matches!(err, SchedError::Decode(_)));
    }

    #[test]
    fn test_interpret_error_body_verbatim() {
        let response = TransportResponse::new(400, "{\"detail\":\"SKS tidak lebih dari nol\"}");
        let err = interpret(SolverKind::Hill, &response).unwrap_err();

        assert!(matches!(
            err,
            SchedError::Transport(msg) if msg == "{\"detail\":\"SKS tidak lebih dari nol\"}"
        ));
    }

    #[test]
    fn test_interpret_empty_error_body() {
        let err = interpret(SolverKind::Hill, &TransportResponse::new(502, "  ")).unwrap_err();
        assert!(matches!(err, SchedError::Transport(msg) if msg == FALLBACK_FAILURE));
    }

    #[test]
    fn test_interpret_success() {
        let collection = interpret(SolverKind::Hill, &TransportResponse::new(200, HILL_BODY)).unwrap();
        assert_eq!(collection.len(), 2);
    }
}
