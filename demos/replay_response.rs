//! 重播已儲存的求解回應
//!
//! ```text
//! cargo run --example replay_response -- response.json "Simulated Annealing"
//! ```

use std::path::PathBuf;

use sched::calc::summary::SUMMARY_HEADERS;
use sched::{
    AlgorithmParams, AlgorithmSelection, Day, ProjectionConfig, RunSummary, SchedError, Session,
    SolveRequest, SolverEndpoint, SolverTransport, TransportResponse,
};
use tracing_subscriber::EnvFilter;

/// 從檔案讀取回應內容的傳輸
struct ReplayTransport {
    path: PathBuf,
}

impl SolverTransport for ReplayTransport {
    fn post(&self, request: &SolveRequest) -> sched::Result<TransportResponse> {
        tracing::info!("重播 {} 作為 {} 的回應", self.path.display(), request.url);
        let body = std::fs::read_to_string(&self.path)
            .map_err(|err| SchedError::Transport(err.to_string()))?;
        Ok(TransportResponse::new(200, body))
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    enable_tracing();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: replay_response <response.json> [algorithm]")?;
    let label = args
        .next()
        .unwrap_or_else(|| "Steepest Ascent Hill-Climbing".to_string());

    let selection = AlgorithmSelection::from_label(&label)?;
    let params = AlgorithmParams::for_selection(selection);
    let request = SolveRequest::new(&SolverEndpoint::default(), &params, "{}")?;

    let transport = ReplayTransport {
        path: PathBuf::from(path),
    };
    let mut session = Session::new();
    let ready = session.solve(&transport, &request)?;

    println!("{}", SUMMARY_HEADERS.join(" | "));
    for row in RunSummary::table(ready.runs()) {
        println!("{}", row.cells().join(" | "));
    }
    println!();

    if let Some(metrics) = ready.headline_metrics() {
        for (title, value, suffix) in metrics.display() {
            println!("{title}: {value} {suffix}");
        }
    }

    if let Some((_, after)) = ready.schedule_comparison(ProjectionConfig::default()) {
        println!();
        println!(
            "Room {} ({})",
            ready.selected_room().unwrap_or("-"),
            ready.selected_run_id()
        );
        let header: Vec<&str> = Day::ALL.iter().map(|day| day.as_str()).collect();
        println!("Hour | {}", header.join(" | "));
        for (hour, cells) in after.rows() {
            let cells: Vec<String> = cells.iter().map(|codes| codes.join(",")).collect();
            println!("{hour:>4} | {}", cells.join(" | "));
        }
    }

    Ok(())
}
