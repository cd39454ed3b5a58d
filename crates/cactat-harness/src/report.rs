#![forbid(unsafe_code)]

//! JSONL run log.
//!
//! One JSON object per line:
//!
//! ```text
//! {"event":"start","run_id":"…","suite":"cac-tat","env":{…},"timestamp":"…"}
//! {"event":"case","run_id":"…","name":"…","outcome":"pass","duration_ms":0}
//! {"event":"complete","run_id":"…","outcome":"pass","passed":22,"failed":0,"skipped":1,"total_ms":3}
//! ```
//!
//! Failed cases carry a `detail` message and the form `snapshot` at the time
//! of failure.

use std::io::Write;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};

use crate::config::HarnessConfig;
use crate::suite::{CaseReport, SuiteReport};

// ============================================================================
// Environment Capture
// ============================================================================

/// Settings that affect a run, recorded for reproducibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnv {
    pub fixtures_dir: String,
    pub live_http: bool,
    pub radio_mode: String,
    pub required_trim: bool,
    pub availability_url: String,
    pub git_commit: String,
}

impl RunEnv {
    /// Capture the environment of a run with this configuration.
    #[must_use]
    pub fn capture(config: &HarnessConfig) -> Self {
        Self {
            fixtures_dir: config.fixtures_dir.display().to_string(),
            live_http: config.live_http,
            radio_mode: format!("{:?}", config.form.radio_mode).to_lowercase(),
            required_trim: config.form.required_trims_whitespace,
            availability_url: config.availability.url.clone(),
            git_commit: git_commit(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "fixtures_dir": self.fixtures_dir,
            "live_http": self.live_http,
            "radio_mode": self.radio_mode,
            "required_trim": self.required_trim,
            "availability_url": self.availability_url,
            "git_commit": self.git_commit,
        })
    }
}

fn git_commit() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".into())
}

// ============================================================================
// JSONL Logger
// ============================================================================

/// JSONL event logger for suite runs.
pub struct RunLog {
    writer: Option<Box<dyn Write>>,
    run_id: String,
    start_time: Instant,
    write_failed: bool,
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog")
            .field("enabled", &self.writer.is_some())
            .field("run_id", &self.run_id)
            .field("write_failed", &self.write_failed)
            .finish()
    }
}

impl RunLog {
    /// Log to any writer.
    pub fn new(writer: impl Write + 'static) -> Self {
        Self {
            writer: Some(Box::new(writer)),
            run_id: generate_run_id(),
            start_time: Instant::now(),
            write_failed: false,
        }
    }

    /// A logger that discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            writer: None,
            run_id: generate_run_id(),
            start_time: Instant::now(),
            write_failed: false,
        }
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Whether any event could not be written.
    #[must_use]
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    pub fn log_start(&mut self, suite: &str, env: &RunEnv) {
        let line = json!({
            "event": "start",
            "run_id": self.run_id,
            "suite": suite,
            "env": env.to_json(),
            "timestamp": unix_timestamp(),
        });
        self.write_line(&line);
    }

    pub fn log_case(&mut self, case: &CaseReport) {
        let mut line = json!({
            "event": "case",
            "run_id": self.run_id,
            "name": case.name,
            "outcome": case.outcome.as_str(),
            "duration_ms": case.duration_ms,
        });
        if let Some(detail) = case.outcome.detail() {
            line["detail"] = json!(detail);
        }
        if let Some(snapshot) = &case.snapshot
            && let Ok(value) = serde_json::to_value(snapshot)
        {
            line["snapshot"] = value;
        }
        self.write_line(&line);
    }

    pub fn log_complete(&mut self, report: &SuiteReport) {
        let total_ms = self.start_time.elapsed().as_millis() as u64;
        let line = json!({
            "event": "complete",
            "run_id": self.run_id,
            "outcome": if report.is_success() { "pass" } else { "fail" },
            "passed": report.passed(),
            "failed": report.failed(),
            "skipped": report.skipped(),
            "total_ms": total_ms,
        });
        self.write_line(&line);
    }

    fn write_line(&mut self, line: &Value) {
        let Some(ref mut writer) = self.writer else {
            return;
        };
        let result = writeln!(writer, "{line}").and_then(|()| writer.flush());
        if let Err(err) = result {
            // Warn once; a closed pipe fails every later write too.
            if !self.write_failed {
                tracing::warn!(error = %err, run_id = %self.run_id, "run log write failed");
            }
            self.write_failed = true;
        }
    }
}

fn generate_run_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{timestamp:x}")
}

fn unix_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::CaseOutcome;
    use cactat_core::FormSnapshot;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps everything in a shared buffer.
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    fn case(name: &'static str, outcome: CaseOutcome) -> CaseReport {
        let snapshot = matches!(outcome, CaseOutcome::Fail(_)).then(FormSnapshot::default);
        CaseReport {
            name,
            outcome,
            duration_ms: 1,
            snapshot,
        }
    }

    #[test]
    fn writes_start_case_complete() {
        let buffer = Shared::default();
        let mut log = RunLog::new(buffer.clone());
        let env = RunEnv::capture(&HarnessConfig::default());
        log.log_start("cac-tat", &env);

        let report = SuiteReport {
            cases: vec![
                case("a", CaseOutcome::Pass),
                case("b", CaseOutcome::Fail("b: boom".into())),
                case("c", CaseOutcome::Skip("offline".into())),
            ],
        };
        for c in &report.cases {
            log.log_case(c);
        }
        log.log_complete(&report);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0]["event"], "start");
        assert_eq!(lines[0]["env"]["radio_mode"], "independent");
        assert!(lines.iter().all(|l| l["run_id"] == log.run_id()));

        assert_eq!(lines[1]["outcome"], "pass");
        assert!(lines[1].get("detail").is_none());
        assert_eq!(lines[2]["detail"], "b: boom");
        assert_eq!(lines[2]["snapshot"]["firstName"], "");
        assert_eq!(lines[3]["outcome"], "skip");

        assert_eq!(lines[4]["event"], "complete");
        assert_eq!(lines[4]["outcome"], "fail");
        assert_eq!(lines[4]["passed"], 1);
        assert_eq!(lines[4]["failed"], 1);
        assert_eq!(lines[4]["skipped"], 1);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn failed_writes_are_recorded() {
        let mut log = RunLog::new(ClosedPipe);
        assert!(!log.write_failed());
        log.log_start("cac-tat", &RunEnv::capture(&HarnessConfig::default()));
        assert!(log.write_failed());
        log.log_complete(&SuiteReport::default());
        assert!(log.write_failed());
    }

    #[test]
    fn successful_writes_leave_flag_clear() {
        let mut log = RunLog::new(Shared::default());
        log.log_complete(&SuiteReport::default());
        assert!(!log.write_failed());
    }

    #[test]
    fn noop_log_is_silent() {
        let mut log = RunLog::noop();
        log.log_complete(&SuiteReport::default());
        assert!(!log.run_id().is_empty());
    }
}
