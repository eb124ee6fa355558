//! Batch progress reporting.
//!
//! Reports observable progress during `nlk batch` so long runs show how
//! many queries are done and how many failed. Progress is emitted on
//! **stderr** so stdout remains parseable (one JSON result per line).

use std::io::Write;

/// A single progress event for a batch run.
#[derive(Clone, Debug)]
pub enum BatchProgressEvent {
    /// n queries retrieved out of total, with the running failure count.
    Retrieved { n: u64, total: u64, failed: u64 },
}

/// Reports batch progress. Implementations write to stderr (human or JSON).
pub trait BatchProgressReporter: Send + Sync {
    /// Emit a progress event. Called once per completed query.
    fn report(&self, event: BatchProgressEvent);
}

/// Human-friendly progress on stderr: "batch  retrieved  1,234 / 5,000 queries".
pub struct StderrProgress;

impl BatchProgressReporter for StderrProgress {
    fn report(&self, event: BatchProgressEvent) {
        let BatchProgressEvent::Retrieved { n, total, failed } = &event;
        let line = if *failed > 0 {
            format!(
                "batch  retrieved  {} / {} queries ({} failed)\n",
                format_number(*n),
                format_number(*total),
                format_number(*failed)
            )
        } else {
            format!(
                "batch  retrieved  {} / {} queries\n",
                format_number(*n),
                format_number(*total)
            )
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl BatchProgressReporter for JsonProgress {
    fn report(&self, event: BatchProgressEvent) {
        let BatchProgressEvent::Retrieved { n, total, failed } = &event;
        let obj = serde_json::json!({
            "event": "progress",
            "phase": "retrieving",
            "n": n,
            "total": total,
            "failed": failed
        });
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl BatchProgressReporter for NoProgress {
    fn report(&self, _event: BatchProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode.
    pub fn reporter(&self) -> Box<dyn BatchProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
