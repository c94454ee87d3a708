use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize)]
pub struct TelemetrySummary {
    pub decisions: DecisionTelemetrySummary,
    pub turns: TurnTelemetrySummary,
    pub event_counts: BTreeMap<String, usize>,
    pub empty_inferences: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct DecisionTelemetrySummary {
    pub count: usize,
    pub avg_score: Option<f64>,
    pub avg_candidates: Option<f64>,
    pub avg_margin: Option<f64>,
    pub kind_counts: BTreeMap<String, usize>,
    pub reason_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Serialize)]
pub struct TurnTelemetrySummary {
    pub count: usize,
    pub avg_elapsed_ms: Option<f64>,
}

#[derive(Debug)]
struct Average {
    sum: f64,
    count: usize,
}

impl Average {
    fn new() -> Self {
        Self { sum: 0.0, count: 0 }
    }

    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Aggregate decision, turn and event telemetry from a JSON-lines log.
pub fn summarise_telemetry(path: &Path) -> Result<TelemetrySummary, TelemetryError> {
    if !path.exists() {
        return Ok(TelemetrySummary::default());
    }

    let file = File::open(path).map_err(|source| TelemetryError::Io {
        context: "opening telemetry log",
        source,
    })?;
    let reader = BufReader::new(file);

    let mut summary = TelemetrySummary::default();
    let mut score_avg = Average::new();
    let mut candidate_avg = Average::new();
    let mut margin_avg = Average::new();
    let mut elapsed_avg = Average::new();

    for line in reader.lines() {
        let line = line.map_err(|source| TelemetryError::Io {
            context: "reading telemetry line",
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let payload: Value = serde_json::from_str(&line)?;
        let target = payload
            .get("target")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let fields = payload
            .get("fields")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        match target {
            "hanabi_bot::decision" => {
                let decisions = &mut summary.decisions;
                decisions.count += 1;

                if let Some(score) = fields.get("score").and_then(Value::as_f64) {
                    score_avg.add(score);
                }
                if let Some(count) = fields.get("candidates").and_then(Value::as_u64) {
                    candidate_avg.add(count as f64);
                }
                // Only scored decisions with a runner-up carry a meaningful margin.
                if let Some(margin) = fields.get("margin").and_then(Value::as_f64) {
                    if fields.get("candidates").and_then(Value::as_u64) > Some(1) {
                        margin_avg.add(margin);
                    }
                }

                *decisions
                    .kind_counts
                    .entry(label(fields.get("kind")))
                    .or_insert(0) += 1;
                *decisions
                    .reason_counts
                    .entry(label(fields.get("reason")))
                    .or_insert(0) += 1;
            }
            "hanabi_bench::turn" => {
                summary.turns.count += 1;
                if let Some(elapsed) = fields.get("elapsed_ms").and_then(Value::as_f64) {
                    elapsed_avg.add(elapsed);
                }
            }
            "hanabi_bench::event" => {
                let name = fields
                    .get("payload")
                    .and_then(Value::as_str)
                    .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
                    .and_then(|event| event.get("event").and_then(Value::as_str).map(str::to_string))
                    .unwrap_or_else(|| "<unset>".to_string());
                *summary.event_counts.entry(name).or_insert(0) += 1;
            }
            "hanabi_bot::inference" => summary.empty_inferences += 1,
            _ => {}
        }
    }

    summary.decisions.avg_score = score_avg.mean();
    summary.decisions.avg_candidates = candidate_avg.mean();
    summary.decisions.avg_margin = margin_avg.mean();
    summary.turns.avg_elapsed_ms = elapsed_avg.mean();

    Ok(summary)
}

fn label(raw: Option<&Value>) -> String {
    raw.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("<unset>")
        .to_string()
}

pub fn write_summary_outputs(
    telemetry_path: &Path,
    output_dir: &Path,
) -> Result<Option<TelemetryOutputs>, TelemetryError> {
    if !telemetry_path.exists() {
        return Ok(None);
    }

    let summary = summarise_telemetry(telemetry_path)?;
    let json_path = output_dir.join("telemetry_summary.json");
    let md_path = output_dir.join("telemetry_summary.md");

    std::fs::write(
        &json_path,
        serde_json::to_vec_pretty(&summary).map_err(TelemetryError::from)?,
    )
    .map_err(|source| TelemetryError::Io {
        context: "writing telemetry summary json",
        source,
    })?;

    let markdown = render_markdown(&summary, telemetry_path);
    std::fs::write(&md_path, markdown).map_err(|source| TelemetryError::Io {
        context: "writing telemetry summary markdown",
        source,
    })?;

    Ok(Some(TelemetryOutputs {
        summary,
        json_path,
        markdown_path: md_path,
    }))
}

pub fn append_highlights_to_markdown(
    summary_path: &Path,
    outputs: &TelemetryOutputs,
) -> Result<(), TelemetryError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(summary_path)
        .map_err(|source| TelemetryError::Io {
            context: "opening summary markdown for telemetry append",
            source,
        })?;

    let mut section = String::new();
    section.push_str("\n## Telemetry Highlights\n");
    let decisions = &outputs.summary.decisions;
    section.push_str(&format!("- Decisions captured: {}\n", decisions.count));
    if let Some(value) = decisions.avg_score {
        section.push_str(&format!("- Avg chosen score: {:.3}\n", value));
    }
    if let Some(value) = decisions.avg_candidates {
        section.push_str(&format!("- Avg candidates evaluated: {:.2}\n", value));
    }
    if let Some(value) = decisions.avg_margin {
        section.push_str(&format!("- Avg best vs next margin: {:.3}\n", value));
    }
    if let Some(value) = outputs.summary.turns.avg_elapsed_ms {
        section.push_str(&format!("- Avg ms per turn: {:.3}\n", value));
    }
    if outputs.summary.empty_inferences > 0 {
        section.push_str(&format!(
            "- Empty possible-card sets: {}\n",
            outputs.summary.empty_inferences
        ));
    }

    section.push_str("\n### Moves Chosen\n");
    if decisions.kind_counts.is_empty() {
        section.push_str("- <none>\n");
    } else {
        for (label, count) in &decisions.kind_counts {
            section.push_str(&format!("- {}: {}\n", label, count));
        }
    }

    write!(file, "{section}").map_err(|source| TelemetryError::Io {
        context: "writing telemetry highlights",
        source,
    })?;

    Ok(())
}

fn render_markdown(summary: &TelemetrySummary, telemetry_path: &Path) -> String {
    let mut output = String::new();
    output.push_str("# Telemetry Summary\n\n");
    output.push_str(&format!("- Source: `{}`\n", telemetry_path.display()));
    output.push('\n');

    output.push_str("## Decisions\n");
    output.push_str(&format!("- Events: {}\n", summary.decisions.count));
    if let Some(value) = summary.decisions.avg_score {
        output.push_str(&format!("- Avg chosen score: {:.3}\n", value));
    }
    if let Some(value) = summary.decisions.avg_candidates {
        output.push_str(&format!("- Avg candidates: {:.2}\n", value));
    }
    if let Some(value) = summary.decisions.avg_margin {
        output.push_str(&format!("- Avg best vs next margin: {:.3}\n", value));
    }
    for (title, counts) in [
        ("Move kinds", &summary.decisions.kind_counts),
        ("Reasons", &summary.decisions.reason_counts),
    ] {
        if !counts.is_empty() {
            output.push_str(&format!("- {title}:\n"));
            for (label, count) in counts {
                output.push_str(&format!("  - {}: {}\n", label, count));
            }
        }
    }
    output.push('\n');

    output.push_str("## Turns\n");
    output.push_str(&format!("- Timed turns: {}\n", summary.turns.count));
    if let Some(value) = summary.turns.avg_elapsed_ms {
        output.push_str(&format!("- Avg ms per turn: {:.3}\n", value));
    }
    output.push('\n');

    output.push_str("## Game Events\n");
    if summary.event_counts.is_empty() {
        output.push_str("- <none>\n");
    } else {
        for (label, count) in &summary.event_counts {
            output.push_str(&format!("- {}: {}\n", label, count));
        }
    }
    output
}

#[derive(Debug)]
pub struct TelemetryOutputs {
    pub summary: TelemetrySummary,
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    fn write_temp_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write line");
        }
        file
    }

    #[test]
    fn summarises_decisions_turns_and_events() {
        let lines = vec![
            r#"{"target":"hanabi_bot::decision","fields":{"kind":"play","score":1.0,"candidates":14,"margin":0.5,"reason":"heuristic"}}"#,
            r#"{"target":"hanabi_bot::decision","fields":{"kind":"hint","score":0.2,"candidates":12,"margin":0.1,"reason":"heuristic"}}"#,
            r#"{"target":"hanabi_bot::decision","fields":{"kind":"discard","reason":"easy_first_discard"}}"#,
            r#"{"target":"hanabi_bench::turn","fields":{"elapsed_ms":2.0}}"#,
            r#"{"target":"hanabi_bench::turn","fields":{"elapsed_ms":4.0}}"#,
            r#"{"target":"hanabi_bench::event","fields":{"payload":"{\"event\":\"fuse_lit\",\"fuses_left\":2}"}}"#,
            r#"{"target":"hanabi_bot::inference","fields":{"slot":1}}"#,
        ];
        let file = write_temp_file(&lines);
        let summary = summarise_telemetry(file.path()).expect("summarise");

        assert_eq!(summary.decisions.count, 3);
        assert!((summary.decisions.avg_score.unwrap() - 0.6).abs() < 1e-9);
        assert!((summary.decisions.avg_candidates.unwrap() - 13.0).abs() < 1e-9);
        assert!((summary.decisions.avg_margin.unwrap() - 0.3).abs() < 1e-9);
        assert_eq!(summary.decisions.kind_counts.get("play"), Some(&1));
        assert_eq!(summary.decisions.kind_counts.get("discard"), Some(&1));
        assert_eq!(
            summary.decisions.reason_counts.get("easy_first_discard"),
            Some(&1)
        );
        assert_eq!(summary.turns.count, 2);
        assert_eq!(summary.turns.avg_elapsed_ms, Some(3.0));
        assert_eq!(summary.event_counts.get("fuse_lit"), Some(&1));
        assert_eq!(summary.empty_inferences, 1);
    }

    #[test]
    fn lone_candidates_do_not_count_towards_margin() {
        let lines = vec![
            r#"{"target":"hanabi_bot::decision","fields":{"kind":"play","score":1.0,"candidates":1,"margin":0.0}}"#,
        ];
        let file = write_temp_file(&lines);
        let summary = summarise_telemetry(file.path()).expect("summarise");
        assert_eq!(summary.decisions.count, 1);
        assert!(summary.decisions.avg_margin.is_none());
        assert_eq!(summary.decisions.reason_counts.get("<unset>"), Some(&1));
    }

    #[test]
    fn handles_missing_file() {
        let path = Path::new("tests/does/not/exist.jsonl");
        let summary = summarise_telemetry(path).expect("summarise missing file");
        assert_eq!(summary.decisions.count, 0);
        assert!(summary.decisions.avg_score.is_none());
        assert!(summary.event_counts.is_empty());
    }

    #[test]
    fn appends_highlights_to_summary_markdown() {
        let mut summary_file = tempfile::NamedTempFile::new().expect("summary temp file");
        write!(summary_file, "# Batch Summary\n").expect("seed summary content");
        let telemetry_json = tempfile::NamedTempFile::new().expect("telemetry json temp");
        let telemetry_md = tempfile::NamedTempFile::new().expect("telemetry md temp");

        let mut kinds = BTreeMap::new();
        kinds.insert("play".to_string(), 12);
        kinds.insert("hint".to_string(), 4);

        let outputs = TelemetryOutputs {
            summary: TelemetrySummary {
                decisions: DecisionTelemetrySummary {
                    count: 16,
                    avg_score: Some(0.4),
                    avg_candidates: Some(18.0),
                    avg_margin: Some(0.125),
                    kind_counts: kinds,
                    reason_counts: BTreeMap::new(),
                },
                turns: TurnTelemetrySummary::default(),
                event_counts: BTreeMap::new(),
                empty_inferences: 0,
            },
            json_path: telemetry_json.path().to_path_buf(),
            markdown_path: telemetry_md.path().to_path_buf(),
        };

        append_highlights_to_markdown(summary_file.path(), &outputs).expect("append highlights");

        let contents = std::fs::read_to_string(summary_file.path()).expect("read summary file");
        assert!(contents.contains("## Telemetry Highlights"));
        assert!(contents.contains("Decisions captured: 16"));
        assert!(contents.contains("Avg chosen score: 0.400"));
        assert!(contents.contains("play: 12"));
        assert!(contents.contains("### Moves Chosen"));
        assert!(!contents.contains("Empty possible-card sets"));
    }
}
