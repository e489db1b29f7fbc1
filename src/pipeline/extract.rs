use serde_json::Value;

use crate::error::AppError;
use crate::report::{ACTIONS_KEY, MATURITY_KEY, Report};
use crate::telemetry::metrics::REPORT_EXTRACTION_FAILURES;

/// Normalizes the raw payload cell stored by the generation pipeline into a
/// [`Report`].
///
/// The pipeline has shipped the same report under several encodings over
/// time, so the value is sniffed in priority order:
/// 1. a JSON object already carrying both report keys;
/// 2. a JSON string holding the report, possibly inside a ```json fence;
/// 3. an envelope object with the fenced string at `responses[0].output`.
///
/// The first interpretation that yields an object with both required keys
/// wins. Anything else is an extraction error.
#[tracing::instrument(name = "pipeline_stage extract", skip(raw), fields(pipeline.stage = "extract", report.shape))]
pub fn extract_report(raw: &Value) -> Result<Report, AppError> {
    let (shape, accepted) = match sniff(raw) {
        Some(found) => found,
        None => {
            REPORT_EXTRACTION_FAILURES.add(1, &[]);
            return Err(AppError::Extraction(format!(
                "no interpretation of the payload contains both '{MATURITY_KEY}' and '{ACTIONS_KEY}'"
            )));
        }
    };

    tracing::Span::current().record("report.shape", shape);

    serde_json::from_value(accepted).map_err(|e| {
        REPORT_EXTRACTION_FAILURES.add(1, &[]);
        AppError::Extraction(format!("payload has the report keys but an unusable shape: {e}"))
    })
}

fn sniff(raw: &Value) -> Option<(&'static str, Value)> {
    if has_report_keys(raw) {
        return Some(("direct", raw.clone()));
    }

    if let Some(parsed) = clean_and_parse(raw) {
        if has_report_keys(&parsed) {
            return Some(("inline_string", parsed));
        }
        tracing::debug!("inline string parsed but lacks the report keys");
    }

    if let Some(output) = raw.pointer("/responses/0/output") {
        match clean_and_parse(output) {
            Some(parsed) if has_report_keys(&parsed) => {
                return Some(("nested_output", parsed));
            }
            Some(_) => tracing::debug!("responses[0].output parsed but lacks the report keys"),
            None => tracing::debug!("responses[0].output is not a parseable JSON string"),
        }
    }

    None
}

fn has_report_keys(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key(MATURITY_KEY) && map.contains_key(ACTIONS_KEY))
}

/// Strips a markdown code fence and copy-paste artifacts from a candidate
/// string, then parses it as JSON. Non-strings and unparseable strings both
/// come back as `None` so the caller can try the next shape.
fn clean_and_parse(candidate: &Value) -> Option<Value> {
    let raw = candidate.as_str()?;

    let inner = raw
        .strip_prefix("```json")
        .map(str::trim_start)
        .unwrap_or(raw);
    let inner = inner.strip_suffix("```").map(str::trim_end).unwrap_or(inner);

    // Non-breaking spaces show up in payloads pasted through rich-text
    // editors and break an otherwise valid document.
    let cleaned = inner.replace('\u{00A0}', " ");

    serde_json::from_str(&cleaned).ok()
}
