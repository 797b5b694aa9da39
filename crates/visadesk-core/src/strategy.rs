use std::sync::OnceLock;

use regex::Regex;

use super::state::RouteSelection;
use super::state::StrategyResult;

pub const FALLBACK_NARRATIVE: &str = "Our strategy engine is still analysing this route. Please contact our specialists directly for a detailed roadmap.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("response text is empty")]
    Empty,

    #[error("response holds a status block but no narrative")]
    MissingNarrative,
}

static FENCED_BLOCK: OnceLock<Regex> = OnceLock::new();

fn fenced_block() -> &'static Regex {
    FENCED_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```")
            .unwrap_or_else(|err| panic!("fenced block pattern is invalid: {err}"))
    })
}

pub fn build_prompt(route: &RouteSelection) -> String {
    format!(
        "You are a consultant for an appointment scheduling service. \
Write a brief, professional overview of how a scheduling workflow for travel visa appointments \
from {origin} to {destination} should be organised.\n\
First, output a fenced ```json block with a short technical status object using the keys \
\"route\", \"demand\" (low, medium or high), \"typical_wait\" and \"notes\".\n\
Then, after the block, write a narrative of under 150 words covering document preparation, \
busy periods, and how the team keeps applicants informed.\n\
Format the narrative as professional advice without headings.",
        origin = route.origin.name,
        destination = route.destination.name,
    )
}

/// Splits a raw response into an optional fenced payload and the narrative.
pub fn parse_response(raw: &str) -> Result<StrategyResult, ResponseError> {
    if raw.trim().is_empty() {
        return Err(ResponseError::Empty);
    }

    let Some(captures) = fenced_block().captures(raw) else {
        return Ok(StrategyResult::narrative_only(raw.trim()));
    };
    let (Some(block), Some(inner)) = (captures.get(0), captures.get(1)) else {
        return Ok(StrategyResult::narrative_only(raw.trim()));
    };

    let payload = inner
        .as_str()
        .trim_matches(|c| c == '\n' || c == '\r')
        .to_string();
    let mut narrative = String::with_capacity(raw.len());
    narrative.push_str(&raw[..block.start()]);
    narrative.push_str(&raw[block.end()..]);
    let narrative = narrative.trim().to_string();

    if narrative.is_empty() {
        return Err(ResponseError::MissingNarrative);
    }

    Ok(StrategyResult {
        payload: (!payload.trim().is_empty()).then_some(payload),
        narrative,
    })
}

pub fn fallback_result() -> StrategyResult {
    StrategyResult::narrative_only(FALLBACK_NARRATIVE)
}
