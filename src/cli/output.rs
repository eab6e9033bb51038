//! CLI output formatting.

use crate::orchestrator::{Frame, RenderRequest};

/// Rank the algorithms in `frame` by distance, shortest first.
///
/// Algorithms with no result yet are listed last.
#[must_use]
pub fn format_summary(frame: &Frame) -> String {
    let mut ranked: Vec<&RenderRequest> = frame.requests.iter().collect();
    ranked.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut summary = format!("Summary after {} ticks\n", frame.tick);
    for (rank, request) in ranked.iter().enumerate() {
        let distance = request
            .distance
            .map_or_else(|| "-".to_string(), |d| format!("{d:.2}"));
        let status = if request.complete { "" } else { " (unfinished)" };
        summary.push_str(&format!(
            "  {}. {:<18} {:>9}{status}\n",
            rank + 1,
            request.label,
            distance
        ));
    }
    summary
}
