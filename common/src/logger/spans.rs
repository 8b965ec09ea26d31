use tracing::{Span, field};

use super::TraceId;

/// Create a root span for one replay run / host session.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id,
        instrument = field::Empty
    )
}
