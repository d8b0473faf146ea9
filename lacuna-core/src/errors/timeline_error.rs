/// Timeline integration failures. These indicate a wiring bug (provenance
/// for an event the timeline doesn't hold), not a data-quality problem.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("event not found on timeline: {event_id}")]
    EventNotFound { event_id: String },
}
