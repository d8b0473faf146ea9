pub mod event;
pub mod subject;

pub use event::{Event, EventKind};
pub use subject::Timeline;
