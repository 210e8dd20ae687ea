// Public API exports
pub mod clusterer;
pub mod geometry;
pub mod player;
pub mod render;
pub mod session;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use geometry::{Dataset, Point};

pub use clusterer::{
    ClusterConfig, ClusterEngine, ConfigError, InitMethod, Snapshot, StepLog, DEFAULT_MAX_ITERS,
    DEFAULT_TOLERANCE,
};

pub use player::{PlaybackError, PlayerState, StepPlayer};

pub use session::{RunSummary, Session, SessionError};

pub use render::{Frame, JsonLinesSink, RenderSink, TextSink};

pub use settings::Settings;

pub use source::{DatasetSource, UniformSource, DEFAULT_POINT_COUNT};
