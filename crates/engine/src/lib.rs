pub mod classifier;
pub mod detector;
pub mod health;
pub mod state;

pub use classifier::ErrorReport;
pub use detector::{StatusChange, TrackedStatus};
pub use health::RequestHealth;
pub use state::LoopState;
