pub mod error;
pub mod renderer;
pub mod sanitize;
pub mod scheduler;
pub mod service;

pub use error::AwesomeServiceError;
pub use renderer::ReadmeRenderer;
pub use sanitize::sanitize;
pub use service::{AwesomeService, CycleOutcome};
