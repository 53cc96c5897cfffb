pub mod dto;
pub mod models;
pub mod nullable;
pub mod service;
pub mod status;
pub mod time;

// Re-export commonly used types
pub use models::{DeletedJob, Job, JobPatch, NewJob};
pub use service::{JobService, ServiceError};
pub use status::JobStatus;
