pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{GenerationError, GenerationProvider};
pub use providers::TrpcProvider;
pub use types::RequestPayload;
