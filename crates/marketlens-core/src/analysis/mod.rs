//! Analysis domain: modes, requests and responses.

pub mod mode;
pub mod request;
pub mod response;

pub use mode::AnalysisMode;
pub use request::AnalysisRequest;
pub use response::{AnalysisResponse, FALLBACK_TEXT};
