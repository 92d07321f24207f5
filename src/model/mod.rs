pub mod analysis;
pub mod assessment;
pub mod claim;
pub mod config;
pub mod database;
pub mod reasoning;
pub mod source;

pub use analysis::*;
pub use assessment::*;
pub use claim::*;
pub use config::{Config, TrustConfig};
pub use database::*;
pub use reasoning::{ClaimAnalysis, ExtractedClaimAnalysis, ExtractedTopics};
pub use source::*;
