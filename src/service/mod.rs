pub mod analysis;
pub mod assessment;
pub mod claims;
pub mod database;
pub mod health;
pub mod ids;
pub mod inference;
pub mod language;
pub mod rate_limit;
pub mod reasoning;
pub mod sources;

#[cfg(test)]
pub mod testing;

pub use analysis::AnalysisService;
pub use assessment::CredibilityService;
pub use claims::ClaimExtractionService;
pub use database::FactCheckDatabaseService;
pub use reasoning::ReasoningService;
pub use sources::SourceService;
