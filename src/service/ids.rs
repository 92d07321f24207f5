//! Claim identifier generation

use uuid::Uuid;

/// Produces identifiers unique within one analysis run
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Wall-clock plus random identifiers, e.g. `claim_1760745600000_1a2b3c4d`
#[derive(Debug, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        format!("claim_{}_{}", millis, &random[..8])
    }
}
