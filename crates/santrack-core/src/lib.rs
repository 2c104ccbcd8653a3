pub mod checklist;
pub mod inspection;
pub mod scorer;
pub mod weights;

pub use checklist::{Checklist, ChecklistError};
pub use inspection::{PendingInspection, SCORED_STATUS};
pub use scorer::{MAX_RISK_SCORE, MIN_RISK_SCORE, RiskScore, RiskScorer};
pub use weights::{Factor, RiskWeights};
