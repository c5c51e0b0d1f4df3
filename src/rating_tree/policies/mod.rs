mod exclusion_policy;
mod rating_policy;

pub use exclusion_policy::{ExclusionPolicy, DEFAULT_INTERNAL_PREFIXES};
pub use rating_policy::{LabelThreshold, PolicyDecision, RatingPolicy, ViolationReason};
