use crate::rating_tree::domain::{ArtifactCoordinate, Rating, RatingLabel};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Lowest label that still passes; anything at or below it is a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelThreshold {
    /// Only BAD ratings violate
    Bad,
    /// BAD and MODERATE ratings violate
    Moderate,
}

impl LabelThreshold {
    fn is_tripped_by(self, label: RatingLabel) -> bool {
        match self {
            LabelThreshold::Bad => label == RatingLabel::Bad,
            LabelThreshold::Moderate => {
                matches!(label, RatingLabel::Bad | RatingLabel::Moderate)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelThreshold::Bad => "BAD",
            LabelThreshold::Moderate => "MODERATE",
        }
    }
}

impl FromStr for LabelThreshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BAD" => Ok(LabelThreshold::Bad),
            "MODERATE" => Ok(LabelThreshold::Moderate),
            _ => Err(format!(
                "Invalid rating label threshold: {}. Expected BAD or MODERATE",
                s
            )),
        }
    }
}

impl fmt::Display for LabelThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a rating was judged a violation
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationReason {
    LabelThreshold {
        label: RatingLabel,
        threshold: LabelThreshold,
    },
    ValueBelowThreshold {
        value: f64,
        threshold: f64,
    },
    UnclearLabel,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::LabelThreshold { label, threshold } => write!(
                f,
                "{} rating found but the label threshold is {}",
                label, threshold
            ),
            ViolationReason::ValueBelowThreshold { value, threshold } => write!(
                f,
                "rating score {} is less than the configured threshold {}",
                value, threshold
            ),
            ViolationReason::UnclearLabel => f.write_str("UNCLEAR rating found"),
        }
    }
}

/// Result of evaluating one rating against the policy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDecision {
    pub reasons: Vec<ViolationReason>,
}

impl PolicyDecision {
    pub fn is_violation(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// RatingPolicy decides whether a calculated rating breaks compliance
///
/// Excluded libraries never violate, whatever their rating. For everything
/// else each configured check is applied independently and all tripped checks
/// are reported.
#[derive(Debug, Clone, Default)]
pub struct RatingPolicy {
    excluded_libraries: BTreeSet<ArtifactCoordinate>,
    label_threshold: Option<LabelThreshold>,
    value_threshold: f64,
    fail_on_unclear: bool,
}

impl RatingPolicy {
    /// Creates a policy
    ///
    /// # Arguments
    /// * `excluded_libraries` - Coordinates in either "group:artifact" or "group/artifact" form
    /// * `label_threshold` - Optional label threshold
    /// * `value_threshold` - Ratings with a lower value violate
    /// * `fail_on_unclear` - Whether an UNCLEAR label violates
    pub fn new<S: AsRef<str>>(
        excluded_libraries: &[S],
        label_threshold: Option<LabelThreshold>,
        value_threshold: f64,
        fail_on_unclear: bool,
    ) -> Self {
        Self {
            excluded_libraries: excluded_libraries
                .iter()
                .map(|entry| ArtifactCoordinate::parse(entry.as_ref()))
                .collect(),
            label_threshold,
            value_threshold,
            fail_on_unclear,
        }
    }

    pub fn label_threshold(&self) -> Option<LabelThreshold> {
        self.label_threshold
    }

    pub fn is_excluded(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.excluded_libraries.contains(coordinate)
    }

    pub fn evaluate(&self, coordinate: &ArtifactCoordinate, rating: &Rating) -> PolicyDecision {
        let mut decision = PolicyDecision::default();
        if self.is_excluded(coordinate) {
            return decision;
        }

        if let (Some(threshold), Some(label)) = (self.label_threshold, rating.label) {
            if threshold.is_tripped_by(label) {
                decision
                    .reasons
                    .push(ViolationReason::LabelThreshold { label, threshold });
            }
        }

        if rating.value < self.value_threshold {
            decision.reasons.push(ViolationReason::ValueBelowThreshold {
                value: rating.value,
                threshold: self.value_threshold,
            });
        }

        if self.fail_on_unclear && rating.label == Some(RatingLabel::Unclear) {
            decision.reasons.push(ViolationReason::UnclearLabel);
        }

        decision
    }
}
