//! Credit eligibility decision engine.
//!
//! Composition is linear per request: behavioral signals produce a
//! credit-history verdict, the verdict plus the application produce a feature
//! record, and the classifier's probability at the requested amount anchors a
//! boundary search for the maximum eligible amount. Each decision is a pure
//! function of its input and the injected classifier; nothing is shared or
//! mutated across requests.

pub mod behavior;
pub mod classifier;
pub mod domain;
pub mod features;
pub mod router;
mod search;

pub use behavior::assess_credit_history;
pub use classifier::{Classifier, LogisticModel, ModelCoefficients, ModelError};
pub use domain::{EligibilityDecision, LoanApplication, ValidationError};
pub use features::{build_features, FeatureVector};
pub use router::decision_router;

use std::sync::Arc;

use tracing::debug;

/// Fixed acceptance threshold on the positive-class probability.
pub const ELIGIBILITY_THRESHOLD: f64 = 0.5;

/// Stateless decision engine over an injected, possibly absent classifier.
///
/// An engine without a classifier still answers every request: it degrades to
/// a zero-score, zero-ceiling ineligible decision. That output is numerically
/// indistinguishable from a genuine hard rejection, so callers that need to
/// tell the two apart must check [`DecisionEngine::is_ready`] first (the HTTP
/// layer does, answering 503 before `decide` is reached).
pub struct DecisionEngine {
    classifier: Option<Arc<dyn Classifier>>,
}

impl DecisionEngine {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// Engine for a service running without a loaded model.
    pub fn unavailable() -> Self {
        Self { classifier: None }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }

    /// Compute the eligibility decision for one validated application.
    /// Never fails; every path returns a complete decision.
    pub fn decide(&self, application: &LoanApplication) -> EligibilityDecision {
        let requested = application.loan_amount;

        let Some(classifier) = self.classifier.as_deref() else {
            debug!(requested, "no classifier configured, returning degraded decision");
            return EligibilityDecision {
                eligible: false,
                original_score: 0.0,
                eligibility_percentage: 0.0,
                max_eligible_amount: 0.0,
                requested_amount: requested,
                explanation: explain(false, 0.0, requested, 0.0),
            };
        };

        let credit_history_verdict = assess_credit_history(
            application.bank_transactions,
            application.lending_history,
            application.loan_purpose,
        );

        let features = build_features(application, credit_history_verdict, requested);
        let original_score = classifier.predict_positive_probability(&features);
        let eligible = original_score >= ELIGIBILITY_THRESHOLD;

        let max_eligible_amount = round2(search::find_maximum_eligible_amount(
            classifier,
            application,
            credit_history_verdict,
            eligible,
        ));

        debug!(
            requested,
            original_score,
            eligible,
            max_eligible_amount,
            credit_history_verdict,
            "eligibility decision computed"
        );

        EligibilityDecision {
            eligible,
            original_score,
            eligibility_percentage: round2(original_score * 100.0),
            max_eligible_amount,
            requested_amount: requested,
            explanation: explain(eligible, original_score, requested, max_eligible_amount),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Human-readable rationale for a decision. All amounts arrive in thousands
/// and are shown scaled to whole currency units.
fn explain(eligible: bool, original_score: f64, requested: f64, max_eligible: f64) -> String {
    if eligible {
        if max_eligible > requested {
            format!(
                "Congratulations! You are eligible for the requested loan of {}. \
                 You are also eligible for loans up to {}.",
                format_xaf(requested),
                format_xaf(max_eligible)
            )
        } else {
            format!(
                "Congratulations! You are eligible for the requested loan of {}.",
                format_xaf(requested)
            )
        }
    } else if max_eligible > 0.0 {
        format!(
            "You are {:.2}% eligible for the requested loan of {}. \
             However, you are 100% eligible for loans up to {}.",
            original_score * 100.0,
            format_xaf(requested),
            format_xaf(max_eligible)
        )
    } else {
        format!(
            "Unfortunately, you are not eligible for the requested loan of {} based on \
             the current criteria. Please consider improving your financial profile or \
             applying for a smaller amount.",
            format_xaf(requested)
        )
    }
}

/// Render a thousands-denominated amount as whole XAF with digit grouping,
/// e.g. `100.0` becomes `XAF 100,000`.
fn format_xaf(amount_thousands: f64) -> String {
    let units = (amount_thousands * 1000.0).round() as i64;
    format!("XAF {}", group_digits(units))
}

fn group_digits(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
