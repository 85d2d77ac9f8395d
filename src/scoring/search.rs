//! Boundary search over loan amounts.
//!
//! Walks the classifier's probability curve in fixed steps from the requested
//! amount to locate the largest amount still at or above the acceptance
//! threshold. The stopping policy is asymmetric on purpose: searching upward
//! keeps the furthest amount before the first failure, searching downward
//! stops on the first success.

use super::classifier::Classifier;
use super::domain::LoanApplication;
use super::features::build_features;
use super::ELIGIBILITY_THRESHOLD;

/// Probe step in thousands of currency units.
const STEP: f64 = 0.1;
/// Hard cap on search probes, bounding a single decision at 1 + 1000
/// classifier calls even when the probability curve never crosses the
/// threshold.
const MAX_PROBES: usize = 1000;

/// Maximum eligible amount (thousands, unrounded) given the verdict at the
/// requested amount. Probes rebuild the feature vector so the probed amount
/// passes through the same log compression as the original request.
pub(crate) fn find_maximum_eligible_amount(
    classifier: &dyn Classifier,
    application: &LoanApplication,
    credit_history_verdict: bool,
    eligible_at_requested: bool,
) -> f64 {
    let requested = application.loan_amount;

    if eligible_at_requested {
        // Increase until the first failing probe; keep the last amount that
        // still passed. Reaching the cap means every probe passed, so the
        // last probed amount is returned.
        let mut current = requested;
        let mut last_eligible = requested;
        for _ in 0..MAX_PROBES {
            current += STEP;
            let features = build_features(application, credit_history_verdict, current);
            if classifier.predict_positive_probability(&features) >= ELIGIBILITY_THRESHOLD {
                last_eligible = current;
            } else {
                break;
            }
        }
        last_eligible
    } else {
        // Decrease toward zero and stop on the first passing probe. Zero is
        // the floor: no probe is issued at or below it.
        let mut current = requested;
        let mut last_eligible = 0.0;
        for _ in 0..MAX_PROBES {
            current -= STEP;
            if current <= 0.0 {
                break;
            }
            let features = build_features(application, credit_history_verdict, current);
            if classifier.predict_positive_probability(&features) >= ELIGIBILITY_THRESHOLD {
                last_eligible = current;
                break;
            }
        }
        last_eligible
    }
}
