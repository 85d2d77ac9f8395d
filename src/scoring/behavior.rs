//! Behavioral credit scorer.
//!
//! Derives a good/bad credit-history verdict from three optional behavioral
//! signals. This verdict is the only credit-history value the feature
//! pipeline ever sees; the self-reported flag on the application is ignored.

use super::domain::{LendingFrequency, LoanPurpose, TransactionFrequency};

/// Verdict threshold, out of a maximum attainable score of 100 (40 + 35 + 25).
const GOOD_HISTORY_THRESHOLD: u8 = 60;

/// Additive behavioral score out of 100, or `None` when any signal is
/// missing. Missing information is a handled case, not an error.
pub(crate) fn behavioral_score(
    bank_transactions: Option<TransactionFrequency>,
    lending_history: Option<LendingFrequency>,
    loan_purpose: Option<LoanPurpose>,
) -> Option<u8> {
    let (bank_transactions, lending_history, loan_purpose) =
        match (bank_transactions, lending_history, loan_purpose) {
            (Some(bank), Some(lending), Some(purpose)) => (bank, lending, purpose),
            _ => return None,
        };

    let mut score: u8 = 0;

    // Bank transactions (0-40): regular banking activity signals engagement.
    score += match bank_transactions {
        TransactionFrequency::Over5 => 40,
        TransactionFrequency::LessThan5 => 20,
        TransactionFrequency::None => 0,
    };

    // Lending history (0-35): moderate borrowing scores above frequent
    // borrowing, which reads as financial stress. No history scores zero.
    score += match lending_history {
        LendingFrequency::LessThan5 => 35,
        LendingFrequency::Over5 => 15,
        LendingFrequency::None => 0,
    };

    // Loan purpose (0-25): planned investment ranks highest, distress-driven
    // purposes lowest.
    score += match loan_purpose {
        LoanPurpose::BusinessInvestment => 25,
        LoanPurpose::Education => 20,
        LoanPurpose::BuildingPurchase => 18,
        LoanPurpose::CarPurchase => 15,
        LoanPurpose::RentsAndBills => 10,
        LoanPurpose::MedicalEmergency => 8,
        LoanPurpose::Other => 5,
    };

    Some(score)
}

/// Good-credit-history verdict. Any missing signal defaults to `false`.
pub fn assess_credit_history(
    bank_transactions: Option<TransactionFrequency>,
    lending_history: Option<LendingFrequency>,
    loan_purpose: Option<LoanPurpose>,
) -> bool {
    behavioral_score(bank_transactions, lending_history, loan_purpose)
        .map(|score| score >= GOOD_HISTORY_THRESHOLD)
        .unwrap_or(false)
}
