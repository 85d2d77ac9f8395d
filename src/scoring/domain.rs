use serde::{Deserialize, Serialize};

/// Applicant gender, as declared on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Education {
    Graduate,
    NotGraduate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

/// How often the applicant transacts with their bank account.
///
/// Wire values are pinned explicitly because the historical API separates
/// the digit with an underscore (`LESS_THAN_5`, `OVER_5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionFrequency {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "LESS_THAN_5")]
    LessThan5,
    #[serde(rename = "OVER_5")]
    Over5,
}

/// How often the applicant has previously taken loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LendingFrequency {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "LESS_THAN_5")]
    LessThan5,
    #[serde(rename = "OVER_5")]
    Over5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanPurpose {
    BusinessInvestment,
    RentsAndBills,
    CarPurchase,
    BuildingPurchase,
    Education,
    MedicalEmergency,
    Other,
}

/// A loan application as received on the wire. Field names and enum values
/// match the historical API, so existing clients keep working unchanged.
///
/// `credit_history` is the applicant's self-reported claim. It is retained
/// for display compatibility only; the value fed to the classifier is always
/// derived from the behavioral signals (see [`crate::scoring::behavior`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub dependents: u32,
    pub education: Education,
    pub employment_status: EmploymentStatus,
    /// Applicant monthly income, in currency units.
    pub income: f64,
    /// Co-applicant monthly income, in currency units. Zero when absent.
    pub co_applicant_income: f64,
    /// Requested loan amount, in thousands of currency units.
    pub loan_amount: f64,
    /// Loan term, in months.
    pub loan_term: u32,
    pub credit_history: bool,
    pub property_area: PropertyArea,
    #[serde(default)]
    pub bank_transactions: Option<TransactionFrequency>,
    #[serde(default)]
    pub lending_history: Option<LendingFrequency>,
    #[serde(default)]
    pub loan_purpose: Option<LoanPurpose>,
}

impl LoanApplication {
    /// Construction-boundary validation. Must pass before the application is
    /// handed to the decision pipeline: a non-positive amount or income would
    /// make the log-compressed features meaningless.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.income > 0.0) {
            return Err(ValidationError::NonPositiveIncome(self.income));
        }
        if !(self.co_applicant_income >= 0.0) {
            return Err(ValidationError::NegativeCoApplicantIncome(
                self.co_applicant_income,
            ));
        }
        if !(self.loan_amount > 0.0) {
            return Err(ValidationError::NonPositiveLoanAmount(self.loan_amount));
        }
        if self.loan_term == 0 {
            return Err(ValidationError::NonPositiveLoanTerm);
        }
        Ok(())
    }
}

/// Rejection reasons surfaced to the API layer before the core runs.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("income must be greater than zero (got {0})")]
    NonPositiveIncome(f64),
    #[error("co-applicant income must not be negative (got {0})")]
    NegativeCoApplicantIncome(f64),
    #[error("loan amount must be greater than zero (got {0})")]
    NonPositiveLoanAmount(f64),
    #[error("loan term must be greater than zero")]
    NonPositiveLoanTerm,
}

/// Outcome of one eligibility decision. Constructed once per request and
/// never mutated; persistence, if any, is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityDecision {
    pub eligible: bool,
    /// Positive-class probability at the requested amount, in [0, 1].
    pub original_score: f64,
    /// `original_score` as a percentage, rounded to 2 decimals.
    pub eligibility_percentage: f64,
    /// Largest amount (thousands) still scoring at or above the threshold,
    /// rounded to 2 decimals. Zero when no eligible amount was found.
    pub max_eligible_amount: f64,
    /// The requested amount (thousands), echoed back.
    pub requested_amount: f64,
    pub explanation: String,
}
