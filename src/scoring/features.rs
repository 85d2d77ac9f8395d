//! Feature transformer.
//!
//! Maps a validated [`LoanApplication`] plus the derived credit-history
//! verdict into the numeric record the classifier was trained on. The
//! categorical encodings and the positional column order are a hard contract
//! with the fitted model: changing either silently corrupts predictions.

use serde::Serialize;

use super::domain::{
    Education, EmploymentStatus, Gender, LoanApplication, MaritalStatus, PropertyArea,
};

/// Number of model inputs, and the length of [`FeatureVector::to_model_row`].
pub const MODEL_INPUT_WIDTH: usize = 11;

/// Named feature record. Keeping the fields named (rather than a bare
/// positional array) confines the fragile column ordering to
/// [`FeatureVector::to_model_row`], the single translation point used at the
/// classifier boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub gender: f64,
    pub married: f64,
    pub dependents: f64,
    pub education: f64,
    pub self_employed: f64,
    /// ln(1 + applicant income).
    pub applicant_income: f64,
    /// ln(1 + co-applicant income).
    pub coapplicant_income: f64,
    /// ln(1 + probed loan amount in thousands).
    pub loan_amount: f64,
    /// ln(1 + term in months).
    pub loan_term: f64,
    pub credit_history: f64,
    pub property_area: f64,
}

impl FeatureVector {
    /// Serialize to the positional order the fitted classifier expects:
    /// Gender, Married, Dependents, Education, Self_Employed,
    /// ApplicantIncome, CoapplicantIncome, LoanAmount, Loan_Amount_Term,
    /// Credit_History, Property_Area.
    pub fn to_model_row(&self) -> [f64; MODEL_INPUT_WIDTH] {
        [
            self.gender,
            self.married,
            self.dependents,
            self.education,
            self.self_employed,
            self.applicant_income,
            self.coapplicant_income,
            self.loan_amount,
            self.loan_term,
            self.credit_history,
            self.property_area,
        ]
    }
}

/// Build the feature record for one probe.
///
/// `probed_amount` is the candidate loan amount under evaluation; during the
/// boundary search it differs from `application.loan_amount`. The caller
/// guarantees it is positive (validation upstream, flooring in the search).
pub fn build_features(
    application: &LoanApplication,
    credit_history_verdict: bool,
    probed_amount: f64,
) -> FeatureVector {
    FeatureVector {
        gender: match application.gender {
            Gender::Male => 1.0,
            _ => 0.0,
        },
        married: match application.marital_status {
            MaritalStatus::Married => 1.0,
            _ => 0.0,
        },
        dependents: f64::from(application.dependents),
        education: match application.education {
            Education::Graduate => 1.0,
            Education::NotGraduate => 0.0,
        },
        self_employed: match application.employment_status {
            EmploymentStatus::SelfEmployed => 1.0,
            _ => 0.0,
        },
        applicant_income: application.income.ln_1p(),
        coapplicant_income: application.co_applicant_income.ln_1p(),
        loan_amount: probed_amount.ln_1p(),
        loan_term: f64::from(application.loan_term).ln_1p(),
        credit_history: if credit_history_verdict { 1.0 } else { 0.0 },
        property_area: match application.property_area {
            PropertyArea::Rural => 0.0,
            PropertyArea::Urban => 1.0,
            PropertyArea::Semiurban => 2.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{
        LendingFrequency, LoanPurpose, TransactionFrequency,
    };

    fn application() -> LoanApplication {
        LoanApplication {
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            dependents: 2,
            education: Education::Graduate,
            employment_status: EmploymentStatus::SelfEmployed,
            income: 5000.0,
            co_applicant_income: 0.0,
            loan_amount: 100.0,
            loan_term: 360,
            credit_history: false,
            property_area: PropertyArea::Semiurban,
            bank_transactions: Some(TransactionFrequency::Over5),
            lending_history: Some(LendingFrequency::LessThan5),
            loan_purpose: Some(LoanPurpose::BusinessInvestment),
        }
    }

    #[test]
    fn categorical_encodings_match_the_training_contract() {
        let features = build_features(&application(), true, 100.0);
        assert_eq!(features.gender, 1.0);
        assert_eq!(features.married, 1.0);
        assert_eq!(features.dependents, 2.0);
        assert_eq!(features.education, 1.0);
        assert_eq!(features.self_employed, 1.0);
        assert_eq!(features.credit_history, 1.0);
        assert_eq!(features.property_area, 2.0);

        let mut rural = application();
        rural.gender = Gender::Female;
        rural.marital_status = MaritalStatus::Single;
        rural.education = Education::NotGraduate;
        rural.employment_status = EmploymentStatus::Employed;
        rural.property_area = PropertyArea::Rural;
        let features = build_features(&rural, false, 100.0);
        assert_eq!(features.gender, 0.0);
        assert_eq!(features.married, 0.0);
        assert_eq!(features.education, 0.0);
        assert_eq!(features.self_employed, 0.0);
        assert_eq!(features.credit_history, 0.0);
        assert_eq!(features.property_area, 0.0);

        let mut urban = application();
        urban.property_area = PropertyArea::Urban;
        assert_eq!(build_features(&urban, true, 100.0).property_area, 1.0);
    }

    #[test]
    fn heavy_tailed_fields_are_log_compressed() {
        let application = application();
        let features = build_features(&application, true, 100.0);
        assert_eq!(features.applicant_income, 5000.0_f64.ln_1p());
        assert_eq!(features.loan_amount, 100.0_f64.ln_1p());
        assert_eq!(features.loan_term, 360.0_f64.ln_1p());
        // ln(1 + 0) = 0 for an absent co-applicant.
        assert_eq!(features.coapplicant_income, 0.0);
    }

    #[test]
    fn probed_amount_replaces_the_requested_amount() {
        let application = application();
        let features = build_features(&application, true, 42.5);
        assert_eq!(features.loan_amount, 42.5_f64.ln_1p());
    }

    #[test]
    fn transform_is_deterministic() {
        let application = application();
        let first = build_features(&application, true, 100.0);
        let second = build_features(&application, true, 100.0);
        assert_eq!(first, second);
        assert_eq!(first.to_model_row(), second.to_model_row());
    }

    #[test]
    fn model_row_preserves_the_column_order() {
        let features = build_features(&application(), true, 100.0);
        let row = features.to_model_row();
        assert_eq!(row.len(), MODEL_INPUT_WIDTH);
        assert_eq!(row[0], features.gender);
        assert_eq!(row[1], features.married);
        assert_eq!(row[2], features.dependents);
        assert_eq!(row[3], features.education);
        assert_eq!(row[4], features.self_employed);
        assert_eq!(row[5], features.applicant_income);
        assert_eq!(row[6], features.coapplicant_income);
        assert_eq!(row[7], features.loan_amount);
        assert_eq!(row[8], features.loan_term);
        assert_eq!(row[9], features.credit_history);
        assert_eq!(row[10], features.property_area);
    }
}
