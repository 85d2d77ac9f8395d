//! Classifier capability and the fitted logistic-regression implementation.
//!
//! The decision engine only depends on the [`Classifier`] trait; the concrete
//! model, its parameter file, and its lifecycle belong to the surrounding
//! application (loaded once at startup, shared read-only across requests).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Injected prediction capability: positive-class probability in [0, 1] for
/// one feature record. Implementations must be deterministic for a given
/// input and safe to share across concurrent decisions.
pub trait Classifier: Send + Sync {
    fn predict_positive_probability(&self, features: &FeatureVector) -> f64;
}

/// Fitted logistic-regression parameters, keyed by feature name so the
/// parameter file never encodes the positional column contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCoefficients {
    pub gender: f64,
    pub married: f64,
    pub dependents: f64,
    pub education: f64,
    pub self_employed: f64,
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    pub loan_term: f64,
    pub credit_history: f64,
    pub property_area: f64,
}

impl ModelCoefficients {
    fn as_row(&self) -> [f64; super::features::MODEL_INPUT_WIDTH] {
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

/// Logistic-regression classifier over the fixed feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: ModelCoefficients,
}

impl LogisticModel {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        serde_json::from_reader(BufReader::new(reader)).map_err(ModelError::Parse)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl Classifier for LogisticModel {
    fn predict_positive_probability(&self, features: &FeatureVector) -> f64 {
        let row = features.to_model_row();
        let weights = self.coefficients.as_row();
        let logit = self.intercept
            + row
                .iter()
                .zip(weights.iter())
                .map(|(x, w)| x * w)
                .sum::<f64>();
        sigmoid(logit)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Raised while loading the fitted parameters at startup.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unable to open model file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("unable to parse model parameters: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::build_features;
    use crate::scoring::domain::{
        Education, EmploymentStatus, Gender, LoanApplication, MaritalStatus, PropertyArea,
    };

    fn flat_model(loan_amount_weight: f64) -> LogisticModel {
        LogisticModel {
            intercept: 0.0,
            coefficients: ModelCoefficients {
                gender: 0.0,
                married: 0.0,
                dependents: 0.0,
                education: 0.0,
                self_employed: 0.0,
                applicant_income: 0.0,
                coapplicant_income: 0.0,
                loan_amount: loan_amount_weight,
                loan_term: 0.0,
                credit_history: 0.0,
                property_area: 0.0,
            },
        }
    }

    fn application() -> LoanApplication {
        LoanApplication {
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            dependents: 0,
            education: Education::Graduate,
            employment_status: EmploymentStatus::Employed,
            income: 4000.0,
            co_applicant_income: 1500.0,
            loan_amount: 120.0,
            loan_term: 360,
            credit_history: false,
            property_area: PropertyArea::Urban,
            bank_transactions: None,
            lending_history: None,
            loan_purpose: None,
        }
    }

    #[test]
    fn parameter_file_round_trips() {
        let raw = r#"{
            "intercept": -1.25,
            "coefficients": {
                "gender": 0.02,
                "married": 0.21,
                "dependents": -0.05,
                "education": 0.33,
                "self_employed": -0.11,
                "applicant_income": 0.74,
                "coapplicant_income": 0.18,
                "loan_amount": -0.92,
                "loan_term": -0.14,
                "credit_history": 2.6,
                "property_area": 0.09
            }
        }"#;
        let model = LogisticModel::from_reader(raw.as_bytes()).expect("parses");
        assert_eq!(model.intercept, -1.25);
        assert_eq!(model.coefficients.credit_history, 2.6);

        let serialized = serde_json::to_string(&model).expect("serializes");
        let reparsed = LogisticModel::from_reader(serialized.as_bytes()).expect("reparses");
        assert_eq!(model, reparsed);
    }

    #[test]
    fn rejects_incomplete_coefficients() {
        let raw = r#"{ "intercept": 0.0, "coefficients": { "gender": 1.0 } }"#;
        assert!(matches!(
            LogisticModel::from_reader(raw.as_bytes()),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn probabilities_stay_in_the_open_unit_interval() {
        let model = flat_model(-0.9);
        let features = build_features(&application(), true, 120.0);
        let probability = model.predict_positive_probability(&features);
        assert!(probability > 0.0 && probability < 1.0);
    }

    #[test]
    fn negative_amount_weight_makes_probability_decrease_in_amount() {
        let model = flat_model(-0.9);
        let application = application();
        let low = model.predict_positive_probability(&build_features(&application, true, 50.0));
        let high = model.predict_positive_probability(&build_features(&application, true, 500.0));
        assert!(low > high);
    }

    #[test]
    fn zero_logit_scores_exactly_one_half() {
        let model = flat_model(0.0);
        let features = build_features(&application(), true, 120.0);
        assert_eq!(model.predict_positive_probability(&features), 0.5);
    }
}
