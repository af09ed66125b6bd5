//! Integration tests for the hyperparameter config and error display.

use multiclass_svm::config::SvmConfig;
use multiclass_svm::error::SvmError;

#[test]
fn config_default_values() {
    let c = SvmConfig::default();
    assert_eq!(c.learning_rate, 0.01);
    assert_eq!(c.lambda, 0.01);
    assert_eq!(c.tolerance, 1e-6);
    assert_eq!(c.epochs, 1000);
}

#[test]
fn config_new_stores_values_verbatim() {
    // No range validation: even nonsensical hyperparameters are stored as-is.
    let c = SvmConfig::new(-0.5, 0.0, 0.0, 0);
    assert_eq!(c.learning_rate, -0.5);
    assert_eq!(c.epochs, 0);
}

#[test]
fn error_messages_name_the_offender() {
    let e = SvmError::UnknownLabel("mystery".to_string());
    assert_eq!(format!("{}", e), "label 'mystery' is not in the class list");

    let e = SvmError::ShapeMismatch {
        expected: 4,
        got: 3,
    };
    assert_eq!(format!("{}", e), "expected 4 features per sample, got 3");

    let e = SvmError::LengthMismatch { rows: 5, labels: 4 };
    assert_eq!(format!("{}", e), "got 5 samples but 4 labels");
}
