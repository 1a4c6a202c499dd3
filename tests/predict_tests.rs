//! Prediction pipeline tests: form decoding, validation, feature
//! engineering, and the wire request shape.

use fraudlens::predict::{self, PredictionRequest, TransactionType};

/// A clean form submission as the browser would post it.
const CLEAN_BODY: &str = "transactionType=cashout&amount=1250.50\
&oldbalanceOrg=5000&newbalanceOrig=3749.50\
&oldbalanceDest=100&newbalanceDest=1350.50\
&isCashOut=1&isTransfer=0";

// ---------------------------------------------------------------------------
// Decoding and validation
// ---------------------------------------------------------------------------

#[test]
fn clean_submission_passes_validation() {
    let fields = predict::parse_form(CLEAN_BODY);
    assert!(predict::validate(&fields).is_empty());
}

#[test]
fn empty_submission_reports_every_violation_at_once() {
    let fields = predict::parse_form("");
    let violations = predict::validate(&fields);
    // One for the type and one per required numeric field.
    assert_eq!(violations.len(), 1 + predict::REQUIRED_FIELDS.len());
}

#[test]
fn partial_submission_names_the_missing_fields() {
    let fields = predict::parse_form("transactionType=transfer&amount=10&oldbalanceOrg=50");
    let violations = predict::validate(&fields);
    assert_eq!(violations.len(), 3);
    assert!(violations.iter().any(|v| v.contains("newbalanceOrig")));
    assert!(violations.iter().any(|v| v.contains("oldbalanceDest")));
    assert!(violations.iter().any(|v| v.contains("newbalanceDest")));
}

#[test]
fn whitespace_only_fields_count_as_missing() {
    let fields =
        predict::parse_form("transactionType=payment&amount=%20%20&oldbalanceOrg=1&newbalanceOrig=1&oldbalanceDest=1&newbalanceDest=1");
    let violations = predict::validate(&fields);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].contains("amount"));
}

// ---------------------------------------------------------------------------
// Feature engineering
// ---------------------------------------------------------------------------

#[test]
fn cashout_one_hot_encoding() {
    let fields = predict::parse_form(CLEAN_BODY);
    let req = PredictionRequest::from_form(&fields, TransactionType::CashOut);
    assert_eq!(req.type_cash_out, 1);
    assert_eq!(req.type_debit, 0);
    assert_eq!(req.type_payment, 0);
    assert_eq!(req.type_transfer, 0);
}

#[test]
fn each_type_sets_exactly_one_flag() {
    for (tx, expected) in [
        (TransactionType::CashOut, [1, 0, 0, 0]),
        (TransactionType::Debit, [0, 1, 0, 0]),
        (TransactionType::Payment, [0, 0, 1, 0]),
        (TransactionType::Transfer, [0, 0, 0, 1]),
    ] {
        let req = PredictionRequest::assemble(tx, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            [
                req.type_cash_out,
                req.type_debit,
                req.type_payment,
                req.type_transfer
            ],
            expected
        );
    }
}

#[test]
fn error_balances_are_derived_exactly() {
    let fields = predict::parse_form(CLEAN_BODY);
    let req = PredictionRequest::from_form(&fields, TransactionType::CashOut);
    // errorBalanceOrig = newbalanceOrig + amount - oldbalanceOrg
    assert_eq!(req.error_balance_orig, 3749.50 + 1250.50 - 5000.0);
    // errorBalanceDest = oldbalanceDest + amount - newbalanceDest
    assert_eq!(req.error_balance_dest, 100.0 + 1250.50 - 1350.50);
}

#[test]
fn step_is_fixed_at_one() {
    let fields = predict::parse_form(CLEAN_BODY);
    let req = PredictionRequest::from_form(&fields, TransactionType::CashOut);
    assert_eq!(req.step, 1);
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[test]
fn request_json_matches_the_model_features() {
    let fields = predict::parse_form(CLEAN_BODY);
    let req = PredictionRequest::from_form(&fields, TransactionType::CashOut);
    let json = serde_json::to_value(&req).unwrap();

    assert_eq!(json["amount"], 1250.50);
    assert_eq!(json["oldbalanceOrg"], 5000.0);
    assert_eq!(json["newbalanceOrig"], 3749.50);
    assert_eq!(json["type_CASH_OUT"], 1);
    assert_eq!(json["type_TRANSFER"], 0);
    // Exactly the trained feature set, nothing extra.
    assert_eq!(json.as_object().unwrap().len(), 12);
}
