//! Transaction prediction: form decoding, validation, feature engineering,
//! and the wire request for the scoring endpoint.
//!
//! The dashboard form posts urlencoded fields. Validation is a single pass
//! that collects every violation before anything is reported, then the
//! numeric fields are parsed (defaulting to 0 on failure, matching the
//! upstream's tolerance), two error-balance features are derived, and the
//! transaction type is one-hot encoded into the four flags the model was
//! trained on.

pub mod client;

use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Transaction types
// ---------------------------------------------------------------------------

/// The transaction types the model distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    CashOut,
    Debit,
    Payment,
    Transfer,
}

impl TransactionType {
    /// Parse the form value of the transaction-type select.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cashout" => Some(Self::CashOut),
            "debit" => Some(Self::Debit),
            "payment" => Some(Self::Payment),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Form decoding and validation
// ---------------------------------------------------------------------------

/// The numeric form fields the model requires, in wire order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "amount",
    "oldbalanceOrg",
    "newbalanceOrig",
    "oldbalanceDest",
    "newbalanceDest",
];

/// A decoded form submission: field name → raw value.
pub type FormFields = BTreeMap<String, String>;

/// Decode an urlencoded form body into a field map.
pub fn parse_form(body: &str) -> FormFields {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

/// Validate a submission, collecting **all** violations in one pass.
///
/// An empty result means the submission is clean. The transaction type must
/// be a known selection and every required numeric field non-blank.
pub fn validate(fields: &FormFields) -> Vec<String> {
    let mut violations = Vec::new();

    let tx_type = fields.get("transactionType").map(String::as_str).unwrap_or("");
    if tx_type.trim().is_empty() {
        violations.push("Select a transaction type.".to_string());
    } else if TransactionType::parse(tx_type.trim()).is_none() {
        violations.push(format!("Unknown transaction type \"{}\".", tx_type.trim()));
    }

    for field in REQUIRED_FIELDS {
        let blank = fields
            .get(field)
            .map(|v| v.trim().is_empty())
            .unwrap_or(true);
        if blank {
            violations.push(format!("Fill in the {field} field."));
        }
    }

    violations
}

/// Parse a numeric field, defaulting to 0 when absent or unparseable.
fn numeric(fields: &FormFields, name: &str) -> f64 {
    fields
        .get(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Wire request
// ---------------------------------------------------------------------------

/// JSON body posted to the scoring endpoint. Field names are wire-exact —
/// they must match the feature names the model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub step: u32,
    pub amount: f64,
    #[serde(rename = "oldbalanceOrg")]
    pub oldbalance_org: f64,
    #[serde(rename = "newbalanceOrig")]
    pub newbalance_orig: f64,
    #[serde(rename = "oldbalanceDest")]
    pub oldbalance_dest: f64,
    #[serde(rename = "newbalanceDest")]
    pub newbalance_dest: f64,
    #[serde(rename = "errorBalanceOrig")]
    pub error_balance_orig: f64,
    #[serde(rename = "errorBalanceDest")]
    pub error_balance_dest: f64,
    #[serde(rename = "type_CASH_OUT")]
    pub type_cash_out: u8,
    #[serde(rename = "type_DEBIT")]
    pub type_debit: u8,
    #[serde(rename = "type_PAYMENT")]
    pub type_payment: u8,
    #[serde(rename = "type_TRANSFER")]
    pub type_transfer: u8,
}

impl PredictionRequest {
    /// Assemble a request from raw balance figures and a transaction type.
    ///
    /// Derives the two error-balance features and the one-hot type flags;
    /// `step` is fixed at 1 (the model's time-step feature, meaningless for
    /// a single ad-hoc transaction).
    pub fn assemble(
        tx_type: TransactionType,
        amount: f64,
        oldbalance_org: f64,
        newbalance_orig: f64,
        oldbalance_dest: f64,
        newbalance_dest: f64,
    ) -> Self {
        Self {
            step: 1,
            amount,
            oldbalance_org,
            newbalance_orig,
            oldbalance_dest,
            newbalance_dest,
            error_balance_orig: newbalance_orig + amount - oldbalance_org,
            error_balance_dest: oldbalance_dest + amount - newbalance_dest,
            type_cash_out: (tx_type == TransactionType::CashOut) as u8,
            type_debit: (tx_type == TransactionType::Debit) as u8,
            type_payment: (tx_type == TransactionType::Payment) as u8,
            type_transfer: (tx_type == TransactionType::Transfer) as u8,
        }
    }

    /// Build a request from a validated form submission.
    ///
    /// Callers must run [`validate`] first; a missing or unknown type here
    /// is a programming error, not user input.
    pub fn from_form(fields: &FormFields, tx_type: TransactionType) -> Self {
        Self::assemble(
            tx_type,
            numeric(fields, "amount"),
            numeric(fields, "oldbalanceOrg"),
            numeric(fields, "newbalanceOrig"),
            numeric(fields, "oldbalanceDest"),
            numeric(fields, "newbalanceDest"),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_form_decodes_urlencoded_pairs() {
        let fields = parse_form("amount=1250.50&transactionType=cashout&oldbalanceOrg=2000");
        assert_eq!(fields.get("amount").unwrap(), "1250.50");
        assert_eq!(fields.get("transactionType").unwrap(), "cashout");
    }

    #[test]
    fn parse_form_decodes_escapes() {
        let fields = parse_form("transactionType=cash%20out&amount=+5");
        assert_eq!(fields.get("transactionType").unwrap(), "cash out");
        assert_eq!(fields.get("amount").unwrap(), " 5");
    }

    #[test]
    fn validate_collects_every_violation() {
        let violations = validate(&form(&[("amount", "10")]));
        // Missing type plus four missing balance fields.
        assert_eq!(violations.len(), 5);
        assert!(violations[0].contains("transaction type"));
    }

    #[test]
    fn validate_accepts_complete_submission() {
        let fields = form(&[
            ("transactionType", "transfer"),
            ("amount", "100"),
            ("oldbalanceOrg", "500"),
            ("newbalanceOrig", "400"),
            ("oldbalanceDest", "0"),
            ("newbalanceDest", "100"),
        ]);
        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn validate_rejects_blank_and_unknown_type() {
        let mut fields = form(&[("transactionType", "   ")]);
        assert!(validate(&fields)[0].contains("Select a transaction type"));
        fields.insert("transactionType".to_string(), "wire".to_string());
        assert!(validate(&fields)[0].contains("Unknown transaction type"));
    }

    #[test]
    fn cashout_sets_only_its_flag() {
        let req = PredictionRequest::assemble(TransactionType::CashOut, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(req.type_cash_out, 1);
        assert_eq!(req.type_debit, 0);
        assert_eq!(req.type_payment, 0);
        assert_eq!(req.type_transfer, 0);
    }

    #[test]
    fn error_balances_follow_fixed_formulas() {
        let req = PredictionRequest::assemble(
            TransactionType::Transfer,
            1000.0, // amount
            5000.0, // oldbalanceOrg
            4000.0, // newbalanceOrig
            200.0,  // oldbalanceDest
            1200.0, // newbalanceDest
        );
        // newbalanceOrig + amount - oldbalanceOrg
        assert_eq!(req.error_balance_orig, 4000.0 + 1000.0 - 5000.0);
        // oldbalanceDest + amount - newbalanceDest
        assert_eq!(req.error_balance_dest, 200.0 + 1000.0 - 1200.0);
    }

    #[test]
    fn unparseable_numbers_default_to_zero() {
        let fields = form(&[
            ("transactionType", "payment"),
            ("amount", "abc"),
            ("oldbalanceOrg", "100"),
            ("newbalanceOrig", ""),
            ("oldbalanceDest", "0"),
            ("newbalanceDest", "0"),
        ]);
        let req = PredictionRequest::from_form(&fields, TransactionType::Payment);
        assert_eq!(req.amount, 0.0);
        assert_eq!(req.oldbalance_org, 100.0);
        assert_eq!(req.newbalance_orig, 0.0);
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let req = PredictionRequest::assemble(TransactionType::CashOut, 10.0, 1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_value(&req).unwrap();
        for key in [
            "step",
            "amount",
            "oldbalanceOrg",
            "newbalanceOrig",
            "oldbalanceDest",
            "newbalanceDest",
            "errorBalanceOrig",
            "errorBalanceDest",
            "type_CASH_OUT",
            "type_DEBIT",
            "type_PAYMENT",
            "type_TRANSFER",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {key}");
        }
        assert_eq!(json["step"], 1);
        assert_eq!(json["type_CASH_OUT"], 1);
    }

    #[test]
    fn transaction_type_parses_form_values() {
        assert_eq!(TransactionType::parse("cashout"), Some(TransactionType::CashOut));
        assert_eq!(TransactionType::parse("debit"), Some(TransactionType::Debit));
        assert_eq!(TransactionType::parse("payment"), Some(TransactionType::Payment));
        assert_eq!(TransactionType::parse("transfer"), Some(TransactionType::Transfer));
        assert_eq!(TransactionType::parse("CASHOUT"), None);
        assert_eq!(TransactionType::parse(""), None);
    }
}
