//! Typed request structs, one per operation.
//!
//! Each struct serializes to the upstream field names and lowers into the
//! same [`Params`] object the loosely typed path uses, so both paths share
//! validation and dispatch.

use mpesa_core::Environment;
use serde::Serialize;
use serde_json::Value;

use crate::credentials::{Credentials, Secret};
use crate::dispatch::Params;
use crate::error::MpesaError;
use crate::operation::{OperationKind, CONSUMER_KEY, CONSUMER_SECRET, ENVIRONMENT};

/// A request for one specific operation.
pub trait OperationRequest: Serialize {
    const KIND: OperationKind;

    /// Lower into operation parameters for `environment`, adding the
    /// consumer key pair.
    fn to_params(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<Params, MpesaError> {
        let mut params = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(MpesaError::InvalidArgument(format!(
                    "{} request did not serialize to an object",
                    Self::KIND
                )))
            }
            Err(e) => return Err(MpesaError::InvalidArgument(e.to_string())),
        };
        params.insert(ENVIRONMENT.into(), Value::String(environment.as_str().into()));
        params.insert(
            CONSUMER_KEY.into(),
            Value::String(credentials.consumer_key().into()),
        );
        params.insert(
            CONSUMER_SECRET.into(),
            Value::String(credentials.consumer_secret().expose().into()),
        );
        Ok(params)
    }
}

/// Simulate a customer paying a till or paybill (sandbox testing).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct C2bSimulateRequest {
    pub short_code: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    pub amount: u64,
    pub msisdn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_ref_number: Option<String>,
}

impl OperationRequest for C2bSimulateRequest {
    const KIND: OperationKind = OperationKind::C2bSimulate;
}

/// Business to customer disbursement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct B2cPaymentRequest {
    pub initiator_name: String,
    #[serde(rename = "initiatorPassword")]
    pub initiator_password: Secret,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    pub amount: u64,
    pub party_a: String,
    pub party_b: String,
    pub remarks: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl OperationRequest for B2cPaymentRequest {
    const KIND: OperationKind = OperationKind::B2cPayment;
}

/// Business to business transfer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct B2bPaymentRequest {
    pub initiator: String,
    #[serde(rename = "initiatorPassword")]
    pub initiator_password: Secret,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    pub sender_identifier_type: String,
    #[serde(rename = "RecieverIdentifierType")]
    pub receiver_identifier_type: String,
    pub amount: u64,
    pub party_a: String,
    pub party_b: String,
    pub account_reference: String,
    pub remarks: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl OperationRequest for B2bPaymentRequest {
    const KIND: OperationKind = OperationKind::B2bPayment;
}

/// Balance of a short code. The result arrives on `result_url`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountBalanceRequest {
    pub initiator: String,
    #[serde(rename = "initiatorPassword")]
    pub initiator_password: Secret,
    pub party_a: String,
    pub identifier_type: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
}

impl OperationRequest for AccountBalanceRequest {
    const KIND: OperationKind = OperationKind::AccountBalance;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionStatusRequest {
    pub initiator: String,
    #[serde(rename = "initiatorPassword")]
    pub initiator_password: Secret,
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    pub party_a: String,
    pub identifier_type: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
}

impl OperationRequest for TransactionStatusRequest {
    const KIND: OperationKind = OperationKind::TransactionStatus;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReversalRequest {
    pub initiator: String,
    #[serde(rename = "initiatorPassword")]
    pub initiator_password: Secret,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    pub amount: u64,
    pub receiver_party: String,
    #[serde(rename = "RecieverIdentifierType")]
    pub receiver_identifier_type: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    pub remarks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl OperationRequest for ReversalRequest {
    const KIND: OperationKind = OperationKind::Reversal;
}

/// Lipa Na M-Pesa Online payment prompt on the customer's handset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushRequest {
    pub business_short_code: String,
    #[serde(rename = "LipaNaMpesaPasskey")]
    pub passkey: Secret,
    pub transaction_type: String,
    pub amount: u64,
    pub party_a: String,
    pub party_b: String,
    pub phone_number: String,
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    pub account_reference: String,
    pub transaction_desc: String,
    pub remarks: String,
}

impl OperationRequest for StkPushRequest {
    const KIND: OperationKind = OperationKind::StkPush;
}

/// Status of an earlier STK push.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushQueryRequest {
    pub business_short_code: String,
    #[serde(rename = "LipaNaMpesaPasskey")]
    pub passkey: Secret,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
}

impl OperationRequest for StkPushQueryRequest {
    const KIND: OperationKind = OperationKind::StkPushQuery;
}

/// Register the confirmation and validation URLs of a short code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterUrlRequest {
    pub short_code: String,
    pub response_type: String,
    #[serde(rename = "ConfirmationURL")]
    pub confirmation_url: String,
    #[serde(rename = "ValidationURL")]
    pub validation_url: String,
}

impl OperationRequest for RegisterUrlRequest {
    const KIND: OperationKind = OperationKind::RegisterUrl;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn creds() -> Credentials {
        Credentials::new("key", "secret")
    }

    /// Every name the operation reads: declared fields, credential inputs
    /// and the common envelope.
    fn expected_keys(kind: OperationKind) -> BTreeSet<String> {
        let spec = kind.spec();
        spec.fields
            .iter()
            .map(|f| f.name)
            .chain(spec.credential.inputs().iter().copied())
            .chain([ENVIRONMENT, CONSUMER_KEY, CONSUMER_SECRET])
            .map(String::from)
            .collect()
    }

    fn keys<R: OperationRequest>(req: &R) -> BTreeSet<String> {
        req.to_params(Environment::Sandbox, &creds())
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn c2b_simulate_keys_match_table() {
        let req = C2bSimulateRequest {
            short_code: "600000".into(),
            command_id: "CustomerPayBillOnline".into(),
            amount: 10,
            msisdn: "254708374149".into(),
            bill_ref_number: Some("INV-1".into()),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::C2bSimulate));
    }

    #[test]
    fn b2c_keys_match_table() {
        let req = B2cPaymentRequest {
            initiator_name: "apiop".into(),
            initiator_password: "pw".into(),
            command_id: "BusinessPayment".into(),
            amount: 100,
            party_a: "600000".into(),
            party_b: "254708374149".into(),
            remarks: "salary".into(),
            queue_timeout_url: "https://example.com/timeout".into(),
            result_url: "https://example.com/result".into(),
            occasion: Some("March".into()),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::B2cPayment));
    }

    #[test]
    fn b2b_keys_match_table() {
        let req = B2bPaymentRequest {
            initiator: "apiop".into(),
            initiator_password: "pw".into(),
            command_id: "BusinessPayBill".into(),
            sender_identifier_type: "4".into(),
            receiver_identifier_type: "4".into(),
            amount: 100,
            party_a: "600000".into(),
            party_b: "600001".into(),
            account_reference: "ACC-1".into(),
            remarks: "stock".into(),
            queue_timeout_url: "https://example.com/timeout".into(),
            result_url: "https://example.com/result".into(),
            occasion: Some("restock".into()),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::B2bPayment));
    }

    #[test]
    fn account_balance_keys_match_table() {
        let req = AccountBalanceRequest {
            initiator: "apiop".into(),
            initiator_password: "pw".into(),
            party_a: "600000".into(),
            identifier_type: "4".into(),
            queue_timeout_url: "https://example.com/timeout".into(),
            result_url: "https://example.com/result".into(),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::AccountBalance));
    }

    #[test]
    fn transaction_status_keys_match_table() {
        let req = TransactionStatusRequest {
            initiator: "apiop".into(),
            initiator_password: "pw".into(),
            transaction_id: "OEI2AK4Q16".into(),
            party_a: "600000".into(),
            identifier_type: "4".into(),
            result_url: "https://example.com/result".into(),
            queue_timeout_url: "https://example.com/timeout".into(),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::TransactionStatus));
    }

    #[test]
    fn reversal_keys_match_table() {
        let req = ReversalRequest {
            initiator: "apiop".into(),
            initiator_password: "pw".into(),
            command_id: "TransactionReversal".into(),
            transaction_id: "OEI2AK4Q16".into(),
            amount: 100,
            receiver_party: "600000".into(),
            receiver_identifier_type: "11".into(),
            result_url: "https://example.com/result".into(),
            queue_timeout_url: "https://example.com/timeout".into(),
            remarks: "duplicate".into(),
            occasion: Some("refund".into()),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::Reversal));
    }

    #[test]
    fn stk_push_keys_match_table() {
        let req = StkPushRequest {
            business_short_code: "174379".into(),
            passkey: "passkey".into(),
            transaction_type: "CustomerPayBillOnline".into(),
            amount: 1,
            party_a: "254708374149".into(),
            party_b: "174379".into(),
            phone_number: "254708374149".into(),
            callback_url: "https://example.com/callback".into(),
            account_reference: "INV-1".into(),
            transaction_desc: "invoice".into(),
            remarks: "thanks".into(),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::StkPush));
    }

    #[test]
    fn stk_push_query_keys_match_table() {
        let req = StkPushQueryRequest {
            business_short_code: "174379".into(),
            passkey: "passkey".into(),
            checkout_request_id: "ws_CO_1".into(),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::StkPushQuery));
    }

    #[test]
    fn register_url_keys_match_table() {
        let req = RegisterUrlRequest {
            short_code: "600000".into(),
            response_type: "Completed".into(),
            confirmation_url: "https://example.com/confirm".into(),
            validation_url: "https://example.com/validate".into(),
        };
        assert_eq!(keys(&req), expected_keys(OperationKind::RegisterUrl));
    }

    #[test]
    fn absent_optional_field_is_left_out() {
        let req = C2bSimulateRequest {
            short_code: "600000".into(),
            command_id: "CustomerBuyGoodsOnline".into(),
            amount: 10,
            msisdn: "254708374149".into(),
            bill_ref_number: None,
        };
        let params = req.to_params(Environment::Live, &creds()).unwrap();
        assert!(!params.contains_key("BillRefNumber"));
        assert_eq!(params["environment"], "live");
        assert_eq!(params["Amount"], 10);
    }

    #[test]
    fn debug_redacts_passwords() {
        let req = StkPushQueryRequest {
            business_short_code: "174379".into(),
            passkey: "very-secret-passkey".into(),
            checkout_request_id: "ws_CO_1".into(),
        };
        assert!(!format!("{req:?}").contains("very-secret-passkey"));
    }
}
