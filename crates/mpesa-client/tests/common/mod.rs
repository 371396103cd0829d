//! Shared fixtures: throwaway certificates, a client pointed at a mock
//! Daraja server, and a valid parameter set for every operation.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use mpesa_client::{MpesaConfig, OperationKind, Params, PaymentClient};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::{Padding, Rsa};
use openssl::x509::{X509Builder, X509NameBuilder, X509};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-access-token";
pub const INITIATOR_PASSWORD: &str = "Safaricom999!*!";

pub fn self_signed(common_name: &str) -> (PKey<Private>, X509) {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", common_name).unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();

    (key, builder.build())
}

pub fn decrypt(key: &PKey<Private>, credential: &str) -> String {
    let ciphertext = STANDARD.decode(credential).unwrap();
    let rsa = key.rsa().unwrap();
    let mut out = vec![0u8; rsa.size() as usize];
    let n = rsa
        .private_decrypt(&ciphertext, &mut out, Padding::PKCS1)
        .unwrap();
    String::from_utf8(out[..n].to_vec()).unwrap()
}

/// A mock server, a certificate directory holding both environment
/// certificates, and a client wired to them.
pub struct Fixture {
    pub server: MockServer,
    pub certs: tempfile::TempDir,
    pub live_key: PKey<Private>,
    pub sandbox_key: PKey<Private>,
    pub client: PaymentClient,
}

impl Fixture {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let certs = tempfile::tempdir().unwrap();

        let (live_key, live_cert) = self_signed("api.safaricom.co.ke");
        let (sandbox_key, sandbox_cert) = self_signed("sandbox.safaricom.co.ke");
        std::fs::write(
            certs.path().join("ProductionCertificate.cer"),
            live_cert.to_pem().unwrap(),
        )
        .unwrap();
        std::fs::write(
            certs.path().join("SandboxCertificate.cer"),
            sandbox_cert.to_pem().unwrap(),
        )
        .unwrap();

        let config = MpesaConfig::local_mock(&server.uri(), certs.path()).unwrap();
        let client = PaymentClient::new(config).unwrap();

        Self {
            server,
            certs,
            live_key,
            sandbox_key,
            client,
        }
    }

    /// Serve `times` successful token exchanges.
    pub async fn mount_token(&self, times: u64) {
        Mock::given(method("GET"))
            .and(path("/oauth/v1/generate"))
            .and(query_param("grant_type", "client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": TOKEN,
                "expires_in": "3599"
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any request at all reaches the server.
    pub async fn forbid_requests(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every POST the server received, in order.
    pub async fn posted_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .map(|r| r.body_json::<Value>().unwrap())
            .collect()
    }
}

/// A complete, valid sandbox parameter set for `kind`.
pub fn valid_params(kind: OperationKind) -> Params {
    let fields = match kind {
        OperationKind::C2bSimulate => json!({
            "ShortCode": "600000",
            "CommandID": "CustomerPayBillOnline",
            "Amount": 10,
            "Msisdn": "254708374149",
            "BillRefNumber": "INV-1",
        }),
        OperationKind::B2cPayment => json!({
            "InitiatorName": "testapi",
            "initiatorPassword": INITIATOR_PASSWORD,
            "CommandID": "BusinessPayment",
            "Amount": 100,
            "PartyA": "600000",
            "PartyB": "254708374149",
            "Remarks": "salary",
            "QueueTimeOutURL": "https://merchant.example.com/timeout",
            "ResultURL": "https://merchant.example.com/result",
        }),
        OperationKind::B2bPayment => json!({
            "Initiator": "testapi",
            "initiatorPassword": INITIATOR_PASSWORD,
            "CommandID": "BusinessPayBill",
            "SenderIdentifierType": "4",
            "RecieverIdentifierType": "4",
            "Amount": 100,
            "PartyA": "600000",
            "PartyB": "600001",
            "AccountReference": "ACC-1",
            "Remarks": "stock",
            "QueueTimeOutURL": "https://merchant.example.com/timeout",
            "ResultURL": "https://merchant.example.com/result",
        }),
        OperationKind::AccountBalance => json!({
            "Initiator": "testapi",
            "initiatorPassword": INITIATOR_PASSWORD,
            "PartyA": "600000",
            "IdentifierType": "4",
            "QueueTimeOutURL": "https://merchant.example.com/timeout",
            "ResultURL": "https://merchant.example.com/result",
        }),
        OperationKind::TransactionStatus => json!({
            "Initiator": "testapi",
            "initiatorPassword": INITIATOR_PASSWORD,
            "TransactionID": "OEI2AK4Q16",
            "PartyA": "600000",
            "IdentifierType": "4",
            "ResultURL": "https://merchant.example.com/result",
            "QueueTimeOutURL": "https://merchant.example.com/timeout",
        }),
        OperationKind::Reversal => json!({
            "Initiator": "testapi",
            "initiatorPassword": INITIATOR_PASSWORD,
            "CommandID": "TransactionReversal",
            "TransactionID": "OEI2AK4Q16",
            "Amount": 100,
            "ReceiverParty": "600000",
            "RecieverIdentifierType": "11",
            "ResultURL": "https://merchant.example.com/result",
            "QueueTimeOutURL": "https://merchant.example.com/timeout",
            "Remarks": "duplicate",
        }),
        OperationKind::StkPush => json!({
            "BusinessShortCode": "174379",
            "LipaNaMpesaPasskey": "bfb279f9aa9bdbcf158e97dd71a467cd2e0c893059b10f78e6b72ada1ed2c919",
            "TransactionType": "CustomerPayBillOnline",
            "Amount": 1,
            "PartyA": "254708374149",
            "PartyB": "174379",
            "PhoneNumber": "254708374149",
            "CallBackURL": "https://merchant.example.com/stk",
            "AccountReference": "INV-1",
            "TransactionDesc": "invoice",
            "Remarks": "thanks",
        }),
        OperationKind::StkPushQuery => json!({
            "BusinessShortCode": "174379",
            "LipaNaMpesaPasskey": "bfb279f9aa9bdbcf158e97dd71a467cd2e0c893059b10f78e6b72ada1ed2c919",
            "CheckoutRequestID": "ws_CO_DMZ_12321_23423476",
        }),
        OperationKind::RegisterUrl => json!({
            "ShortCode": "600000",
            "ResponseType": "Completed",
            "ConfirmationURL": "https://merchant.example.com/confirm",
            "ValidationURL": "https://merchant.example.com/validate",
        }),
    };

    let mut params = match fields {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    params.insert("environment".into(), json!("sandbox"));
    params.insert("consumer_key".into(), json!("key"));
    params.insert("consumer_secret".into(), json!("secret"));
    params
}
