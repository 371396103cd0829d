//! Declarative descriptions of the nine Daraja payment operations.
//!
//! ## API Paths
//!
//! | Operation | Live | Sandbox |
//! |-----------|------|---------|
//! | C2B simulate | `mpesa/c2b/v1/simulate` | same |
//! | B2C payment | `mpesa/b2c/v1/paymentrequest` | same |
//! | B2B payment | `mpesa/b2b/v1/paymentrequest` | same |
//! | Account balance | `mpesa/accountbalance/v1/query` | same |
//! | Transaction status | `mpesa/transactionstatus/v1/query` | same |
//! | Reversal | `mpesa/reversal/v1/request` | same |
//! | STK push | `mpesa/stkpush/v1/processrequest` | same |
//! | STK push query | `mpesa/stkpushquery/v2/query` | `mpesa/stkpushquery/v1/query` |
//! | Register URL | `mpesa/c2b/v2/registerurl` | `mpesa/c2b/v1/registerurl` |
//!
//! Field names are the upstream contract verbatim, including its spelling
//! of `RecieverIdentifierType`.

use std::str::FromStr;

use mpesa_core::Environment;

/// Parameter carrying the target environment.
pub const ENVIRONMENT: &str = "environment";
/// Parameter carrying the consumer key.
pub const CONSUMER_KEY: &str = "consumer_key";
/// Parameter carrying the consumer secret.
pub const CONSUMER_SECRET: &str = "consumer_secret";
/// Parameter carrying the initiator's plain password. Never forwarded.
pub const INITIATOR_PASSWORD: &str = "initiatorPassword";
/// Parameter carrying the Lipa Na M-Pesa Online passkey. Never forwarded.
pub const PASSKEY: &str = "LipaNaMpesaPasskey";
/// Short code the push password is derived from. Forwarded.
pub const BUSINESS_SHORT_CODE: &str = "BusinessShortCode";

/// The nine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    C2bSimulate,
    B2cPayment,
    B2bPayment,
    AccountBalance,
    TransactionStatus,
    Reversal,
    StkPush,
    StkPushQuery,
    RegisterUrl,
}

impl OperationKind {
    pub const ALL: [OperationKind; 9] = [
        Self::C2bSimulate,
        Self::B2cPayment,
        Self::B2bPayment,
        Self::AccountBalance,
        Self::TransactionStatus,
        Self::Reversal,
        Self::StkPush,
        Self::StkPushQuery,
        Self::RegisterUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C2bSimulate => "c2b_simulate",
            Self::B2cPayment => "b2c_payment",
            Self::B2bPayment => "b2b_payment",
            Self::AccountBalance => "account_balance",
            Self::TransactionStatus => "transaction_status",
            Self::Reversal => "reversal",
            Self::StkPush => "stk_push",
            Self::StkPushQuery => "stk_push_query",
            Self::RegisterUrl => "register_url",
        }
    }

    /// The static description of this operation.
    pub fn spec(&self) -> &'static OperationSpec {
        match self {
            Self::C2bSimulate => &C2B_SIMULATE,
            Self::B2cPayment => &B2C_PAYMENT,
            Self::B2bPayment => &B2B_PAYMENT,
            Self::AccountBalance => &ACCOUNT_BALANCE,
            Self::TransactionStatus => &TRANSACTION_STATUS,
            Self::Reversal => &REVERSAL,
            Self::StkPush => &STK_PUSH,
            Self::StkPushQuery => &STK_PUSH_QUERY,
            Self::RegisterUrl => &REGISTER_URL,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown operation: {s:?}"))
    }
}

/// How the initiator is authenticated in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    /// No initiator authentication.
    None,
    /// `SecurityCredential` sealed from `initiatorPassword`.
    SecurityCredential,
    /// `Password` and `Timestamp` derived from `BusinessShortCode` and
    /// `LipaNaMpesaPasskey`.
    PushPassword,
}

impl CredentialMode {
    /// Parameters this mode consumes. They are validated like required
    /// fields.
    pub fn inputs(&self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::SecurityCredential => &[INITIATOR_PASSWORD],
            Self::PushPassword => &[BUSINESS_SHORT_CODE, PASSKEY],
        }
    }
}

/// One caller-supplied body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// Optional fields default to `""` when not supplied.
    pub required: bool,
}

const fn req(name: &'static str) -> Field {
    Field {
        name,
        required: true,
    }
}

const fn opt(name: &'static str) -> Field {
    Field {
        name,
        required: false,
    }
}

/// Static description of an operation: what to validate, where to send it
/// and what the client adds to the body.
#[derive(Debug)]
pub struct OperationSpec {
    pub kind: OperationKind,
    pub fields: &'static [Field],
    pub live_path: &'static str,
    pub sandbox_path: &'static str,
    pub credential: CredentialMode,
    /// Values the operation fixes; callers cannot override them.
    pub fixed_fields: &'static [(&'static str, &'static str)],
}

impl OperationSpec {
    pub fn path(&self, environment: Environment) -> &'static str {
        match environment {
            Environment::Live => self.live_path,
            Environment::Sandbox => self.sandbox_path,
        }
    }

    /// Every parameter that must be present, in validation order: the
    /// operation's own fields, the credential inputs, then the consumer
    /// key pair and the environment.
    pub fn required_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .chain(self.credential.inputs().iter().copied())
            .chain([CONSUMER_KEY, CONSUMER_SECRET, ENVIRONMENT])
    }
}

static C2B_SIMULATE: OperationSpec = OperationSpec {
    kind: OperationKind::C2bSimulate,
    fields: &[
        req("ShortCode"),
        req("CommandID"),
        req("Amount"),
        req("Msisdn"),
        opt("BillRefNumber"),
    ],
    live_path: "mpesa/c2b/v1/simulate",
    sandbox_path: "mpesa/c2b/v1/simulate",
    credential: CredentialMode::None,
    fixed_fields: &[],
};

static B2C_PAYMENT: OperationSpec = OperationSpec {
    kind: OperationKind::B2cPayment,
    fields: &[
        req("InitiatorName"),
        req("CommandID"),
        req("Amount"),
        req("PartyA"),
        req("PartyB"),
        req("Remarks"),
        req("QueueTimeOutURL"),
        req("ResultURL"),
        opt("Occasion"),
    ],
    live_path: "mpesa/b2c/v1/paymentrequest",
    sandbox_path: "mpesa/b2c/v1/paymentrequest",
    credential: CredentialMode::SecurityCredential,
    fixed_fields: &[],
};

static B2B_PAYMENT: OperationSpec = OperationSpec {
    kind: OperationKind::B2bPayment,
    fields: &[
        req("Initiator"),
        req("CommandID"),
        req("SenderIdentifierType"),
        req("RecieverIdentifierType"),
        req("Amount"),
        req("PartyA"),
        req("PartyB"),
        req("AccountReference"),
        req("Remarks"),
        req("QueueTimeOutURL"),
        req("ResultURL"),
        opt("Occasion"),
    ],
    live_path: "mpesa/b2b/v1/paymentrequest",
    sandbox_path: "mpesa/b2b/v1/paymentrequest",
    credential: CredentialMode::SecurityCredential,
    fixed_fields: &[],
};

static ACCOUNT_BALANCE: OperationSpec = OperationSpec {
    kind: OperationKind::AccountBalance,
    fields: &[
        req("Initiator"),
        req("PartyA"),
        req("IdentifierType"),
        req("QueueTimeOutURL"),
        req("ResultURL"),
    ],
    live_path: "mpesa/accountbalance/v1/query",
    sandbox_path: "mpesa/accountbalance/v1/query",
    credential: CredentialMode::SecurityCredential,
    fixed_fields: &[("CommandID", "AccountBalance"), ("Remarks", "Account Balance")],
};

static TRANSACTION_STATUS: OperationSpec = OperationSpec {
    kind: OperationKind::TransactionStatus,
    fields: &[
        req("Initiator"),
        req("TransactionID"),
        req("PartyA"),
        req("IdentifierType"),
        req("ResultURL"),
        req("QueueTimeOutURL"),
    ],
    live_path: "mpesa/transactionstatus/v1/query",
    sandbox_path: "mpesa/transactionstatus/v1/query",
    credential: CredentialMode::SecurityCredential,
    fixed_fields: &[
        ("CommandID", "TransactionStatusQuery"),
        ("Remarks", "Transaction Status"),
        ("Occasion", "Transaction Status"),
    ],
};

static REVERSAL: OperationSpec = OperationSpec {
    kind: OperationKind::Reversal,
    fields: &[
        req("Initiator"),
        req("CommandID"),
        req("TransactionID"),
        req("Amount"),
        req("ReceiverParty"),
        req("RecieverIdentifierType"),
        req("ResultURL"),
        req("QueueTimeOutURL"),
        req("Remarks"),
        opt("Occasion"),
    ],
    live_path: "mpesa/reversal/v1/request",
    sandbox_path: "mpesa/reversal/v1/request",
    credential: CredentialMode::SecurityCredential,
    fixed_fields: &[],
};

static STK_PUSH: OperationSpec = OperationSpec {
    kind: OperationKind::StkPush,
    fields: &[
        req("TransactionType"),
        req("Amount"),
        req("PartyA"),
        req("PartyB"),
        req("PhoneNumber"),
        req("CallBackURL"),
        req("AccountReference"),
        req("TransactionDesc"),
        req("Remarks"),
    ],
    live_path: "mpesa/stkpush/v1/processrequest",
    sandbox_path: "mpesa/stkpush/v1/processrequest",
    credential: CredentialMode::PushPassword,
    fixed_fields: &[],
};

static STK_PUSH_QUERY: OperationSpec = OperationSpec {
    kind: OperationKind::StkPushQuery,
    fields: &[req("CheckoutRequestID")],
    live_path: "mpesa/stkpushquery/v2/query",
    sandbox_path: "mpesa/stkpushquery/v1/query",
    credential: CredentialMode::PushPassword,
    fixed_fields: &[],
};

static REGISTER_URL: OperationSpec = OperationSpec {
    kind: OperationKind::RegisterUrl,
    fields: &[
        req("ShortCode"),
        req("ResponseType"),
        req("ConfirmationURL"),
        req("ValidationURL"),
    ],
    live_path: "mpesa/c2b/v2/registerurl",
    sandbox_path: "mpesa/c2b/v1/registerurl",
    credential: CredentialMode::None,
    fixed_fields: &[],
};
