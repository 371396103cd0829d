//! Input validation across all nine operations. Every case here must fail
//! before a single request leaves the client.

mod common;

use common::{valid_params, Fixture};
use mpesa_client::{ErrorKind, MpesaError, OperationKind};
use serde_json::json;

#[tokio::test]
async fn each_missing_required_field_is_named() {
    let fx = Fixture::start().await;
    fx.forbid_requests().await;

    for kind in OperationKind::ALL {
        for name in kind.spec().required_names() {
            let mut params = valid_params(kind);
            params.remove(name);

            let err = fx.client.invoke(kind, &params).await.unwrap_err();
            match err {
                MpesaError::MissingField { field } => assert_eq!(field, name, "{kind}"),
                other => panic!("{kind} without {name}: unexpected {other:?}"),
            }
        }
    }
}

#[tokio::test]
async fn blank_values_count_as_missing() {
    let fx = Fixture::start().await;
    fx.forbid_requests().await;

    let blanks = [
        json!(null),
        json!(false),
        json!(0),
        json!(0.0),
        json!(""),
        json!("0"),
        json!([]),
        json!({}),
    ];

    for kind in OperationKind::ALL {
        let first = kind.spec().required_names().next().unwrap();
        for blank in &blanks {
            let mut params = valid_params(kind);
            params.insert(first.into(), blank.clone());

            let err = fx.client.invoke(kind, &params).await.unwrap_err();
            assert!(
                matches!(&err, MpesaError::MissingField { field } if field == first),
                "{kind} with {first}={blank}: {err:?}"
            );
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }
}

#[tokio::test]
async fn first_missing_field_wins() {
    let fx = Fixture::start().await;
    fx.forbid_requests().await;

    let mut params = valid_params(OperationKind::B2cPayment);
    params.remove("consumer_secret");
    params.remove("initiatorPassword");
    params.remove("Remarks");

    let err = fx
        .client
        .invoke(OperationKind::B2cPayment, &params)
        .await
        .unwrap_err();
    assert!(matches!(err, MpesaError::MissingField { field } if field == "Remarks"));
}

#[tokio::test]
async fn unknown_environment_is_rejected() {
    let fx = Fixture::start().await;
    fx.forbid_requests().await;

    for kind in OperationKind::ALL {
        for env in [json!("production"), json!("LIVE"), json!("Sandbox"), json!(1)] {
            let mut params = valid_params(kind);
            params.insert("environment".into(), env.clone());

            let err = fx.client.invoke(kind, &params).await.unwrap_err();
            assert!(
                matches!(err, MpesaError::InvalidEnvironment(_)),
                "{kind} with environment={env}: {err:?}"
            );
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }
}

#[tokio::test]
async fn missing_certificate_fails_before_token_exchange() {
    let fx = Fixture::start().await;
    fx.forbid_requests().await;
    std::fs::remove_file(fx.certs.path().join("SandboxCertificate.cer")).unwrap();

    let err = fx
        .client
        .invoke(
            OperationKind::AccountBalance,
            &valid_params(OperationKind::AccountBalance),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
