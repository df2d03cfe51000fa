//! Unit tests for the building blocks: fixed-point amounts, client order
//! ids, signing timestamps, request signing and error classification.

use okspot_core::id_gen::{CLIENT_OID_MAX_LEN, generate_client_oid, validate_client_oid};
use okspot_core::prelude::*;
use okspot_exchanges::okex::auth::OkexSigner;
use okspot_exchanges::prelude::*;
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// FIXED-POINT AMOUNTS
// ============================================================================

#[cfg(test)]
mod fixed_tests {
    use super::*;

    #[rstest]
    #[case("3594.7", "3594.7")]
    #[case("0.00100000", "0.00100000")]
    #[case("  42 ", "42")]
    #[case("1e-3", "0.001")]
    fn test_parse_exchange_amounts(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Fixed::from_str_exact(raw).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("1.2.3")]
    fn test_reject_invalid_amounts(#[case] raw: &str) {
        assert!(Fixed::from_str_exact(raw).is_err());
    }

    #[test]
    fn test_notional_is_exact() {
        let price = Fixed::from_str_exact("0.1").unwrap();
        let size = Fixed::from_str_exact("0.2").unwrap();
        assert_eq!((price * size).to_string(), "0.02");
        assert_eq!((price + size).to_string(), "0.3");
    }

    proptest! {
        #[test]
        fn prop_cents_add_exactly(a in 0i64..1_000_000, b in 0i64..1_000_000) {
            let fa = Fixed::from_str_exact(&format!("{}.{:02}", a / 100, a % 100)).unwrap();
            let fb = Fixed::from_str_exact(&format!("{}.{:02}", b / 100, b % 100)).unwrap();
            let sum = a + b;
            let expected = Fixed::from_str_exact(&format!("{}.{:02}", sum / 100, sum % 100)).unwrap();
            prop_assert_eq!(fa + fb, expected);
        }
    }
}

// ============================================================================
// CLIENT ORDER IDS
// ============================================================================

#[cfg(test)]
mod client_oid_tests {
    use super::*;

    #[rstest]
    #[case::letters_and_digits("oktspot79", true)]
    #[case::max_length("a1234567890123456789012345678901", true)]
    #[case::too_long("a12345678901234567890123456789012", false)]
    #[case::leading_digit("20181009", false)]
    #[case::dash("okt-spot", false)]
    #[case::empty("", false)]
    fn test_validation(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(validate_client_oid(value).is_ok(), valid);
        assert_eq!(ClientOid::parse(value).is_ok(), valid);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..1000).map(|_| ClientOid::generate().into_string()).collect();
        assert_eq!(ids.len(), 1000);
    }

    proptest! {
        #[test]
        fn prop_generated_ids_are_valid(prefix in "[a-z][a-z0-9]{0,40}") {
            let id = generate_client_oid(&prefix);
            prop_assert!(id.len() <= CLIENT_OID_MAX_LEN);
            prop_assert!(validate_client_oid(&id).is_ok());
            let kept: String = prefix.chars().take(CLIENT_OID_MAX_LEN).collect();
            prop_assert!(id.starts_with(&kept));
        }
    }
}

// ============================================================================
// TIMESTAMPS AND SIGNING
// ============================================================================

#[cfg(test)]
mod signing_tests {
    use super::*;

    fn test_signer() -> OkexSigner {
        OkexSigner::new(OkexCredentials::new(
            "key".to_string(),
            "secret".to_string(),
            "pass".to_string(),
        ))
        .unwrap()
    }

    #[fixture]
    fn signer() -> OkexSigner {
        test_signer()
    }

    #[rstest]
    #[case(1_553_068_689_123, "2019-03-20T07:58:09.123Z")]
    #[case(1_539_329_576_512, "2018-10-12T07:32:56.512Z")]
    #[case(1_553_068_689_000, "2019-03-20T07:58:09.000Z")]
    fn test_signing_timestamp_format(#[case] millis: u64, #[case] expected: &str) {
        assert_eq!(Timestamp::from_millis(millis).to_iso8601(), expected);
    }

    #[rstest]
    fn test_known_signature(signer: OkexSigner) {
        let body = r#"{"client_oid":"20181009","instrument_id":"btc-usdt"}"#;
        let signature = signer
            .sign(
                "2019-03-20T07:58:09.123Z",
                "POST",
                "/api/spot/v3/cancel_orders/1611729012263936",
                body,
            )
            .unwrap();
        assert_eq!(signature, "Azvt6J5DHtuGCbDZkJN1AnFWXr2m8UMa6DhdOldfSbk=");
    }

    #[rstest]
    fn test_headers_share_timestamp(signer: OkexSigner) {
        let stamp = Timestamp::from_millis(1_553_068_689_123);
        let headers = signer
            .auth_headers(stamp, "GET", "/api/spot/v3/orders_pending?instrument_id=BTC-USDT", "")
            .unwrap();

        let sent_stamp = &headers[2].1;
        let sent_sign = &headers[1].1;
        assert_eq!(sent_stamp, "2019-03-20T07:58:09.123Z");
        assert!(signer.validate_signature(
            sent_stamp,
            "GET",
            "/api/spot/v3/orders_pending?instrument_id=BTC-USDT",
            "",
            sent_sign
        ));
    }

    proptest! {
        #[test]
        fn prop_signature_depends_on_query(a in "[A-Z]{3}-USDT", b in "[A-Z]{3}-USDT") {
            prop_assume!(a != b);
            let signer = test_signer();
            let stamp = "2019-03-20T07:58:09.123Z";
            let sa = signer.sign(stamp, "GET", &format!("/api/spot/v3/orders_pending?instrument_id={a}"), "").unwrap();
            let sb = signer.sign(stamp, "GET", &format!("/api/spot/v3/orders_pending?instrument_id={b}"), "").unwrap();
            prop_assert_ne!(sa, sb);
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[rstest]
    #[case(30008, ApiErrorKind::Authentication)]
    #[case(30014, ApiErrorKind::RateLimited)]
    #[case(30025, ApiErrorKind::InvalidParameter)]
    #[case(30030, ApiErrorKind::ServiceUnavailable)]
    #[case(33014, ApiErrorKind::OrderNotFound)]
    #[case(33017, ApiErrorKind::InsufficientBalance)]
    #[case(34001, ApiErrorKind::Other)]
    fn test_error_code_kinds(#[case] code: i64, #[case] kind: ApiErrorKind) {
        assert_eq!(ApiError::new(400, code, "").kind(), kind);
    }

    #[test]
    fn test_api_error_display() {
        let err = ExchangeError::from(ApiError::new(400, 33014, "order not exist"));
        assert_eq!(err.to_string(), "OKEx API error 33014 (HTTP 400): order not exist");
    }
}
