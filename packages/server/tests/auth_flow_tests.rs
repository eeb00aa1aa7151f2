// Integration tests for the phone-OTP sign-in flow

mod common;

use std::sync::Arc;

use common::TestHarness;
use test_context::test_context;

use server_core::domains::auth::models::TEST_VERIFICATION_CODE;
use server_core::domains::auth::{service as auth, AuthError};
use server_core::kernel::test_dependencies::{MockOtpService, RejectingOtpService};

#[test_context(TestHarness)]
#[tokio::test]
async fn test_sign_in_opens_session_and_sign_out_closes_it(harness: &mut TestHarness) {
    let deps = harness.deps();
    let phone = "+16125550101";

    let pending = auth::send_code(phone, &deps).await.unwrap();
    let signed_in = auth::verify_code(&pending, TEST_VERIFICATION_CODE, &deps)
        .await
        .unwrap();

    assert_eq!(signed_in.member.phone_number, phone);

    // The session is readable as many times as we like, with a stable member id
    for _ in 0..3 {
        let session = auth::current_session(&signed_in.token, &deps)
            .await
            .expect("session should be live");
        assert_eq!(session.member_id, signed_in.member.id);
        assert_eq!(session.phone_number, phone);
    }

    auth::sign_out(&signed_in.token, &deps).await.unwrap();
    assert!(auth::current_session(&signed_in.token, &deps)
        .await
        .is_none());

    // A second sign-out of the same token is reported, not swallowed
    let err = auth::sign_out(&signed_in.token, &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionNotFound));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_wrong_code_is_rejected(harness: &mut TestHarness) {
    let deps = harness.deps();

    let pending = auth::send_code("+16125550102", &deps).await.unwrap();
    let err = auth::verify_code(&pending, "000000", &deps)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCode { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unreachable_provider_fails_initiation(harness: &mut TestHarness) {
    let otp = Arc::new(MockOtpService::new(TEST_VERIFICATION_CODE).failing_sends());
    let deps = harness.deps_with(
        otp,
        Arc::new(server_core::kernel::test_dependencies::MockMediaStore::new()),
    );

    let err = auth::send_code("+16125550103", &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::Initiation { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_malformed_number_never_reaches_provider(harness: &mut TestHarness) {
    let otp = Arc::new(MockOtpService::new(TEST_VERIFICATION_CODE));
    let deps = harness.deps_with(
        otp.clone(),
        Arc::new(server_core::kernel::test_dependencies::MockMediaStore::new()),
    );

    for bad in ["5551234567", "+1555", "not a number", ""] {
        let err = auth::send_code(bad, &deps).await.unwrap_err();
        assert!(matches!(err, AuthError::Initiation { .. }), "{bad:?}");
    }

    assert!(otp.sent_to().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_repeat_sign_in_resolves_same_member(harness: &mut TestHarness) {
    let deps = harness.deps();
    let phone = "+16125550104";

    let pending = auth::send_code(phone, &deps).await.unwrap();
    let first = auth::verify_code(&pending, TEST_VERIFICATION_CODE, &deps)
        .await
        .unwrap();

    auth::sign_out(&first.token, &deps).await.unwrap();

    let pending = auth::send_code(phone, &deps).await.unwrap();
    let second = auth::verify_code(&pending, TEST_VERIFICATION_CODE, &deps)
        .await
        .unwrap();

    assert_eq!(first.member.id, second.member.id);
    assert_ne!(first.token, second.token);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_distinct_numbers_get_distinct_members(harness: &mut TestHarness) {
    let deps = harness.deps();

    let pending = auth::send_code("+16125550105", &deps).await.unwrap();
    let alice = auth::verify_code(&pending, TEST_VERIFICATION_CODE, &deps)
        .await
        .unwrap();

    let pending = auth::send_code("+16125550106", &deps).await.unwrap();
    let bob = auth::verify_code(&pending, TEST_VERIFICATION_CODE, &deps)
        .await
        .unwrap();

    assert_ne!(alice.member.id, bob.member.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_test_identifier_bypasses_provider(harness: &mut TestHarness) {
    // The provider rejects every call, so a completed flow proves the bypass
    let deps = harness.deps_with_test_identifiers(Arc::new(RejectingOtpService));
    let phone = "+15550007777";

    let pending = auth::send_code(phone, &deps).await.unwrap();

    let err = auth::verify_code(&pending, "999999", &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCode { .. }));

    let signed_in = auth::verify_code(&pending, TEST_VERIFICATION_CODE, &deps)
        .await
        .unwrap();
    assert_eq!(signed_in.member.phone_number, phone);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_bypass_disabled_by_default(harness: &mut TestHarness) {
    // Same +1-555 number, but with the flag off the provider is consulted
    let deps = harness.deps_with(
        Arc::new(RejectingOtpService),
        Arc::new(server_core::kernel::test_dependencies::MockMediaStore::new()),
    );

    let err = auth::send_code("+15550007778", &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::Initiation { .. }));
}
