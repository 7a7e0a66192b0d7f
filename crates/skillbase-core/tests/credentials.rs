//! Cross-module behavior of the credential subsystem: the facade, codec,
//! token generator and strength pipeline working together the way the
//! registration flow uses them.

use skillbase_core::{
    ALPHANUMERIC, CommonPasswordList, CredentialService, HashCodec, HashParams, PasswordStrength,
    PasswordWeakness, UserAttributes, entropy_bits,
};

/// Cheap parameters so the test suite stays fast.
fn test_params() -> HashParams {
    HashParams {
        time_cost: 1,
        memory_cost: 1024,
        parallelism: 1,
        salt_entropy_bits: 128,
    }
}

#[test]
fn registration_flow_validates_then_hashes() -> anyhow::Result<()> {
    let strength = PasswordStrength::new(CommonPasswordList::new());
    let credentials = CredentialService::new(test_params());

    let attributes = UserAttributes {
        username: Some("snowball99"),
        email: Some("maria@example.com"),
        first_name: Some("Maria"),
        last_name: Some("Gonzalez"),
    };

    let password = "Xk9#mQ2vL!pZ8";
    strength.validate(password, &attributes)?;

    let encoded = credentials.make(Some(password), None)?;
    assert!(credentials.is_usable(Some(&encoded)));
    assert!(credentials.check(Some(password), &encoded));
    assert!(!credentials.must_update(&encoded));

    Ok(())
}

#[test]
fn facade_output_decodes_to_configured_parameters() -> anyhow::Result<()> {
    let params = test_params();
    let credentials = CredentialService::new(params);

    let encoded = credentials.make(Some("a strong password"), None)?;
    let decoded = HashCodec::decode(&encoded)?;

    assert_eq!(decoded.time_cost, params.time_cost);
    assert_eq!(decoded.memory_cost, params.memory_cost);
    assert_eq!(decoded.parallelism, params.parallelism);

    // The generated salt meets the configured entropy target.
    assert!(
        entropy_bits(decoded.salt.len(), ALPHANUMERIC.len())
            >= f64::from(params.salt_entropy_bits)
    );

    Ok(())
}

#[test]
fn raising_costs_triggers_rehash_but_not_reverification() -> anyhow::Result<()> {
    let old = CredentialService::new(test_params());
    let encoded = old.make(Some("a strong password"), None)?;

    let upgraded = CredentialService::new(HashParams {
        time_cost: 2,
        ..test_params()
    });

    // The old hash still verifies, but is flagged for an upgrade.
    assert!(upgraded.check(Some("a strong password"), &encoded));
    assert!(upgraded.must_update(&encoded));

    // Re-creating it under the new parameters clears the flag.
    let rehashed = upgraded.make(Some("a strong password"), None)?;
    assert!(upgraded.check(Some("a strong password"), &rehashed));
    assert!(!upgraded.must_update(&rehashed));

    Ok(())
}

#[test]
fn strength_pipeline_reports_first_failure_only() {
    let strength = PasswordStrength::new(CommonPasswordList::new());
    let attributes = UserAttributes {
        username: Some("sunshine123"),
        ..Default::default()
    };

    // "sunshine123" is common AND equal to the username; the similarity
    // stage runs first, so its reason wins.
    let error = strength
        .validate("sunshine123", &attributes)
        .expect_err("similar and common");
    assert_eq!(error.reason(), PasswordWeakness::TooSimilar);
}

#[test]
fn unusable_credentials_fail_every_check() -> anyhow::Result<()> {
    let credentials = CredentialService::new(test_params());
    let sentinel = credentials.make(None, None)?;

    assert!(!credentials.is_usable(Some(&sentinel)));
    assert!(!credentials.check(Some("anything"), &sentinel));
    assert!(!credentials.must_update(&sentinel));

    // The sentinel never parses as a real hash.
    assert!(HashCodec::decode(&sentinel).is_err());

    Ok(())
}
