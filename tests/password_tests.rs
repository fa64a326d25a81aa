//! 密码哈希与强度策略测试

use skyhigh_site::auth::password::{policy_violations, PasswordHasher};

mod common;

#[test]
fn test_hash_roundtrip() {
    let hasher = PasswordHasher::new();
    let hash = hasher.hash("Correct!Horse1").unwrap();

    assert!(hash.starts_with("$argon2id$"));
    assert!(hasher.verify("Correct!Horse1", &hash).is_ok());
    assert!(hasher.verify("WrongPassword1!", &hash).is_err());
}

#[test]
fn test_hashes_are_salted() {
    let hasher = PasswordHasher::new();
    let first = hasher.hash("Correct!Horse1").unwrap();
    let second = hasher.hash("Correct!Horse1").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_policy_reports_every_failure() {
    let config = common::create_test_config();
    let violations = policy_violations("abc", &config.security);

    assert_eq!(violations.len(), 4);
    assert_eq!(violations[0], "Password must be at least 8 characters long");
    assert_eq!(violations[1], "Password must contain at least 1 uppercase letter");
    assert_eq!(violations[2], "Password must contain at least 1 number");
    assert_eq!(violations[3], "Password must contain at least 1 special character");
}

#[test]
fn test_policy_passes_strong_password() {
    let config = common::create_test_config();
    assert!(policy_violations("NewSecure1!", &config.security).is_empty());
}

#[test]
fn test_policy_special_characters_set() {
    let config = common::create_test_config();

    // 集合内的各类特殊字符都应被接受
    for candidate in ["Password1!", "Password1[", "Password1'", "Password1\\"] {
        assert!(
            policy_violations(candidate, &config.security).is_empty(),
            "{candidate} should satisfy the policy"
        );
    }

    // 空格不在特殊字符集合内
    let violations = policy_violations("Password1 ", &config.security);
    assert_eq!(violations.len(), 1);
}
