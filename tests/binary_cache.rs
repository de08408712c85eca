#![cfg(feature = "binary-cache")]

use std::sync::Arc;

use boolex::{actions, Condition, DeserializeError, Inputs, Rule};

fn registry() -> Arc<Condition> {
    Arc::new(
        Condition::new()
            .add("a", "height", actions::gt(165_i64))
            .add("b", "height", actions::lt(180_i64))
            .add("c", "gender", actions::one_of(["male", "female"])),
    )
}

#[test]
fn roundtrip_preserves_behavior() {
    let cond = registry();
    let rule = Rule::compile("(a|b)&c", Arc::clone(&cond)).unwrap();
    let bytes = rule.to_bytes().unwrap();
    let restored = Rule::from_bytes(&bytes, cond).unwrap();

    assert_eq!(restored.source_text(), rule.source_text());
    assert_eq!(restored.compiled_form(), rule.compiled_form());

    let inputs = Inputs::new().set("height", 175_i64).set("gender", "male");
    assert_eq!(restored.evaluate(&inputs), rule.evaluate(&inputs));
}

#[test]
fn file_roundtrip() {
    let dir = std::env::temp_dir().join("boolex_binary_cache_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rule.blex");

    let cond = registry();
    let rule = Rule::compile("a & b", Arc::clone(&cond)).unwrap();
    rule.to_binary_file(&path).unwrap();

    let restored = Rule::from_binary_file(&path, cond).unwrap();
    assert_eq!(restored.compiled_form(), "a b &");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn garbage_is_rejected_not_panicked_on() {
    let cond = registry();
    for bytes in [&b""[..], &b"BLEX"[..], &[0_u8; 64][..]] {
        assert!(Rule::from_bytes(bytes, Arc::clone(&cond)).is_err());
    }
}

#[test]
fn flipped_payload_bit_fails_integrity() {
    let cond = registry();
    let rule = Rule::compile("a|b", Arc::clone(&cond)).unwrap();
    let mut bytes = rule.to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    assert!(matches!(
        Rule::from_bytes(&bytes, cond),
        Err(DeserializeError::ChecksumMismatch)
    ));
}

#[test]
fn rebinding_requires_all_operands_registered() {
    let cond = registry();
    let rule = Rule::compile("a & c", cond).unwrap();
    let bytes = rule.to_bytes().unwrap();

    let missing_c = Arc::new(Condition::new().add("a", "height", actions::gt(165_i64)));
    assert!(matches!(
        Rule::from_bytes(&bytes, missing_c),
        Err(DeserializeError::Validation(_))
    ));
}

#[test]
fn rebound_rule_uses_the_new_registry_actions() {
    let cond = registry();
    let rule = Rule::compile("a", cond).unwrap();
    let bytes = rule.to_bytes().unwrap();

    // Same names, different threshold: cached programs re-bind to whatever
    // the caller registers at load time.
    let stricter = Arc::new(Condition::new().add("a", "height", actions::gt(200_i64)));
    let restored = Rule::from_bytes(&bytes, stricter).unwrap();
    let inputs = Inputs::new().set("height", 175_i64);
    assert_eq!(restored.evaluate(&inputs), Ok(false));
}
