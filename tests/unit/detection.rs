//! Script type detection tests

use script_explainer::detection::detect;
use script_explainer::types::ScriptType;

use crate::common::{tokens, MULTISIG_SPEND, NULL_DATA, P2PKH_LOCKING, P2SH_LOCKING};

fn script_type(script: &str) -> ScriptType {
    detect(&tokens(script)).script_type
}

#[test]
fn test_standard_locking_scripts() {
    assert_eq!(script_type(P2PKH_LOCKING), ScriptType::P2PKH);
    assert_eq!(script_type(P2SH_LOCKING), ScriptType::P2SH);
    assert_eq!(script_type(NULL_DATA), ScriptType::NullData);
    let pubkey = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    assert_eq!(
        script_type(&format!("{} OP_CHECKSIG", pubkey)),
        ScriptType::P2PK
    );
}

#[test]
fn test_bare_multisig() {
    let detection = detect(&tokens("OP_1 <k1> <k2> OP_2 OP_CHECKMULTISIG"));
    assert_eq!(detection.script_type, ScriptType::Multisig);
    assert!(detection.description.contains("1-of-2"));
}

#[test]
fn test_lowercase_input_is_detected() {
    assert_eq!(
        script_type("dup hash160 ab6807 equalverify checksig"),
        ScriptType::P2PKH
    );
}

#[test]
fn test_near_misses_are_unknown() {
    // extra trailing opcode
    assert_eq!(
        script_type("OP_HASH160 89abcdef OP_EQUAL OP_VERIFY"),
        ScriptType::Unknown
    );
    // opcode where the hash belongs
    assert_eq!(
        script_type("OP_DUP OP_HASH160 OP_DUP OP_EQUALVERIFY OP_CHECKSIG"),
        ScriptType::Unknown
    );
    // a spend is not a locking template
    assert_eq!(script_type(MULTISIG_SPEND), ScriptType::Unknown);
}

#[test]
fn test_detection_ignores_execution_outcome() {
    // classified from tokens alone, without running the script
    let detection = detect(&tokens(P2PKH_LOCKING));
    assert!(detection.description.contains("Pay-to-Public-Key-Hash"));
}

#[test]
fn test_type_info_is_available_for_every_type() {
    for script_type in [
        ScriptType::P2PKH,
        ScriptType::P2SH,
        ScriptType::P2PK,
        ScriptType::Multisig,
        ScriptType::NullData,
        ScriptType::Unknown,
    ] {
        let info = script_type.info();
        assert!(!info.name.is_empty());
        assert!(!info.usage.is_empty());
    }
}
