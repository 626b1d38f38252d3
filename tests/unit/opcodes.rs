//! Opcode registry and catalog tests

use script_explainer::opcodes::{OpcodeCategory, OpcodeRegistry};
use script_explainer::types::StackValue;
use script_explainer::{list_opcodes, opcode_info};

#[test]
fn test_catalog_covers_supported_set() {
    let catalog = list_opcodes();
    let names: Vec<&str> = catalog.iter().map(|op| op.name.as_str()).collect();
    for expected in [
        "OP_0",
        "OP_1NEGATE",
        "OP_16",
        "OP_NOP",
        "OP_VERIFY",
        "OP_RETURN",
        "OP_TUCK",
        "OP_SIZE",
        "OP_EQUALVERIFY",
        "OP_NUMEQUALVERIFY",
        "OP_HASH256",
        "OP_CHECKSIGVERIFY",
        "OP_CHECKMULTISIGVERIFY",
        "OP_CHECKLOCKTIMEVERIFY",
        "OP_CHECKSEQUENCEVERIFY",
    ] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    assert_eq!(catalog.len(), OpcodeRegistry::global().len());
}

#[test]
fn test_catalog_categories() {
    let catalog = list_opcodes();
    let category = |name: &str| {
        catalog
            .iter()
            .find(|op| op.name == name)
            .map(|op| op.category)
    };
    assert_eq!(category("OP_SIZE"), Some(OpcodeCategory::Splice));
    assert_eq!(category("OP_EQUAL"), Some(OpcodeCategory::Bitwise));
    assert_eq!(
        category("OP_CHECKLOCKTIMEVERIFY"),
        Some(OpcodeCategory::Locktime)
    );
}

#[test]
fn test_opcode_info_lookup() {
    let info = opcode_info("op_checksig");
    assert!(info.known);
    assert_eq!(info.opcode, "OP_CHECKSIG");

    let info = opcode_info("OP_TRUE");
    assert!(info.known);

    let info = opcode_info("OP_CAT");
    assert!(!info.known);
    assert_eq!(info.description, "Unknown opcode: OP_CAT");
}

#[test]
fn test_handlers_tolerate_any_declared_depth() {
    let registry = OpcodeRegistry::global();
    let samples = [
        StackValue::literal("<x>"),
        StackValue::literal("00"),
        StackValue::literal("7"),
        StackValue::Number(-3),
        StackValue::Bool(false),
    ];

    for info in list_opcodes() {
        let definition = registry.lookup(&info.name).unwrap();
        for sample in &samples {
            let stack = vec![sample.clone(); 4];
            let Ok(depth) = definition.arity.required_depth(&stack) else {
                continue;
            };
            if depth > stack.len() {
                continue;
            }
            let output = definition.apply(&stack[stack.len() - depth..]);
            assert_eq!(
                output.produced.len(),
                definition.arity.produces(),
                "{} produced the wrong number of items",
                info.name
            );
        }
    }
}
