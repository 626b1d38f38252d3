//! End-to-end explanation pipeline tests

use script_explainer::cli::output::to_json;
use script_explainer::types::ScriptType;
use script_explainer::{explain, AppError};
use serde_json::Value;

use crate::common::{
    explain_ok, MULTISIG_SPEND, NULL_DATA, P2PKH_LOCKING, P2PKH_SPEND, P2SH_LOCKING,
};

#[test]
fn test_json_shape() {
    let result = explain_ok(P2PKH_SPEND);
    let json: Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();

    for key in [
        "script",
        "script_type",
        "type_description",
        "steps",
        "final_stack",
        "valid",
        "error",
        "warnings",
        "summary",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }

    let step = &json["steps"][2];
    assert_eq!(step["step"], 2);
    assert_eq!(step["opcode"], "OP_DUP");
    assert_eq!(step["stack_before"], serde_json::json!(["<sig>", "<pubkey>"]));
    assert_eq!(
        step["stack_after"],
        serde_json::json!(["<sig>", "<pubkey>", "<pubkey>"])
    );
    // successful steps omit the failure field
    assert!(step.get("failure").is_none());
    assert_eq!(json["final_stack"], serde_json::json!(["CHECKSIG(<sig>, <pubkey>)"]));
}

#[test]
fn test_failure_step_in_json() {
    let result = explain_ok("OP_DUP");
    let json: Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
    assert_eq!(json["steps"][0]["failure"], "OP_DUP: insufficient stack items");
    assert_eq!(json["error"], "OP_DUP: insufficient stack items");
    assert_eq!(json["valid"], false);
}

#[test]
fn test_identical_input_gives_identical_json() {
    for script in [P2PKH_LOCKING, P2SH_LOCKING, NULL_DATA, MULTISIG_SPEND, "OP_FAKEOP abc"] {
        let first = to_json(&explain_ok(script)).unwrap();
        let second = to_json(&explain_ok(script)).unwrap();
        assert_eq!(first, second, "{}", script);
    }
}

#[test]
fn test_standard_types_through_pipeline() {
    let result = explain_ok(P2PKH_LOCKING);
    assert_eq!(result.script_type, ScriptType::P2PKH);
    assert_eq!(
        result.steps.last().map(|step| step.opcode.as_str()),
        Some("OP_CHECKSIG")
    );
    assert!(result.steps.iter().all(|step| step.failure.is_none()));

    let result = explain_ok(P2SH_LOCKING);
    assert_eq!(result.script_type, ScriptType::P2SH);
    assert_eq!(result.steps.len(), 3);

    let result = explain_ok(NULL_DATA);
    assert_eq!(result.script_type, ScriptType::NullData);
    assert!(!result.valid);
    assert!(result.error.is_none());
}

#[test]
fn test_multisig_template_is_traced_with_dummy_and_signatures() {
    let result = explain_ok("OP_2 <a> <b> <c> OP_3 OP_CHECKMULTISIG");
    assert!(result.valid);
    let rendered: Vec<String> = result.unlocking_data.iter().map(|v| v.to_string()).collect();
    assert_eq!(rendered, vec!["0", "<sig1>", "<sig2>"]);
    assert_eq!(result.final_stack[0].to_string(), "CHECKMULTISIG(2, 3)");
}

#[test]
fn test_unlocking_data_in_json() {
    let json: Value = serde_json::from_str(&to_json(&explain_ok(P2SH_LOCKING)).unwrap()).unwrap();
    assert_eq!(json["unlocking_data"], serde_json::json!(["<redeem_script>"]));
    assert_eq!(json["steps"][0]["stack_before"], serde_json::json!(["<redeem_script>"]));

    // non-template scripts start from an empty stack
    let json: Value = serde_json::from_str(&to_json(&explain_ok("OP_DUP")).unwrap()).unwrap();
    assert!(json.get("unlocking_data").is_none());
}

#[test]
fn test_concurrent_calls_agree() {
    let expected = to_json(&explain_ok(P2PKH_LOCKING)).unwrap();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| to_json(&explain_ok(P2PKH_LOCKING)).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outputs.len(), 8);
    assert!(outputs.iter().all(|output| *output == expected));
}

#[test]
fn test_unknown_opcode_is_reported_not_raised() {
    let result = explain_ok("OP_FAKEOP abc");
    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.error.as_deref(), Some("OP_FAKEOP: unsupported opcode"));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.summary.contains("Warning: Unknown opcode 'OP_FAKEOP'"));
}

#[test]
fn test_malformed_input_is_an_error() {
    assert!(matches!(explain(""), Err(AppError::MalformedScript(_))));
    assert!(matches!(
        explain("OP_DUP not-hex!"),
        Err(AppError::MalformedScript(_))
    ));
}

#[test]
fn test_summary_sections() {
    let summary = explain_ok(MULTISIG_SPEND).summary;
    assert!(summary.starts_with("Script Type: UNKNOWN"));
    assert!(summary.contains("Execution: Completed successfully with 9 step(s)."));
    assert!(summary.contains("Final stack contains 1 item(s): CHECKMULTISIG(2, 3)"));
    assert!(summary.contains("DISCLAIMER"));

    let summary = explain_ok("OP_1 OP_0").summary;
    assert!(summary.contains("Result: INVALID - the top stack item is false."));
}

#[test]
fn test_script_type_serialises_as_label() {
    let json = to_json(&explain_ok("OP_2 <a> <b> <c> OP_3 OP_CHECKMULTISIG")).unwrap();
    assert!(json.contains("\"script_type\": \"MULTISIG\""));
}
