//! Execution engine tests

use script_explainer::engine::ExecutionEngine;
use script_explainer::types::StackValue;

use crate::common::{
    assert_halted_with, assert_push_step, run, tokens, MULTISIG_SPEND, P2PKH_LOCKING,
    P2PKH_SPEND, P2SH_LOCKING,
};

#[test]
fn test_step_count_never_exceeds_token_count() {
    for script in [
        P2PKH_LOCKING,
        P2SH_LOCKING,
        P2PKH_SPEND,
        MULTISIG_SPEND,
        "OP_FAKEOP abc",
        "OP_1 OP_2 OP_ADD OP_3 OP_EQUAL",
        "OP_RETURN 48656c6c6f 776f726c64",
    ] {
        let token_count = tokens(script).len();
        let trace = run(script);
        assert!(trace.steps.len() <= token_count, "{}", script);
        if !trace.halted() {
            assert_eq!(trace.steps.len(), token_count, "{}", script);
        }
    }
}

#[test]
fn test_data_only_scripts_push_every_item() {
    let trace = run("aa bb 00");
    assert_eq!(trace.steps.len(), 3);
    assert_push_step(&trace.steps[0], "aa");
    assert_push_step(&trace.steps[1], "bb");
    assert_push_step(&trace.steps[2], "00");
    // top item 00 is false
    assert!(!trace.is_valid());

    assert!(run("00 aa").is_valid());
}

#[test]
fn test_op_dup_on_empty_stack() {
    let trace = run("OP_DUP");
    assert_eq!(trace.steps.len(), 1);
    assert_halted_with(&trace.steps, "OP_DUP: insufficient stack items");
    assert!(trace.steps[0].explanation.contains("requires 1"));
    assert!(trace.steps[0].stack_before.is_empty());
    assert!(trace.steps[0].stack_after.is_empty());
}

#[test]
fn test_unknown_opcode_halts_gracefully() {
    let trace = run("OP_FAKEOP abc");
    assert_eq!(trace.steps.len(), 1);
    assert_halted_with(&trace.steps, "OP_FAKEOP: unsupported opcode");
}

#[test]
fn test_locking_scripts_run_against_unlocking_placeholders() {
    let initial = vec![StackValue::literal("<sig>"), StackValue::literal("<pubkey>")];
    let trace = ExecutionEngine::default().run_from(initial.clone(), &tokens(P2PKH_LOCKING));
    assert_eq!(trace.steps.len(), 5);
    assert_eq!(trace.steps[0].stack_before, initial);
    assert_eq!(trace.steps.last().unwrap().opcode, "OP_CHECKSIG");
    assert!(trace.is_valid());

    let trace = ExecutionEngine::default()
        .run_from(vec![StackValue::literal("<redeem_script>")], &tokens(P2SH_LOCKING));
    assert_eq!(trace.steps.len(), 3);
    assert!(!trace.halted());
}

#[test]
fn test_bare_locking_script_without_unlocking_data_halts() {
    let trace = run(P2SH_LOCKING);
    assert_halted_with(&trace.steps, "OP_HASH160: insufficient stack items");
}

#[test]
fn test_full_p2pkh_spend() {
    let trace = run(P2PKH_SPEND);
    assert_eq!(trace.steps.len(), 7);
    assert!(trace.is_valid());
    assert_eq!(trace.steps[3].opcode, "OP_HASH160");
    assert_eq!(
        trace.steps[3].stack_after[2].to_string(),
        "HASH160(<pubkey>)"
    );
    assert_eq!(
        trace.final_stack,
        vec![StackValue::composed(
            script_explainer::types::SymbolicOp::CheckSig,
            vec![StackValue::literal("<sig>"), StackValue::literal("<pubkey>")],
        )]
    );
}

#[test]
fn test_full_multisig_spend() {
    let trace = run(MULTISIG_SPEND);
    assert_eq!(trace.steps.len(), 9);
    assert!(!trace.halted());
    assert_eq!(trace.final_stack.len(), 1);
    assert_eq!(trace.final_stack[0].to_string(), "CHECKMULTISIG(2, 3)");
    let last = trace.steps.last().unwrap();
    assert_eq!(last.stack_before.len(), 8);
    assert!(last.explanation.contains("'<s1>'"));
    assert!(trace.is_valid());
}

#[test]
fn test_multisig_with_non_numeric_count() {
    let trace = run("aa bb OP_CHECKMULTISIG");
    assert_eq!(trace.steps.len(), 3);
    let failure = trace.failure.as_deref().unwrap();
    assert!(failure.starts_with("OP_CHECKMULTISIG: public key count"));
}

#[test]
fn test_arithmetic_evaluates_integers() {
    let trace = run("OP_2 OP_3 OP_ADD OP_5 OP_EQUAL");
    assert_eq!(trace.final_stack, vec![StackValue::Bool(true)]);
    assert!(trace.is_valid());

    let trace = run("2 <x> OP_ADD");
    assert_eq!(trace.final_stack[0].to_string(), "(2 + <x>)");
}

#[test]
fn test_equalverify_false_halts() {
    let trace = run("OP_1 OP_2 OP_EQUALVERIFY OP_1");
    assert_eq!(trace.steps.len(), 3);
    assert_halted_with(&trace.steps, "OP_EQUALVERIFY: verification failed");
}

#[test]
fn test_op_return_shows_payload() {
    let trace = run("OP_RETURN 48656c6c6f 776f726c64");
    assert_eq!(trace.steps.len(), 3);
    assert!(trace.unspendable);
    assert!(trace.steps[0].explanation.contains("provably unspendable"));
    assert_eq!(trace.final_stack.len(), 2);
    assert!(!trace.is_valid());
}

#[test]
fn test_runs_are_deterministic() {
    assert_eq!(run(P2PKH_SPEND), run(P2PKH_SPEND));
}
