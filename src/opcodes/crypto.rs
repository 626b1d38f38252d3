//! Hashing and signature opcodes
//!
//! Nothing here touches real cryptography. Hashes wrap their input in a
//! symbolic node and signature checks are assumed to succeed.

use super::flow::verify;
use super::{
    quote, quote_all, HandlerOutput, OpcodeCategory, OpcodeDefinition, OpcodeRegistry,
    MAX_PUBKEYS_PER_MULTISIG,
};
use crate::types::{StackValue, SymbolicOp};

const HASH_OPS: &[(&str, &str, SymbolicOp)] = &[
    (
        "OP_RIPEMD160",
        "Hashes the top stack item with RIPEMD-160",
        SymbolicOp::Ripemd160,
    ),
    (
        "OP_SHA1",
        "Hashes the top stack item with SHA-1",
        SymbolicOp::Sha1,
    ),
    (
        "OP_SHA256",
        "Hashes the top stack item with SHA-256",
        SymbolicOp::Sha256,
    ),
    (
        "OP_HASH160",
        "Performs RIPEMD160(SHA256(x)) on the top stack item",
        SymbolicOp::Hash160,
    ),
    (
        "OP_HASH256",
        "Performs SHA256(SHA256(x)) on the top stack item",
        SymbolicOp::Hash256,
    ),
];

pub(super) fn register(registry: &mut OpcodeRegistry) {
    for &(name, description, op) in HASH_OPS {
        registry.register(OpcodeDefinition::fixed(
            name,
            description,
            OpcodeCategory::Crypto,
            1,
            1,
            move |items| hash(name, op, &items[0]),
        ));
    }

    registry.register(OpcodeDefinition::fixed(
        "OP_CHECKSIG",
        "Verifies a signature against a public key, pushes the result",
        OpcodeCategory::Crypto,
        2,
        1,
        |items| {
            let (sig, pubkey) = (&items[0], &items[1]);
            let result =
                StackValue::composed(SymbolicOp::CheckSig, vec![sig.clone(), pubkey.clone()]);
            HandlerOutput::produce(
                vec![result],
                format!(
                    "OP_CHECKSIG: symbolically checked signature {} against public key {}, \
                     assumed valid",
                    quote(sig),
                    quote(pubkey)
                ),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_CHECKSIGVERIFY",
        "Same as OP_CHECKSIG, but removes the result and fails if it is FALSE",
        OpcodeCategory::Crypto,
        2,
        0,
        |items| {
            let (sig, pubkey) = (&items[0], &items[1]);
            let result =
                StackValue::composed(SymbolicOp::CheckSig, vec![sig.clone(), pubkey.clone()]);
            verify(
                "OP_CHECKSIGVERIFY",
                &result,
                format!(
                    "checked signature {} against public key {}",
                    quote(sig),
                    quote(pubkey)
                ),
            )
        },
    ));
    registry.register(OpcodeDefinition::dynamic(
        "OP_CHECKMULTISIG",
        "Verifies M-of-N signatures against public keys (consumes an extra dummy item)",
        OpcodeCategory::Crypto,
        multisig_depth,
        1,
        |items| {
            let (result, detail) = checkmultisig(items);
            HandlerOutput::produce(
                vec![result],
                format!("OP_CHECKMULTISIG: {}, assumed valid", detail),
            )
        },
    ));
    registry.register(OpcodeDefinition::dynamic(
        "OP_CHECKMULTISIGVERIFY",
        "Same as OP_CHECKMULTISIG, but removes the result and fails if it is FALSE",
        OpcodeCategory::Crypto,
        multisig_depth,
        0,
        |items| {
            let (result, detail) = checkmultisig(items);
            verify("OP_CHECKMULTISIGVERIFY", &result, detail)
        },
    ));
}

fn hash(name: &str, op: SymbolicOp, value: &StackValue) -> HandlerOutput {
    let digest = StackValue::composed(op, vec![value.clone()]);
    HandlerOutput::produce(
        vec![digest.clone()],
        format!(
            "{}: replaced {} with {} (symbolic, no real hashing)",
            name,
            quote(value),
            quote(&digest)
        ),
    )
}

fn count(value: &StackValue, max: usize) -> Option<usize> {
    value
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n <= max)
}

/// Stack depth OP_CHECKMULTISIG needs, read from the stack itself
///
/// Layout from the top: `N`, N public keys, `M`, M signatures, one dummy
/// element. Returns the depth needed to read the next count when the stack
/// is too shallow, so the engine reports it as insufficient.
pub(super) fn multisig_depth(stack: &[StackValue]) -> Result<usize, String> {
    let Some(top) = stack.last() else {
        return Ok(1);
    };
    let n = count(top, MAX_PUBKEYS_PER_MULTISIG).ok_or_else(|| {
        format!(
            "public key count {} is not an integer between 0 and {}",
            quote(top),
            MAX_PUBKEYS_PER_MULTISIG
        )
    })?;

    let through_m = n + 2;
    if stack.len() < through_m {
        return Ok(through_m);
    }

    let m_value = &stack[stack.len() - through_m];
    let m = count(m_value, n).ok_or_else(|| {
        format!(
            "signature count {} is not an integer between 0 and {}",
            quote(m_value),
            n
        )
    })?;

    Ok(n + m + 3)
}

/// Split consumed multisig items into their roles and build the result
fn checkmultisig(items: &[StackValue]) -> (StackValue, String) {
    let n = items
        .last()
        .and_then(|v| count(v, MAX_PUBKEYS_PER_MULTISIG))
        .unwrap_or(0);
    let m_index = items.len().saturating_sub(n + 2);
    let m = items.get(m_index).and_then(|v| count(v, n)).unwrap_or(0);

    let pubkeys = items
        .get(m_index + 1..items.len().saturating_sub(1))
        .unwrap_or(&[]);
    let sigs = items.get(1..m_index).unwrap_or(&[]);
    let dummy = items.first().map(quote).unwrap_or_default();

    let result = StackValue::composed(
        SymbolicOp::CheckMultiSig,
        vec![StackValue::Number(m as i64), StackValue::Number(n as i64)],
    );
    let detail = format!(
        "checked {} signature(s) [{}] against {} public key(s) [{}], consumed dummy element {}",
        m,
        quote_all(sigs),
        n,
        quote_all(pubkeys),
        dummy
    );
    (result, detail)
}
