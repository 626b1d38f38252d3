//! Structural pattern matching against standard script templates
//!
//! Patterns are tried in a fixed priority order and the first match wins:
//! 1. `OP_RETURN ...` → NULL_DATA
//! 2. `OP_DUP OP_HASH160 <data> OP_EQUALVERIFY OP_CHECKSIG` → P2PKH
//! 3. `OP_HASH160 <data> OP_EQUAL` → P2SH
//! 4. `<data> OP_CHECKSIG` → P2PK
//! 5. `<m> <data>{n} <n> OP_CHECKMULTISIG` with `m <= n` → MULTISIG
//! 6. anything else → UNKNOWN
//!
//! Absence of a match is a valid outcome, never an error.

use crate::types::{ScriptType, Stack, StackValue, Token};
use serde::Serialize;

/// Classification plus a learner-facing description of the pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub script_type: ScriptType,
    pub description: String,
}

impl Detection {
    fn new(script_type: ScriptType, description: impl Into<String>) -> Self {
        Self {
            script_type,
            description: description.into(),
        }
    }
}

/// Multisig parameters extracted from a bare multisig script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisigShape {
    pub required_sigs: usize,
    pub total_pubkeys: usize,
}

/// Classify a token sequence
pub fn detect(tokens: &[Token]) -> Detection {
    let Some(first) = tokens.first() else {
        return Detection::new(ScriptType::Unknown, "Empty script");
    };

    if first.is("OP_RETURN") {
        return Detection::new(
            ScriptType::NullData,
            "This is a null data output used for embedding data in the blockchain. \
             It is provably unspendable.",
        );
    }

    if is_p2pkh(tokens) {
        return Detection::new(
            ScriptType::P2PKH,
            "This is a Pay-to-Public-Key-Hash script. It requires a signature and a \
             public key that hashes to the embedded hash.",
        );
    }

    if is_p2sh(tokens) {
        return Detection::new(
            ScriptType::P2SH,
            "This is a Pay-to-Script-Hash script. The spender must provide a script \
             that hashes to the embedded hash.",
        );
    }

    if is_p2pk(tokens) {
        return Detection::new(
            ScriptType::P2PK,
            "This is a Pay-to-Public-Key script. It requires only a valid signature \
             from the specified public key.",
        );
    }

    if let Some(shape) = multisig_shape(tokens) {
        return Detection::new(
            ScriptType::Multisig,
            format!(
                "This is a {m}-of-{n} multi-signature script: any {m} of the {n} listed \
                 public keys must sign to spend.",
                m = shape.required_sigs,
                n = shape.total_pubkeys
            ),
        );
    }

    if tokens.iter().any(|t| t.is("OP_CHECKMULTISIG")) {
        return Detection::new(
            ScriptType::Unknown,
            "This script uses OP_CHECKMULTISIG but does not follow the standard \
             M-of-N multisig layout.",
        );
    }

    if tokens.iter().any(|t| t.is("OP_CHECKSIG")) {
        return Detection::new(
            ScriptType::Unknown,
            "This script uses signature verification but doesn't match standard patterns.",
        );
    }

    Detection::new(
        ScriptType::Unknown,
        "This is a custom or non-standard script that doesn't match known patterns.",
    )
}

fn is_p2pkh(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [dup, hash, data, equal_verify, checksig]
            if dup.is("OP_DUP")
                && hash.is("OP_HASH160")
                && data.is_data()
                && equal_verify.is("OP_EQUALVERIFY")
                && checksig.is("OP_CHECKSIG")
    )
}

fn is_p2sh(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [hash, data, equal]
            if hash.is("OP_HASH160") && data.is_data() && equal.is("OP_EQUAL")
    )
}

fn is_p2pk(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [pubkey, checksig] if pubkey.is_data() && checksig.is("OP_CHECKSIG")
    )
}

/// Match `<m> <data>{n} <n> OP_CHECKMULTISIG`
///
/// The final count must equal the number of data tokens between the counts
/// and the first count may not exceed it.
pub fn multisig_shape(tokens: &[Token]) -> Option<MultisigShape> {
    let [m_token, keys @ .., n_token, checkmultisig] = tokens else {
        return None;
    };
    if !checkmultisig.is("OP_CHECKMULTISIG") || keys.iter().any(|k| !k.is_data()) {
        return None;
    }

    let m = usize::try_from(m_token.small_int()?).ok()?;
    let n = usize::try_from(n_token.small_int()?).ok()?;

    (n == keys.len() && m <= n).then_some(MultisigShape {
        required_sigs: m,
        total_pubkeys: n,
    })
}

/// Symbolic unlocking data for a recognised locking template
///
/// These placeholders stand for what a matching spending script would push,
/// so the locking script can be traced to completion without combining the
/// two scripts. NULL_DATA and UNKNOWN scripts get nothing.
pub fn unlocking_placeholders(script_type: ScriptType, tokens: &[Token]) -> Stack {
    match script_type {
        ScriptType::P2PKH => vec![StackValue::literal("<sig>"), StackValue::literal("<pubkey>")],
        ScriptType::P2SH => vec![StackValue::literal("<redeem_script>")],
        ScriptType::P2PK => vec![StackValue::literal("<sig>")],
        ScriptType::Multisig => match multisig_shape(tokens) {
            // dummy element consumed by OP_CHECKMULTISIG
            Some(shape) => {
                let sigs = (1..=shape.required_sigs)
                    .map(|i| StackValue::literal(format!("<sig{}>", i)));
                std::iter::once(StackValue::Number(0)).chain(sigs).collect()
            }
            None => Stack::new(),
        },
        ScriptType::NullData | ScriptType::Unknown => Stack::new(),
    }
}
