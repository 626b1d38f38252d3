//! Standard script pattern classifications

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical script shapes recognised by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptType {
    /// Pay-to-Public-Key-Hash (standard address)
    #[serde(rename = "P2PKH")]
    P2PKH,
    /// Pay-to-Script-Hash
    #[serde(rename = "P2SH")]
    P2SH,
    /// Pay-to-PubKey (legacy)
    #[serde(rename = "P2PK")]
    P2PK,
    /// Bare M-of-N multisig
    #[serde(rename = "MULTISIG")]
    Multisig,
    /// OP_RETURN data carrier
    #[serde(rename = "NULL_DATA")]
    NullData,
    /// Anything that does not match a standard template
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Reference information about a script type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTypeInfo {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub usage: &'static str,
    pub security: &'static str,
    pub address_prefix: &'static str,
}

impl ScriptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::P2PKH => "P2PKH",
            ScriptType::P2SH => "P2SH",
            ScriptType::P2PK => "P2PK",
            ScriptType::Multisig => "MULTISIG",
            ScriptType::NullData => "NULL_DATA",
            ScriptType::Unknown => "UNKNOWN",
        }
    }

    pub fn info(&self) -> ScriptTypeInfo {
        match self {
            ScriptType::P2PKH => ScriptTypeInfo {
                name: "Pay-to-Public-Key-Hash",
                abbreviation: "P2PKH",
                usage: "Most common type for regular Bitcoin addresses (starting with 1)",
                security: "Requires knowledge of the private key to spend",
                address_prefix: "1",
            },
            ScriptType::P2SH => ScriptTypeInfo {
                name: "Pay-to-Script-Hash",
                abbreviation: "P2SH",
                usage: "Used for multisig, wrapped SegWit and other complex scripts",
                security: "The redeem script's conditions must be satisfied to spend",
                address_prefix: "3",
            },
            ScriptType::P2PK => ScriptTypeInfo {
                name: "Pay-to-Public-Key",
                abbreviation: "P2PK",
                usage: "Early Bitcoin transactions, now rarely used",
                security: "Less private than P2PKH as the public key is exposed",
                address_prefix: "N/A (no address format)",
            },
            ScriptType::Multisig => ScriptTypeInfo {
                name: "Multi-signature",
                abbreviation: "Multisig",
                usage: "Requires M-of-N signatures to spend",
                security: "Enhanced security through key distribution",
                address_prefix: "Usually wrapped in P2SH",
            },
            ScriptType::NullData => ScriptTypeInfo {
                name: "Null Data / OP_RETURN",
                abbreviation: "OP_RETURN",
                usage: "Embedding arbitrary data in the blockchain",
                security: "Provably unspendable output",
                address_prefix: "N/A (not spendable)",
            },
            ScriptType::Unknown => ScriptTypeInfo {
                name: "Unknown / Custom",
                abbreviation: "Custom",
                usage: "Non-standard script patterns",
                security: "Depends on script logic",
                address_prefix: "N/A",
            },
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
