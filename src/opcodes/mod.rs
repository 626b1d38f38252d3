//! Opcode registry and symbolic handlers
//!
//! Every supported opcode is described by an [`OpcodeDefinition`]: its name,
//! a learner-facing description, a category, an [`Arity`] and a pure handler
//! mapping the consumed stack items to the produced items plus an explanation.
//!
//! Handlers are grouped by family:
//! - `constants`: OP_0..OP_16 and OP_1NEGATE
//! - `flow`: OP_NOP, OP_VERIFY, OP_RETURN and the locktime checks
//! - `stack_ops`: stack manipulation and OP_SIZE
//! - `arithmetic`: equality, boolean logic and integer arithmetic
//! - `crypto`: hashing and signature checks (all symbolic)
//!
//! The process-wide registry is built once on first use and never mutated, so
//! concurrent callers share it without locking.

mod arithmetic;
mod constants;
mod crypto;
mod flow;
mod stack_ops;

use crate::errors::UnknownOpcodeError;
use crate::types::StackValue;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Policy limit on public keys in one OP_CHECKMULTISIG
pub const MAX_PUBKEYS_PER_MULTISIG: usize = 20;

lazy_static! {
    static ref REGISTRY: OpcodeRegistry = OpcodeRegistry::standard();
}

/// What execution should do after a handler ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Continue,
    /// Halt with this failure message (VERIFY-class opcodes)
    Fail(String),
    /// Continue, but the script can never be spent (OP_RETURN)
    Unspendable,
}

/// Items a handler leaves on the stack and how it explains itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutput {
    pub produced: Vec<StackValue>,
    pub explanation: String,
    pub effect: Effect,
}

impl HandlerOutput {
    pub fn produce(produced: Vec<StackValue>, explanation: String) -> Self {
        Self {
            produced,
            explanation,
            effect: Effect::Continue,
        }
    }

    pub fn fail(explanation: String, failure: String) -> Self {
        Self {
            produced: Vec::new(),
            explanation,
            effect: Effect::Fail(failure),
        }
    }
}

/// Handler over the consumed items, ordered bottom to top
pub type Handler = Box<dyn Fn(&[StackValue]) -> HandlerOutput + Send + Sync>;

/// Computes the required stack depth from the current stack
///
/// An `Err` means the stack holds a value the opcode cannot interpret.
pub type DepthResolver = fn(&[StackValue]) -> Result<usize, String>;

/// Stack requirement of an opcode
#[derive(Clone, Copy)]
pub enum Arity {
    Fixed { consumes: usize, produces: usize },
    Dynamic { resolver: DepthResolver, produces: usize },
}

impl Arity {
    /// Number of items the opcode consumes given the current stack
    pub fn required_depth(&self, stack: &[StackValue]) -> Result<usize, String> {
        match self {
            Arity::Fixed { consumes, .. } => Ok(*consumes),
            Arity::Dynamic { resolver, .. } => resolver(stack),
        }
    }

    pub fn produces(&self) -> usize {
        match self {
            Arity::Fixed { produces, .. } | Arity::Dynamic { produces, .. } => *produces,
        }
    }
}

impl fmt::Debug for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed { consumes, produces } => f
                .debug_struct("Fixed")
                .field("consumes", consumes)
                .field("produces", produces)
                .finish(),
            Arity::Dynamic { produces, .. } => f
                .debug_struct("Dynamic")
                .field("produces", produces)
                .finish_non_exhaustive(),
        }
    }
}

/// Opcode family, used by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpcodeCategory {
    Constant,
    FlowControl,
    Stack,
    Splice,
    Bitwise,
    Arithmetic,
    Crypto,
    Locktime,
}

/// Handler descriptor for one opcode
pub struct OpcodeDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub category: OpcodeCategory,
    pub arity: Arity,
    handler: Handler,
}

impl OpcodeDefinition {
    pub fn fixed(
        name: &'static str,
        description: &'static str,
        category: OpcodeCategory,
        consumes: usize,
        produces: usize,
        handler: impl Fn(&[StackValue]) -> HandlerOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            description,
            category,
            arity: Arity::Fixed { consumes, produces },
            handler: Box::new(handler),
        }
    }

    pub fn dynamic(
        name: &'static str,
        description: &'static str,
        category: OpcodeCategory,
        resolver: DepthResolver,
        produces: usize,
        handler: impl Fn(&[StackValue]) -> HandlerOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            description,
            category,
            arity: Arity::Dynamic { resolver, produces },
            handler: Box::new(handler),
        }
    }

    /// Run the handler over exactly the consumed items
    pub fn apply(&self, consumed: &[StackValue]) -> HandlerOutput {
        (self.handler)(consumed)
    }
}

impl fmt::Debug for OpcodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeDefinition")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Catalog entry for documentation and UI consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpcodeInfo {
    pub name: String,
    pub description: String,
    pub category: OpcodeCategory,
}

/// Result of looking up a single opcode by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpcodeLookup {
    pub opcode: String,
    pub known: bool,
    pub description: String,
}

/// Name → handler mapping
#[derive(Debug, Default)]
pub struct OpcodeRegistry {
    definitions: Vec<OpcodeDefinition>,
    index: HashMap<&'static str, usize>,
    aliases: HashMap<&'static str, &'static str>,
}

impl OpcodeRegistry {
    /// Registry with every supported opcode
    pub fn standard() -> Self {
        let mut registry = Self::default();
        constants::register(&mut registry);
        flow::register(&mut registry);
        stack_ops::register(&mut registry);
        arithmetic::register(&mut registry);
        crypto::register(&mut registry);

        registry.alias("OP_FALSE", "OP_0");
        registry.alias("OP_TRUE", "OP_1");
        registry.alias("OP_NOP2", "OP_CHECKLOCKTIMEVERIFY");
        registry.alias("OP_NOP3", "OP_CHECKSEQUENCEVERIFY");
        registry
    }

    /// Shared process-wide registry
    pub fn global() -> &'static OpcodeRegistry {
        &REGISTRY
    }

    fn register(&mut self, definition: OpcodeDefinition) {
        self.index.insert(definition.name, self.definitions.len());
        self.definitions.push(definition);
    }

    fn alias(&mut self, alias: &'static str, target: &'static str) {
        self.aliases.insert(alias, target);
    }

    /// Look up an opcode by name, case-insensitively, resolving aliases
    pub fn lookup(&self, name: &str) -> Result<&OpcodeDefinition, UnknownOpcodeError> {
        let canonical = name.to_ascii_uppercase();
        let target = self
            .aliases
            .get(canonical.as_str())
            .copied()
            .unwrap_or(canonical.as_str());

        self.index
            .get(target)
            .map(|&i| &self.definitions[i])
            .ok_or(UnknownOpcodeError { opcode: canonical })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Catalog of canonical opcodes in registration order
    pub fn catalog(&self) -> Vec<OpcodeInfo> {
        self.definitions
            .iter()
            .map(|definition| OpcodeInfo {
                name: definition.name.to_string(),
                description: definition.description.to_string(),
                category: definition.category,
            })
            .collect()
    }
}

/// Read-only opcode catalog derived from the registry
pub fn list_opcodes() -> Vec<OpcodeInfo> {
    OpcodeRegistry::global().catalog()
}

/// Describe a single opcode, whether or not it is supported
pub fn opcode_info(name: &str) -> OpcodeLookup {
    let opcode = name.trim().to_ascii_uppercase();
    match OpcodeRegistry::global().lookup(&opcode) {
        Ok(definition) => OpcodeLookup {
            opcode,
            known: true,
            description: definition.description.to_string(),
        },
        Err(_) => OpcodeLookup {
            description: format!("Unknown opcode: {}", opcode),
            opcode,
            known: false,
        },
    }
}

/// Describe a value as `'x'` for explanations
pub(crate) fn quote(value: &StackValue) -> String {
    format!("'{}'", value)
}

/// Describe several values as `'a', 'b'` for explanations
pub(crate) fn quote_all(values: &[StackValue]) -> String {
    values.iter().map(quote).collect::<Vec<_>>().join(", ")
}
