//! Binary serialization and deserialization of compiled rules.
//!
//! Persists a compiled [`Rule`](crate::Rule)'s source text and RPN program so
//! that expression compilation can be skipped on reload. Actions are never
//! serialized; decoding takes the condition registry and re-checks every
//! operand name against it.
//!
//! ## Wire Format
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic bytes: b"BLEX"
//! 4       2     Format version (u16, little-endian)
//! 6       2     Engine version (u16, little-endian)
//! 8       4     Flags (u32, reserved)
//! 12      4     Payload length in bytes (u32, little-endian)
//! 16      16    BLAKE3 hash of the payload (truncated to 16 bytes)
//! 32..    var   Bincode-encoded payload
//! ```
//!
//! The format version in the header must match exactly; otherwise decoding
//! fails with [`DeserializeError::IncompatibleVersion`]. The engine version
//! is informational only.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Condition, RpnToken, Rule};

const MAGIC: &[u8; 4] = b"BLEX";
const FORMAT_VERSION: u16 = 1;
const ENGINE_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

/// Errors that can occur when serializing a [`Rule`](crate::Rule) to bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode rule: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("I/O error during serialization: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when deserializing a [`Rule`](crate::Rule) from bytes.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not a boolex binary: invalid magic bytes")]
    BadMagic,

    #[error("incompatible format version: blob is v{blob}, engine supports v{supported}")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("integrity check failed: BLAKE3 checksum mismatch")]
    ChecksumMismatch,

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("I/O error during deserialization: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedRule {
    source: String,
    program: Vec<SerializedToken>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum SerializedToken {
    And,
    Or,
    Not,
    Operand(String),
}

fn serialize_token(token: &RpnToken) -> SerializedToken {
    match token {
        RpnToken::And => SerializedToken::And,
        RpnToken::Or => SerializedToken::Or,
        RpnToken::Not => SerializedToken::Not,
        RpnToken::Operand(name) => SerializedToken::Operand(name.clone()),
    }
}

fn deserialize_token(token: SerializedToken) -> RpnToken {
    match token {
        SerializedToken::And => RpnToken::And,
        SerializedToken::Or => RpnToken::Or,
        SerializedToken::Not => RpnToken::Not,
        SerializedToken::Operand(name) => RpnToken::Operand(name),
    }
}

/// Serialize a compiled rule into the header + payload wire format.
pub(crate) fn encode(rule: &Rule) -> Result<Vec<u8>, SerializeError> {
    let serialized = SerializedRule {
        source: rule.expr.clone(),
        program: rule.rpn.iter().map(serialize_token).collect(),
    };
    let payload = bincode::serde::encode_to_vec(&serialized, bincode::config::standard())?;

    let hash = blake3::hash(&payload);
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&ENGINE_VERSION.to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());
    out.extend_from_slice(&u32::try_from(payload.len()).unwrap_or(u32::MAX).to_le_bytes());
    out.extend_from_slice(&hash.as_bytes()[..16]);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode a rule previously produced by [`encode`], re-binding it to `cond`.
///
/// Every operand in the decoded program must still be registered in `cond`,
/// and the program must satisfy the evaluator's arity invariant.
pub(crate) fn decode(bytes: &[u8], cond: Arc<Condition>) -> Result<Rule, DeserializeError> {
    if bytes.len() < HEADER_SIZE || &bytes[0..4] != MAGIC {
        return Err(DeserializeError::BadMagic);
    }

    let format_version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload_len = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != payload_len as usize {
        return Err(DeserializeError::LengthMismatch {
            expected: payload_len,
            actual: payload.len(),
        });
    }

    let hash = blake3::hash(payload);
    if hash.as_bytes()[..16] != bytes[16..32] {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (serialized, _): (SerializedRule, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;

    let program: Vec<RpnToken> = serialized
        .program
        .into_iter()
        .map(deserialize_token)
        .collect();
    validate_program(&program, &cond)?;

    Ok(Rule {
        expr: serialized.source,
        rpn: program,
        cond,
    })
}

/// Reject programs that would violate the evaluator's invariants: every
/// operand must be registered, and the token sequence must reduce to exactly
/// one value.
fn validate_program(program: &[RpnToken], cond: &Condition) -> Result<(), DeserializeError> {
    let mut depth: usize = 0;
    for token in program {
        match token {
            RpnToken::Operand(name) => {
                if !cond.has(name) {
                    return Err(DeserializeError::Validation(format!(
                        "operand '{name}' is not registered in the condition registry"
                    )));
                }
                depth += 1;
            }
            RpnToken::Not => {
                if depth == 0 {
                    return Err(DeserializeError::Validation(
                        "program underflows on '!'".to_owned(),
                    ));
                }
            }
            RpnToken::And | RpnToken::Or => {
                if depth < 2 {
                    return Err(DeserializeError::Validation(
                        "program underflows on a binary operator".to_owned(),
                    ));
                }
                depth -= 1;
            }
        }
    }
    if depth != 1 {
        return Err(DeserializeError::Validation(format!(
            "program reduces to {depth} values, expected exactly 1"
        )));
    }
    Ok(())
}
