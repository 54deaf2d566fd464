//! `StringStore` contract interface and calldata codec.
//!
//! The interface is compiled in with `sol!`, so selectors and encoders are
//! generated at build time and there is no runtime ABI file to load.

#[cfg(test)]
#[path = "abi_test.rs"]
mod abi_test;

use alloy_primitives::Bytes;
use alloy_sol_types::{SolCall, sol};

sol! {
    /// Single-slot string storage contract.
    interface IStringStore {
        function getMessage() external view returns (string memory);
        function setMessage(string memory newMessage) external;
    }
}

pub const GET_MESSAGE: &str = "getMessage";
pub const SET_MESSAGE: &str = "setMessage";

/// Errors produced while decoding contract return data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The call returned `0x`, usually because no contract lives at the address.
    #[error("empty return data (is the contract deployed at this address?)")]
    EmptyReturn,

    /// The return data does not match the expected ABI shape.
    #[error("return data decode failed: {0}")]
    Decode(String),

    /// A hex string from the node could not be parsed.
    #[error("invalid hex payload: {0}")]
    Hex(String),
}

/// Calldata for `getMessage()`.
#[must_use]
pub fn encode_get_message() -> Bytes {
    Bytes::from(IStringStore::getMessageCall {}.abi_encode())
}

/// Decode the `string` returned by `getMessage()`.
///
/// # Errors
///
/// Returns [`AbiError::EmptyReturn`] for `0x` and [`AbiError::Decode`] for
/// malformed data.
pub fn decode_get_message(data: &[u8]) -> Result<String, AbiError> {
    if data.is_empty() {
        return Err(AbiError::EmptyReturn);
    }
    IStringStore::getMessageCall::abi_decode_returns(data, true)
        .map(|ret| ret._0)
        .map_err(|e| AbiError::Decode(e.to_string()))
}

/// Calldata for `setMessage(newMessage)`.
#[must_use]
pub fn encode_set_message(new_message: &str) -> Bytes {
    Bytes::from(IStringStore::setMessageCall { newMessage: new_message.to_owned() }.abi_encode())
}

/// Decode a `0x`-prefixed hex payload from the node.
///
/// # Errors
///
/// Returns [`AbiError::Hex`] when the payload is not valid hex.
pub fn decode_hex(raw: &str) -> Result<Bytes, AbiError> {
    alloy_primitives::hex::decode(raw)
        .map(Bytes::from)
        .map_err(|e| AbiError::Hex(e.to_string()))
}

/// Human-readable reason from revert data (`Error(string)` or `Panic(uint256)`).
#[must_use]
pub fn revert_reason(data: &[u8]) -> Option<String> {
    alloy_sol_types::decode_revert_reason(data)
}
