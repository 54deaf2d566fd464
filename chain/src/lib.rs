//! Shared chain model for the StringStore client and host server.
//!
//! This crate owns everything both sides must agree on: the public chain
//! configuration handed to the browser, the JSON-RPC 2.0 envelope, and the
//! `StringStore` contract ABI. It stays free of transport code so it builds
//! unchanged for native and `wasm32` targets.

pub mod abi;
pub mod config;
pub mod rpc;

pub use abi::AbiError;
pub use alloy_primitives::{Address, B256, Bytes, hex};
pub use config::{ChainConfig, ConfigError, WriteMode};
pub use rpc::{CallRequest, RpcErrorObject, RpcRequest, RpcResponse, TransactionRequest};
