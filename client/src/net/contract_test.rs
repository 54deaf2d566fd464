use super::*;
use futures::executor::block_on;
use serde_json::json;

use crate::net::provider::{ETH_CHAIN_ID, ETH_SEND_TRANSACTION};
use crate::net::testing::{ScriptedTransport, ScriptedWallet, encoded_string};
use alloy_sol_types::{Revert, SolError};
use chain::RpcErrorObject;

const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const ACCOUNT: &str = "0xabcdef0123456789abcdef0123456789abcdef01";

/// `Error(string)` revert payload, hex encoded.
fn revert_data(reason: &str) -> String {
    chain::hex::encode_prefixed(Revert { reason: reason.to_owned() }.abi_encode())
}

fn contract_with(transport: ScriptedTransport) -> MessageContract<ScriptedTransport> {
    MessageContract::new(PublicClient::new(transport, 11_155_111), CONTRACT.parse().unwrap())
}

fn account() -> Address {
    ACCOUNT.parse().unwrap()
}

#[test]
fn get_message_decodes_string() {
    let contract = contract_with(ScriptedTransport::new().result(json!(encoded_string("Hoodie"))));
    assert_eq!(block_on(contract.get_message()), Ok("Hoodie".to_owned()));
}

#[test]
fn get_message_targets_contract_with_selector() {
    let contract = contract_with(ScriptedTransport::new().result(json!(encoded_string(""))));
    assert_eq!(block_on(contract.get_message()), Ok(String::new()));
    let sent = contract.client.transport().requests();
    let call = &sent[0].params[0];
    assert_eq!(call["to"].as_str().unwrap().to_lowercase(), CONTRACT.to_lowercase());
    assert_eq!(call["data"].as_str().unwrap(), abi::encode_get_message().to_string());
}

#[test]
fn get_message_propagates_network_error() {
    let contract = contract_with(ScriptedTransport::new().fail(RpcError::Status(502)));
    assert_eq!(block_on(contract.get_message()), Err(ContractError::Network(RpcError::Status(502))));
}

#[test]
fn get_message_empty_return_is_decode_error() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    assert_eq!(block_on(contract.get_message()), Err(ContractError::Abi(AbiError::EmptyReturn)));
}

#[test]
fn set_message_returns_prepared_request_without_broadcast() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    let prepared = block_on(contract.set_message("Quarterzip", account())).unwrap();

    assert_eq!(prepared.from, account());
    assert_eq!(prepared.to, contract.address());
    assert_eq!(prepared.function, "setMessage");
    assert_eq!(prepared.args, vec!["Quarterzip".to_owned()]);
    assert_eq!(prepared.chain_id, 11_155_111);
    assert_eq!(prepared.data, abi::encode_set_message("Quarterzip"));

    let sent = contract.client.transport().requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "eth_call");
    assert_eq!(sent[0].params[0]["from"].as_str().unwrap().to_lowercase(), ACCOUNT);
}

#[test]
fn set_message_decodes_revert_reason() {
    let contract = contract_with(ScriptedTransport::new().error(RpcErrorObject {
        code: 3,
        message: "execution reverted: Ownable: caller is not the owner".to_owned(),
        data: Some(json!(revert_data("Ownable: caller is not the owner"))),
    }));
    let err = block_on(contract.set_message("Polo", account())).unwrap_err();
    assert_eq!(err.revert_reason(), Some("Ownable: caller is not the owner"));
}

#[test]
fn revert_reason_falls_back_to_message_text() {
    let err = ContractError::from(RpcError::Rpc {
        code: -32000,
        message: "execution reverted: paused".to_owned(),
        data: None,
    });
    assert_eq!(err, ContractError::Reverted { reason: Some("paused".to_owned()) });
}

#[test]
fn non_revert_rpc_error_stays_network_error() {
    let err = ContractError::from(RpcError::Rpc { code: -32005, message: "rate limited".to_owned(), data: None });
    assert!(matches!(err, ContractError::Network(_)));
    assert_eq!(err.revert_reason(), None);
}

#[test]
fn reverted_error_display_includes_reason() {
    let err = ContractError::Reverted { reason: None };
    assert_eq!(err.to_string(), "execution reverted: no reason given");
}

const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

fn prepared_hoodie() -> PreparedRequest {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    block_on(contract.set_message("Hoodie", account())).unwrap()
}

#[test]
fn submit_sends_prepared_transaction_through_wallet() {
    let prepared = prepared_hoodie();
    let wallet = WalletClient::new(
        ScriptedWallet::new()
            .reply(ETH_CHAIN_ID, Ok(json!("0xaa36a7")))
            .reply(ETH_SEND_TRANSACTION, Ok(json!(TX_HASH))),
        11_155_111,
    );
    let tx_hash = block_on(submit(&wallet, &prepared)).unwrap();
    assert_eq!(tx_hash, TX_HASH.parse::<B256>().unwrap());

    let (method, params) = wallet_calls(&wallet).pop().unwrap();
    assert_eq!(method, ETH_SEND_TRANSACTION);
    assert_eq!(params[0]["chainId"], "0xaa36a7");
    assert_eq!(params[0]["data"], prepared.data.to_string());
}

#[test]
fn submit_refuses_wallet_on_other_chain() {
    let prepared = prepared_hoodie();
    let wallet = WalletClient::new(
        ScriptedWallet::new()
            .reply(ETH_CHAIN_ID, Ok(json!("0x1")))
            .reply(ETH_SEND_TRANSACTION, Ok(json!(TX_HASH))),
        11_155_111,
    );
    assert_eq!(
        block_on(submit(&wallet, &prepared)),
        Err(ContractError::WrongChain { expected: 11_155_111, actual: 1 })
    );
    let methods: Vec<_> = wallet_calls(&wallet).into_iter().map(|(m, _)| m).collect();
    assert_eq!(methods, vec![ETH_CHAIN_ID.to_owned()]);
}

#[test]
fn submit_fails_when_wallet_chain_is_unknown() {
    let prepared = prepared_hoodie();
    let wallet = WalletClient::new(ScriptedWallet::new(), 11_155_111);
    assert!(matches!(block_on(submit(&wallet, &prepared)), Err(ContractError::Wallet(_))));
}

#[test]
fn submit_maps_rejection_to_wallet_error() {
    let prepared = prepared_hoodie();
    let wallet = WalletClient::new(
        ScriptedWallet::new()
            .reply(ETH_CHAIN_ID, Ok(json!("0xaa36a7")))
            .reply(ETH_SEND_TRANSACTION, Err(ProviderError::UserRejected)),
        11_155_111,
    );
    assert_eq!(block_on(submit(&wallet, &prepared)), Err(ContractError::Wallet(ProviderError::UserRejected)));
}

fn wallet_calls(wallet: &WalletClient<ScriptedWallet>) -> Vec<(String, serde_json::Value)> {
    wallet.provider().calls()
}
