use super::*;
use futures::executor::block_on;
use serde_json::json;

use crate::net::provider::{ETH_CHAIN_ID, ETH_SEND_TRANSACTION, ProviderError};
use crate::net::rpc::{PublicClient, RpcError};
use crate::net::testing::{ScriptedTransport, ScriptedWallet};
use crate::state::ui::NoticeKind;
use crate::state::wallet::WalletSession;

const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const ACCOUNT: &str = "0xabcdef0123456789abcdef0123456789abcdef01";
const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

fn account() -> Address {
    ACCOUNT.parse().unwrap()
}

fn connected_wallet() -> WalletState {
    let mut wallet = WalletState::default();
    wallet.restore(Some(WalletSession { account: account(), chain_id: Some(11_155_111) }));
    wallet
}

fn contract_with(transport: ScriptedTransport) -> MessageContract<ScriptedTransport> {
    MessageContract::new(PublicClient::new(transport, 11_155_111), CONTRACT.parse().unwrap())
}

fn prepared(message: &str) -> PreparedRequest {
    PreparedRequest {
        chain_id: 11_155_111,
        from: account(),
        to: CONTRACT.parse().unwrap(),
        function: "setMessage".to_owned(),
        args: vec![message.to_owned()],
        data: chain::abi::encode_set_message(message),
    }
}

/// Run the update action the way the page does.
fn run_update(
    state: &mut MessageState,
    wallet: &WalletState,
    contract: &MessageContract<ScriptedTransport>,
) -> Option<Notice> {
    let intent = match state.prepare_update(wallet) {
        Ok(intent) => intent,
        Err(blocked) => return blocked.notice(),
    };
    if !state.begin_update() {
        return None;
    }
    let result = block_on(perform_update(contract, None::<&WalletClient<ScriptedWallet>>, WriteMode::Simulate, &intent));
    state.finish_update(&intent.message, result)
}

// =============================================================
// load
// =============================================================

#[test]
fn load_success_sets_message_and_clears_error() {
    let mut state = MessageState { error: Some("old".to_owned()), ..MessageState::default() };
    let ticket = state.begin_load().unwrap();
    assert!(state.loading);
    assert_eq!(state.error, None);
    state.finish_load(ticket, Ok("Hoodie".to_owned()));
    assert!(!state.loading);
    assert_eq!(state.message, "Hoodie");
    assert_eq!(state.error, None);
}

#[test]
fn load_failure_keeps_message_and_sets_error() {
    let mut state = MessageState { message: "Polo".to_owned(), ..MessageState::default() };
    let ticket = state.begin_load().unwrap();
    state.finish_load(ticket, Err(ContractError::Network(RpcError::Timeout(30_000))));
    assert_eq!(state.message, "Polo");
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(!state.loading);
}

#[test]
fn load_is_not_reentrant() {
    let mut state = MessageState::default();
    assert!(state.begin_load().is_some());
    assert_eq!(state.begin_load(), None);
}

#[test]
fn stale_load_does_not_overwrite_newer_write() {
    let mut state = MessageState { draft: "Quarterzip".to_owned(), ..MessageState::default() };
    let load_ticket = state.begin_load().unwrap();
    assert!(state.begin_update());

    state.finish_update("Quarterzip", Ok(UpdateOutcome::Prepared(prepared("Quarterzip"))));
    state.finish_load(load_ticket, Ok("Hoodie".to_owned()));

    assert_eq!(state.message, "Quarterzip");
    assert!(!state.loading);
}

#[test]
fn refresh_finishing_during_update_does_not_drop_the_write() {
    let mut state = MessageState { draft: "Quarterzip".to_owned(), ..MessageState::default() };
    assert!(state.begin_update());
    let load_ticket = state.begin_load().unwrap();

    state.finish_load(load_ticket, Ok("Hoodie".to_owned()));
    assert_eq!(state.message, "Hoodie");

    let notice = state.finish_update("Quarterzip", Ok(UpdateOutcome::Prepared(prepared("Quarterzip"))));
    assert_eq!(notice.map(|n| n.text), Some(PREPARED_NOTICE.to_owned()));
    assert_eq!(state.message, "Quarterzip");
    assert_eq!(state.draft, "");
}

#[test]
fn refresh_started_during_update_is_dropped_if_it_lands_after() {
    let mut state = MessageState::default();
    assert!(state.begin_update());
    let load_ticket = state.begin_load().unwrap();

    state.finish_update("Polo", Ok(UpdateOutcome::Prepared(prepared("Polo"))));
    state.finish_load(load_ticket, Ok("Hoodie".to_owned()));

    assert_eq!(state.message, "Polo");
}

#[test]
fn newer_load_replaces_earlier_write() {
    let mut state = MessageState::default();
    assert!(state.begin_update());
    state.finish_update("Polo", Ok(UpdateOutcome::Prepared(prepared("Polo"))));
    let load_ticket = state.begin_load().unwrap();
    state.finish_load(load_ticket, Ok("Hoodie".to_owned()));
    assert_eq!(state.message, "Hoodie");
}

#[test]
fn failed_update_leaves_in_flight_read_applicable() {
    let mut state = MessageState { message: "Polo".to_owned(), ..MessageState::default() };
    let load_ticket = state.begin_load().unwrap();
    assert!(state.begin_update());
    state.finish_update("Hoodie", Err(ContractError::Network(RpcError::Status(502))));
    state.finish_load(load_ticket, Ok("Quarterzip".to_owned()));
    assert_eq!(state.message, "Quarterzip");
}

// =============================================================
// update
// =============================================================

#[test]
fn update_quarterzip_prepares_and_applies_optimistically() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    let mut state = MessageState { draft: "Quarterzip".to_owned(), ..MessageState::default() };

    let notice = run_update(&mut state, &connected_wallet(), &contract).unwrap();

    assert_eq!(notice.text, PREPARED_NOTICE);
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(state.last_prepared.is_some());
    assert_eq!(state.last_tx_hash, None);
    assert_eq!(state.draft, "");
    assert_eq!(state.message, "Quarterzip");
    assert!(!state.updating);
    assert_eq!(contract_requests(&contract), 1);
}

#[test]
fn update_with_blank_draft_is_noop() {
    for draft in ["", "   ", "\t\n"] {
        let contract = contract_with(ScriptedTransport::new());
        let mut state = MessageState { message: "Polo".to_owned(), draft: draft.to_owned(), ..MessageState::default() };

        assert_eq!(run_update(&mut state, &connected_wallet(), &contract), None);
        assert_eq!(state.message, "Polo");
        assert_eq!(state.draft, draft);
        assert!(!state.updating);
        assert_eq!(state.error, None);
        assert_eq!(contract_requests(&contract), 0);
    }
}

#[test]
fn update_without_wallet_asks_to_connect() {
    let contract = contract_with(ScriptedTransport::new());
    let mut state = MessageState { draft: "Hoodie".to_owned(), ..MessageState::default() };
    let notice = run_update(&mut state, &WalletState::default(), &contract);
    assert_eq!(notice, Some(Notice::warning(CONNECT_FIRST_NOTICE)));
    assert_eq!(state.draft, "Hoodie");
    assert_eq!(contract_requests(&contract), 0);
}

#[test]
fn update_while_updating_is_refused() {
    let mut state = MessageState { draft: "Hoodie".to_owned(), ..MessageState::default() };
    assert!(state.begin_update());
    assert_eq!(state.prepare_update(&connected_wallet()), Err(UpdateBlocked::Busy));
    assert!(!state.begin_update());
}

#[test]
fn update_revert_surfaces_reason_and_keeps_draft() {
    let contract = contract_with(ScriptedTransport::new().error(chain::RpcErrorObject {
        code: 3,
        message: "execution reverted: not allowed".to_owned(),
        data: None,
    }));
    let mut state = MessageState { message: "Polo".to_owned(), draft: "Hoodie".to_owned(), ..MessageState::default() };

    assert_eq!(run_update(&mut state, &connected_wallet(), &contract), None);
    assert_eq!(state.error.as_deref(), Some("Failed to update message: not allowed"));
    assert_eq!(state.message, "Polo");
    assert_eq!(state.draft, "Hoodie");
    assert_eq!(state.last_prepared, None);
}

#[test]
fn update_network_failure_uses_plain_text() {
    let err = ContractError::Network(RpcError::Status(502));
    assert_eq!(update_failure_text(&err), UPDATE_FAILED_MESSAGE);
}

#[test]
fn draft_edited_during_update_is_kept() {
    let mut state = MessageState { draft: "Hoodie".to_owned(), ..MessageState::default() };
    assert!(state.begin_update());
    state.draft = "Hoodie v2".to_owned();
    state.finish_update("Hoodie", Ok(UpdateOutcome::Prepared(prepared("Hoodie"))));
    assert_eq!(state.draft, "Hoodie v2");
    assert_eq!(state.message, "Hoodie");
}

#[test]
fn update_clears_previous_error_on_start() {
    let mut state = MessageState { error: Some(LOAD_FAILED_MESSAGE.to_owned()), ..MessageState::default() };
    assert!(state.begin_update());
    assert_eq!(state.error, None);
}

// =============================================================
// submit mode
// =============================================================

#[test]
fn submit_mode_sends_through_wallet() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    let wallet = WalletClient::new(
        ScriptedWallet::new()
            .reply(ETH_CHAIN_ID, Ok(json!("0xaa36a7")))
            .reply(ETH_SEND_TRANSACTION, Ok(json!(TX_HASH))),
        11_155_111,
    );
    let intent = UpdateIntent { message: "Polo".to_owned(), account: account() };

    let outcome = block_on(perform_update(&contract, Some(&wallet), WriteMode::Submit, &intent)).unwrap();
    assert_eq!(outcome.tx_hash(), Some(TX_HASH.parse().unwrap()));
    assert_eq!(outcome.prepared().args, vec!["Polo".to_owned()]);

    let mut state = MessageState::default();
    assert!(state.begin_update());
    let notice = state.finish_update("Polo", Ok(outcome)).unwrap();
    assert!(notice.text.starts_with("Transaction sent: 0x88df0164"));
    assert_eq!(state.last_tx_hash, Some(TX_HASH.parse().unwrap()));
}

#[test]
fn submit_mode_without_wallet_fails() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    let intent = UpdateIntent { message: "Polo".to_owned(), account: account() };
    let result = block_on(perform_update(&contract, None::<&WalletClient<ScriptedWallet>>, WriteMode::Submit, &intent));
    assert_eq!(result, Err(ContractError::NoWallet));
}

#[test]
fn submit_mode_rejection_is_update_failure() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    let wallet = WalletClient::new(
        ScriptedWallet::new()
            .reply(ETH_CHAIN_ID, Ok(json!("0xaa36a7")))
            .reply(ETH_SEND_TRANSACTION, Err(ProviderError::UserRejected)),
        11_155_111,
    );
    let intent = UpdateIntent { message: "Polo".to_owned(), account: account() };
    let err = block_on(perform_update(&contract, Some(&wallet), WriteMode::Submit, &intent)).unwrap_err();
    assert_eq!(update_failure_text(&err), UPDATE_FAILED_MESSAGE);
}

#[test]
fn submit_mode_refuses_wallet_on_wrong_chain() {
    let contract = contract_with(ScriptedTransport::new().result(json!("0x")));
    let provider = ScriptedWallet::new()
        .reply(ETH_CHAIN_ID, Ok(json!("0x1")))
        .reply(ETH_SEND_TRANSACTION, Ok(json!(TX_HASH)));
    let wallet = WalletClient::new(provider, 11_155_111);
    let intent = UpdateIntent { message: "Polo".to_owned(), account: account() };

    let err = block_on(perform_update(&contract, Some(&wallet), WriteMode::Submit, &intent)).unwrap_err();
    assert_eq!(err, ContractError::WrongChain { expected: 11_155_111, actual: 1 });
    assert_eq!(update_failure_text(&err), "Failed to update message: switch your wallet from chain 1 to chain 11155111");
    assert!(wallet.provider().methods().iter().all(|m| m != ETH_SEND_TRANSACTION));

    let mut state = MessageState { message: "Hoodie".to_owned(), draft: "Polo".to_owned(), ..MessageState::default() };
    assert!(state.begin_update());
    assert_eq!(state.finish_update("Polo", Err(err)), None);
    assert_eq!(state.message, "Hoodie");
    assert_eq!(state.draft, "Polo");
}

// =============================================================
// display
// =============================================================

#[test]
fn empty_message_shows_placeholder() {
    let mut state = MessageState::default();
    assert_eq!(state.display_message(), EMPTY_MESSAGE_LABEL);
    state.message = "Quarterzip".to_owned();
    assert_eq!(state.display_message(), "Quarterzip");
}

fn contract_requests(contract: &MessageContract<ScriptedTransport>) -> usize {
    contract.client().transport().requests().len()
}
