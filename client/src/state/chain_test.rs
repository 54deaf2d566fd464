use super::*;
use chain::config::RPC_PROXY_PATH;

fn config(write_mode: WriteMode) -> ChainConfig {
    ChainConfig {
        chain_id: 11_155_111,
        chain_name: "sepolia".to_owned(),
        rpc_url: RPC_PROXY_PATH.to_owned(),
        contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap(),
        write_mode,
        rpc_timeout_ms: 5_000,
    }
}

#[test]
fn contract_is_unavailable_until_configured() {
    let state = ChainState::default();
    assert!(matches!(state.contract(), Err(ContractError::NotConfigured)));
    assert_eq!(state.write_mode(), WriteMode::Simulate);
    assert_eq!(state.chain_id(), None);
}

#[test]
fn finish_fetch_stores_config() {
    let mut state = ChainState::default();
    assert!(state.begin_fetch());
    assert!(state.loading);
    state.finish_fetch(Ok(config(WriteMode::Submit)));

    assert!(!state.loading);
    assert_eq!(state.write_mode(), WriteMode::Submit);
    assert_eq!(state.chain_id(), Some(11_155_111));
    let contract = state.contract().unwrap();
    assert_eq!(contract.address(), config(WriteMode::Submit).contract_address);
}

#[test]
fn finish_fetch_error_is_kept_for_display() {
    let mut state = ChainState::default();
    state.begin_fetch();
    state.finish_fetch(Err("chain config request failed: 500".to_owned()));
    assert_eq!(state.error.as_deref(), Some("chain config request failed: 500"));
    assert!(state.config.is_none());
    assert!(state.begin_fetch());
    assert_eq!(state.error, None);
}

#[test]
fn begin_fetch_refused_while_loading_or_loaded() {
    let mut state = ChainState::default();
    assert!(state.begin_fetch());
    assert!(!state.begin_fetch());
    state.finish_fetch(Ok(config(WriteMode::Simulate)));
    assert!(!state.begin_fetch());
}
