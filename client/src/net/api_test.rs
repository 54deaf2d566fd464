use super::*;

#[test]
fn chain_config_endpoint_is_api_scoped() {
    assert_eq!(CHAIN_CONFIG_ENDPOINT, "/api/chain/config");
}

#[test]
fn config_request_failed_message_formats_status() {
    assert_eq!(config_request_failed_message(503), "chain config request failed: 503");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn fetch_chain_config_is_unavailable_on_server() {
    let result = futures::executor::block_on(fetch_chain_config());
    assert_eq!(result, Err("not available on server".to_owned()));
}
