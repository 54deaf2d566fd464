//! Address formatting for display.

#[cfg(test)]
#[path = "address_test.rs"]
mod address_test;

use chain::Address;

/// Shorten an address to `0x1234...abcd` using its checksummed form.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Block explorer link for a transaction, for chains we know an explorer for.
pub fn explorer_tx_url(chain_id: u64, tx_hash: &str) -> Option<String> {
    let base = match chain_id {
        1 => "https://etherscan.io",
        11_155_111 => "https://sepolia.etherscan.io",
        _ => return None,
    };
    Some(format!("{base}/tx/{tx_hash}"))
}
