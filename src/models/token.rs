use std::fmt;

use serde::{Deserialize, Serialize};

/// What to look up: one token, one wallet, optionally one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenQuery {
    pub token_contract_address: String,
    pub wallet_address: String,
    /// Falls back to the configured default endpoint when `None`.
    pub provider_url: Option<String>,
}

impl TokenQuery {
    pub fn new(token_contract_address: impl Into<String>, wallet_address: impl Into<String>) -> Self {
        Self {
            token_contract_address: token_contract_address.into(),
            wallet_address: wallet_address.into(),
            provider_url: None,
        }
    }

    pub fn with_provider_url(mut self, provider_url: impl Into<String>) -> Self {
        self.provider_url = Some(provider_url.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub address: String,
    pub balance: String,
    // Set by the token contract; display text only.
    pub symbol: String,
    pub decimals: u8,
}

impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.balance, self.symbol)
    }
}

#[derive(Debug, Deserialize)]
pub struct BalanceParams {
    pub wallet_address: String,
    pub provider_url: Option<String>,
}

impl BalanceParams {
    pub fn into_query(self, token_contract_address: String) -> TokenQuery {
        let query = TokenQuery::new(token_contract_address, self.wallet_address);
        match self.provider_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => query.with_provider_url(url),
            None => query,
        }
    }
}
