use async_trait::async_trait;
use ethers::{
    contract::abigen,
    providers::{Http, Middleware, Provider},
    types::{Address, U256},
};
use futures::future::try_join3;
use reqwest::Url;
use std::{fmt, str::FromStr, sync::Arc, time::Duration};

use crate::{
    config::Config,
    errors::BalanceFetchError,
    models::token::{TokenBalance, TokenQuery},
};

use super::units::format_units;

// Read-only subset of ERC-20 needed to show a balance
abigen!(
    Erc20,
    r#"[
        function balanceOf(address owner) view returns (uint256)
        function decimals() view returns (uint8)
        function symbol() view returns (string)
    ]"#
);

pub type ReadError = Box<dyn std::error::Error + Send + Sync>;

/// The three token reads a balance is assembled from.
#[async_trait]
pub trait TokenReader: Send + Sync {
    async fn balance_of(&self, owner: Address) -> Result<U256, ReadError>;

    async fn decimals(&self) -> Result<u8, ReadError>;

    async fn symbol(&self) -> Result<String, ReadError>;
}

#[async_trait]
impl<M: Middleware + 'static> TokenReader for Erc20<M> {
    async fn balance_of(&self, owner: Address) -> Result<U256, ReadError> {
        Ok(Erc20::balance_of(self, owner).call().await?)
    }

    async fn decimals(&self) -> Result<u8, ReadError> {
        Ok(Erc20::decimals(self).call().await?)
    }

    async fn symbol(&self) -> Result<String, ReadError> {
        Ok(Erc20::symbol(self).call().await?)
    }
}

const REDACTED_URL: &str = "<provider url>";

/// Logs the underlying cause and wraps it for the caller.
fn fetch_error<E: fmt::Display>(cause: E) -> BalanceFetchError {
    log::error!("Token balance fetch error: {}", cause);
    BalanceFetchError::new(cause)
}

/// Replaces each non-empty `secret` in `message`. Provider URLs often embed
/// an API key and transport errors quote the URL they failed on.
fn redact(message: &str, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|secret| !secret.is_empty())
        .fold(message.to_string(), |message, secret| {
            message.replace(secret, REDACTED_URL)
        })
}

/// Reads balance, decimals and symbol concurrently and combines them.
///
/// `token_address` is echoed back unchanged in the result. The first failing
/// read fails the whole lookup with that read's error.
pub async fn read_token_balance<R>(
    reader: &R,
    token_address: &str,
    owner: Address,
) -> Result<TokenBalance, ReadError>
where
    R: TokenReader + ?Sized,
{
    let (raw_balance, decimals, symbol) =
        try_join3(reader.balance_of(owner), reader.decimals(), reader.symbol()).await?;

    Ok(TokenBalance {
        address: token_address.to_string(),
        balance: format_units(raw_balance, decimals),
        symbol,
        decimals,
    })
}

async fn query_token<M: Middleware + 'static>(
    client: M,
    query: &TokenQuery,
) -> Result<TokenBalance, ReadError> {
    let token_address = Address::from_str(&query.token_contract_address).map_err(|e| {
        format!(
            "invalid token address {}: {}",
            query.token_contract_address, e
        )
    })?;
    let wallet_address = Address::from_str(&query.wallet_address)
        .map_err(|e| format!("invalid wallet address {}: {}", query.wallet_address, e))?;

    let contract = Erc20::new(token_address, Arc::new(client));

    read_token_balance(&contract, &query.token_contract_address, wallet_address).await
}

/// Runs `query` against an already connected client. Any failure is logged
/// and returned as a [`BalanceFetchError`] with every string in `secrets`
/// scrubbed from its message.
pub async fn resolve_with<M: Middleware + 'static>(
    client: M,
    query: &TokenQuery,
    secrets: &[&str],
) -> Result<TokenBalance, BalanceFetchError> {
    let balance = query_token(client, query)
        .await
        .map_err(|cause| fetch_error(redact(&cause.to_string(), secrets)))?;

    log::debug!(
        "Resolved {} {} for wallet {}",
        balance.balance,
        balance.symbol,
        query.wallet_address
    );

    Ok(balance)
}

#[derive(Clone, Debug)]
pub struct BalanceResolver {
    default_provider_url: String,
    rpc_timeout: Duration,
}

impl BalanceResolver {
    pub fn new(default_provider_url: impl Into<String>, rpc_timeout: Duration) -> Self {
        Self {
            default_provider_url: default_provider_url.into(),
            rpc_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_provider_url.clone(), config.rpc_timeout)
    }

    /// Resolve the balance of `query.wallet_address` in the token at
    /// `query.token_contract_address`.
    ///
    /// Opens a fresh connection per call; nothing is shared between calls.
    /// The provider URL never appears in the returned error.
    pub async fn resolve_balance(&self, query: &TokenQuery) -> Result<TokenBalance, BalanceFetchError> {
        let provider_url = query
            .provider_url
            .as_deref()
            .unwrap_or(&self.default_provider_url);

        let url = Url::parse(provider_url)
            .map_err(|e| fetch_error(format!("invalid provider url: {}", e)))?;
        let provider = self.connect(url.clone())?;

        resolve_with(provider, query, &[url.as_str(), provider_url]).await
    }

    fn connect(&self, url: Url) -> Result<Provider<Http>, BalanceFetchError> {
        let client = reqwest::Client::builder()
            .timeout(self.rpc_timeout)
            .build()
            .map_err(fetch_error)?;

        Ok(Provider::new(Http::new_with_client(url, client)))
    }
}
