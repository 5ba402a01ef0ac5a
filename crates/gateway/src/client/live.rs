use async_trait::async_trait;
use tracing::{debug, error, info};

use exchanges::{BinanceClient, NewOrder};
use interface::{AccountSnapshot, ExchangeError, OrderResult, ServerTime, Side, TimeInForce};

use super::ExchangeClient;
use crate::config::{ConfigError, GatewayConfig};

/// `exchanges::BinanceClient`에 그대로 위임하는 라이브 클라이언트.
/// 재시도, 타임아웃, 멱등 키는 두지 않는다. 실패는 호출자에게 그대로 올라간다.
pub struct LiveClient {
    client: BinanceClient,
}

impl LiveClient {
    pub fn new(client: BinanceClient) -> Self {
        Self { client }
    }

    /// 자격 증명이 둘 다 없으면 주문 메서드를 부르기 전에 실패한다.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let (api_key, api_secret) = match (&config.api_key, &config.api_secret) {
            (Some(key), Some(secret)) => (key, secret),
            _ => {
                error!("Live mode requested without BINANCE_API_KEY/BINANCE_API_SECRET");
                return Err(ConfigError::MissingCredentials);
            }
        };

        let client = BinanceClient::with_credentials(api_key, api_secret)
            .with_base_url(&config.base_url)
            .with_recv_window(config.recv_window);

        info!("Connected to Binance USD-M futures client ({})", client.base_url());

        Ok(Self::new(client))
    }
}

#[async_trait]
impl ExchangeClient for LiveClient {
    fn is_dry_run(&self) -> bool {
        false
    }

    async fn ping(&self) -> Result<ServerTime, ExchangeError> {
        debug!("Pinging Binance API...");
        self.client.time().await.map_err(|e| {
            error!("Error during ping: {}", e);
            e
        })
    }

    async fn get_account(&self) -> Result<AccountSnapshot, ExchangeError> {
        debug!("Fetching account information...");
        self.client.account().await.map_err(|e| {
            error!("Error fetching account info: {}", e);
            e
        })
    }

    async fn get_balance(&self, asset: &str) -> Result<f64, ExchangeError> {
        let account = self.get_account().await?;
        Ok(account.wallet_balance(asset))
    }

    async fn create_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        reduce_only: bool,
    ) -> Result<OrderResult, ExchangeError> {
        info!(
            "Placing MARKET order: {} {} {} (reduce only: {})",
            side, quantity, symbol, reduce_only
        );

        let order = NewOrder::market(symbol, side, quantity).reduce_only(reduce_only);

        match self.client.new_order(&order).await {
            Ok(order) => {
                info!("Market order placed: {:?}", order.order_id);
                Ok(OrderResult::Live { order })
            }
            Err(e) => {
                error!("Failed to place market order: {} {}: {}", side, symbol, e);
                Err(e)
            }
        }
    }

    async fn create_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        price: f64,
        time_in_force: TimeInForce,
        reduce_only: bool,
    ) -> Result<OrderResult, ExchangeError> {
        info!(
            "Placing LIMIT order: {} {} {} @ {} (reduce only: {})",
            side, quantity, symbol, price, reduce_only
        );

        let order = NewOrder::limit(symbol, side, quantity, price, time_in_force)
            .reduce_only(reduce_only);

        match self.client.new_order(&order).await {
            Ok(order) => {
                info!("Limit order placed: {:?}", order.order_id);
                Ok(OrderResult::Live { order })
            }
            Err(e) => {
                error!(
                    "Failed to place limit order: {} {} @ {}: {}",
                    side, symbol, price, e
                );
                Err(e)
            }
        }
    }
}
