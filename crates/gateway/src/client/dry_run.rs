use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use interface::{
    AccountSnapshot, DryRunAction, DryRunDetail, ExchangeError, OrderPayload, OrderResult,
    OrderType, ServerTime, Side, TimeInForce,
};

use super::ExchangeClient;

const DRY_RUN_STATUS: &str = "dry-run";

/// dry-run에서 어떤 자산을 물어봐도 돌려주는 잔고
pub const MOCK_BALANCE: f64 = 10000.0;

/// 실제 주문 없이 요청을 그대로 되돌려주는 클라이언트
#[derive(Debug, Clone, Default)]
pub struct DryRunClient;

impl DryRunClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExchangeClient for DryRunClient {
    fn is_dry_run(&self) -> bool {
        true
    }

    async fn ping(&self) -> Result<ServerTime, ExchangeError> {
        debug!("Pinging exchange (dry-run)...");
        Ok(ServerTime {
            status: Some(DRY_RUN_STATUS.to_string()),
            server_time: Utc::now().timestamp_millis(),
        })
    }

    async fn get_account(&self) -> Result<AccountSnapshot, ExchangeError> {
        debug!("Fetching account information (dry-run)...");
        Ok(AccountSnapshot {
            status: Some(DRY_RUN_STATUS.to_string()),
            assets: Vec::new(),
            positions: Vec::new(),
            can_deposit: true,
            can_trade: true,
            can_withdraw: true,
            fee_tier: 0,
            update_time: Utc::now().timestamp_millis(),
            extra: serde_json::Map::new(),
        })
    }

    async fn get_balance(&self, asset: &str) -> Result<f64, ExchangeError> {
        debug!("Returning mock balance for {}", asset);
        Ok(MOCK_BALANCE)
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

        Ok(OrderResult::dry_run(
            DryRunAction::CreateMarketOrder,
            DryRunDetail::Order {
                payload: OrderPayload {
                    symbol: symbol.to_string(),
                    side,
                    order_type: OrderType::Market,
                    quantity,
                    price: None,
                    time_in_force: None,
                    reduce_only,
                },
            },
        ))
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

        Ok(OrderResult::dry_run(
            DryRunAction::CreateLimitOrder,
            DryRunDetail::Order {
                payload: OrderPayload {
                    symbol: symbol.to_string(),
                    side,
                    order_type: OrderType::Limit,
                    quantity,
                    price: Some(price.to_string()),
                    time_in_force: Some(time_in_force),
                    reduce_only,
                },
            },
        ))
    }
}
