//! 거래소 클라이언트 파사드
//!
//! - `dry_run`: 네트워크 없이 입력을 되돌려주는 구현체
//! - `live`: `exchanges::BinanceClient`에 위임하는 구현체 (`live` feature)
//!
//! 파사드는 입력을 다시 검증하지 않는다. 검증은 주문 커맨드(`crate::orders`)가 끝낸 상태로 들어온다.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use interface::{AccountSnapshot, ExchangeError, OrderResult, ServerTime, Side, TimeInForce};

use crate::config::{ConfigError, GatewayConfig};

pub mod dry_run;
#[cfg(feature = "live")]
pub mod live;

pub use dry_run::DryRunClient;
#[cfg(feature = "live")]
pub use live::LiveClient;

/// 주문 커맨드와 HTTP 핸들러가 의존하는 거래소 인터페이스.
/// dry-run 여부는 인스턴스 생성 시 정해지고 이후 바뀌지 않는다.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    fn is_dry_run(&self) -> bool;

    async fn ping(&self) -> Result<ServerTime, ExchangeError>;

    async fn get_account(&self) -> Result<AccountSnapshot, ExchangeError>;

    async fn get_balance(&self, asset: &str) -> Result<f64, ExchangeError>;

    async fn create_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        reduce_only: bool,
    ) -> Result<OrderResult, ExchangeError>;

    async fn create_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        price: f64,
        time_in_force: TimeInForce,
        reduce_only: bool,
    ) -> Result<OrderResult, ExchangeError>;
}

/// 설정에 맞는 클라이언트 생성
/// dry_run_override가 있으면 설정의 DRY_RUN보다 우선한다.
pub fn build_client(
    config: &GatewayConfig,
    dry_run_override: Option<bool>,
) -> Result<Arc<dyn ExchangeClient>, ConfigError> {
    let dry_run = dry_run_override.unwrap_or(config.dry_run);
    info!("Initializing exchange client (dry run: {})", dry_run);

    if dry_run {
        return Ok(Arc::new(DryRunClient::new()));
    }

    build_live_client(config)
}

#[cfg(feature = "live")]
fn build_live_client(config: &GatewayConfig) -> Result<Arc<dyn ExchangeClient>, ConfigError> {
    Ok(Arc::new(LiveClient::from_config(config)?))
}

#[cfg(not(feature = "live"))]
fn build_live_client(_config: &GatewayConfig) -> Result<Arc<dyn ExchangeClient>, ConfigError> {
    tracing::error!("Exchange backend is not compiled in. Live mode requires the `live` feature.");
    Err(ConfigError::LiveBackendUnavailable)
}
