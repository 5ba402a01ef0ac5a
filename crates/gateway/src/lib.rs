//! Binance USD-M 선물 주문 게이트웨이
//!
//! CLI와 HTTP API에서 들어온 주문을 검증한 뒤 거래소 클라이언트로 넘긴다.
//! 클라이언트는 dry-run(입력 에코)과 라이브(`exchanges::BinanceClient` 위임) 두 가지다.

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod orders;
pub mod server;
pub mod validation;

pub use client::{build_client, DryRunClient, ExchangeClient};
#[cfg(feature = "live")]
pub use client::LiveClient;
pub use config::{ConfigError, GatewayConfig};
pub use error::{GatewayError, ValidationError};
pub use orders::{execute_twap, place_limit_order, place_market_order, place_oco_order};
