use interface::ExchangeError;
use thiserror::Error;

use crate::config::ConfigError;

/// 주문 입력 검증 실패. 네트워크 호출 전에 발생하며 재시도 대상이 아니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid symbol: {0}")]
    Symbol(String),
    #[error("Invalid side: {0}. Must be BUY or SELL.")]
    Side(String),
    #[error("Invalid quantity: {0}")]
    Quantity(String),
    #[error("Invalid total quantity: {0}")]
    TotalQuantity(String),
    #[error("Invalid {field}: {value}")]
    Price { field: &'static str, value: String },
    #[error("Invalid slices: {0}. Must be > 0.")]
    Slices(i64),
    #[error("Invalid interval: {0}. Must be > 0.")]
    Interval(i64),
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] ExchangeError),
}

impl GatewayError {
    /// 잘못된 입력은 다시 보내도 실패한다. 거래소 호출 실패만 재시도 후보.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}
