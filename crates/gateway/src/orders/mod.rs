//! 주문 커맨드
//!
//! 입력을 검증한 뒤 거래소 파사드에 넘긴다. 검증 순서는 고정이고 첫 실패에서 멈춘다.
//! 파사드에서 올라온 에러는 손대지 않고 그대로 돌려준다.

use tracing::error;

use interface::Side;

use crate::error::{GatewayError, ValidationError};
use crate::validation::{safe_parse_float, valid_price, valid_quantity, valid_symbol, NumericInput};

pub mod advanced;
pub mod limit;
pub mod market;

pub use advanced::{execute_twap, place_oco_order};
pub use limit::place_limit_order;
pub use market::place_market_order;

fn reject(err: ValidationError) -> GatewayError {
    error!("{}", err);
    err.into()
}

pub(crate) fn check_symbol(symbol: &str) -> Result<(), GatewayError> {
    if !valid_symbol(symbol) {
        return Err(reject(ValidationError::Symbol(symbol.to_string())));
    }
    Ok(())
}

pub(crate) fn check_side(side: &str) -> Result<Side, GatewayError> {
    side.parse::<Side>()
        .map_err(|_| reject(ValidationError::Side(side.to_string())))
}

pub(crate) fn check_quantity<Q: NumericInput + ?Sized>(quantity: &Q) -> Result<f64, GatewayError> {
    positive(quantity, valid_quantity(quantity))
        .ok_or_else(|| reject(ValidationError::Quantity(quantity.describe())))
}

pub(crate) fn check_total_quantity<Q: NumericInput + ?Sized>(
    quantity: &Q,
) -> Result<f64, GatewayError> {
    positive(quantity, valid_quantity(quantity))
        .ok_or_else(|| reject(ValidationError::TotalQuantity(quantity.describe())))
}

pub(crate) fn check_price<P: NumericInput + ?Sized>(
    field: &'static str,
    price: &P,
) -> Result<f64, GatewayError> {
    positive(price, valid_price(price)).ok_or_else(|| {
        reject(ValidationError::Price {
            field,
            value: price.describe(),
        })
    })
}

fn positive<T: NumericInput + ?Sized>(value: &T, valid: bool) -> Option<f64> {
    safe_parse_float(value, None).filter(|_| valid)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use interface::{AccountSnapshot, ExchangeError, OrderResult, ServerTime, Side, TimeInForce};

    use crate::client::ExchangeClient;

    /// proptest 본문처럼 동기 컨텍스트에서 커맨드를 돌릴 때 사용
    pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    /// 주문 호출 횟수를 세고, 설정에 따라 실패를 돌려주는 가짜 라이브 클라이언트
    #[derive(Default)]
    pub struct FakeLiveClient {
        pub fail_with: Option<String>,
        pub calls: AtomicUsize,
    }

    impl FakeLiveClient {
        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn respond(&self) -> Result<OrderResult, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(ExchangeError::Other(message.clone())),
                None => Ok(OrderResult::todo("fake")),
            }
        }
    }

    #[async_trait]
    impl ExchangeClient for FakeLiveClient {
        fn is_dry_run(&self) -> bool {
            false
        }

        async fn ping(&self) -> Result<ServerTime, ExchangeError> {
            Ok(ServerTime {
                status: None,
                server_time: 0,
            })
        }

        async fn get_account(&self) -> Result<AccountSnapshot, ExchangeError> {
            Err(ExchangeError::Other("not used".into()))
        }

        async fn get_balance(&self, _asset: &str) -> Result<f64, ExchangeError> {
            Ok(0.0)
        }

        async fn create_market_order(
            &self,
            _symbol: &str,
            _side: Side,
            _quantity: f64,
            _reduce_only: bool,
        ) -> Result<OrderResult, ExchangeError> {
            self.respond()
        }

        async fn create_limit_order(
            &self,
            _symbol: &str,
            _side: Side,
            _quantity: f64,
            _price: f64,
            _time_in_force: TimeInForce,
            _reduce_only: bool,
        ) -> Result<OrderResult, ExchangeError> {
            self.respond()
        }
    }
}
