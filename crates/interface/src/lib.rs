//! 게이트웨이와 거래소 클라이언트가 공유하는 타입 모음
//!
//! - `error`: 거래소 호출 에러
//! - `order`: 주문 방향/타입, 거래소 주문 응답
//! - `account`: 계정 스냅샷, 서버 시간
//! - `result`: 주문 커맨드가 호출자에게 돌려주는 결과

pub mod account;
pub mod error;
pub mod order;
pub mod result;

pub use account::{AccountAsset, AccountSnapshot, ServerTime};
pub use error::ExchangeError;
pub use order::{OrderResponse, OrderType, Side, TimeInForce};
pub use result::{DryRunAction, DryRunDetail, DryRunReport, OcoDetails, OrderPayload, OrderResult};
