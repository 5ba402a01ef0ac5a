//! 거래소 REST 클라이언트
//!
//! 요청 서명과 전송은 이 크레이트가 전담한다. 게이트웨이는 여기서 노출하는
//! 호출(`time`, `account`, `new_order`)만 사용한다.

pub mod binance;

pub use interface::ExchangeError;

// Convenience re-exports
pub use binance::order::NewOrder;
pub use binance::BinanceClient;
