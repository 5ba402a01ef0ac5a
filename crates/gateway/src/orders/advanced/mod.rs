//! 고급 주문 전략
//!
//! dry-run 리포트만 지원한다. 라이브 모드에서는 경고만 남기고 `todo` 결과를 돌려주며,
//! 실제 주문은 보내지 않는다.

pub mod oco;
pub mod twap;

pub use oco::place_oco_order;
pub use twap::execute_twap;
