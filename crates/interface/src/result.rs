use serde::Serialize;

use crate::order::{OrderResponse, OrderType, Side, TimeInForce};

/// 주문 커맨드 결과. `status` 필드로 구분되는 태그 유니온으로 직렬화된다.
///
/// - `dry-run`: 실제 주문 없이 입력을 그대로 되돌려준 리포트
/// - `live`: 거래소 응답 원문. 평탄화하지 않고 `order` 아래에 둔다.
///   Binance 응답에도 `status`(`NEW`, `FILLED` 등)가 있어 태그와 겹치기 때문이다.
///   주문 번호는 `order.orderId`, 체결 상태는 `order.status`로 읽는다.
/// - `todo`: 라이브 모드에서 아직 구현되지 않은 전략
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum OrderResult {
    #[serde(rename = "dry-run")]
    DryRun(DryRunReport),
    #[serde(rename = "live")]
    Live { order: OrderResponse },
    #[serde(rename = "todo")]
    Todo { detail: String },
}

impl OrderResult {
    pub fn dry_run(action: DryRunAction, detail: DryRunDetail) -> Self {
        OrderResult::DryRun(DryRunReport { action, detail })
    }

    pub fn todo(detail: impl Into<String>) -> Self {
        OrderResult::Todo {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            OrderResult::DryRun(_) => "dry-run",
            OrderResult::Live { .. } => "live",
            OrderResult::Todo { .. } => "todo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DryRunReport {
    pub action: DryRunAction,
    #[serde(flatten)]
    pub detail: DryRunDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DryRunAction {
    #[serde(rename = "create_market_order")]
    CreateMarketOrder,
    #[serde(rename = "create_limit_order")]
    CreateLimitOrder,
    #[serde(rename = "oco-order")]
    OcoOrder,
    #[serde(rename = "twap")]
    Twap,
}

/// dry-run 리포트 본문. 액션마다 모양이 다르다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DryRunDetail {
    Order {
        payload: OrderPayload,
    },
    Oco {
        details: OcoDetails,
    },
    Twap {
        slices: u64,
        quantity_per_slice: f64,
        interval_seconds: u64,
    },
}

/// 거래소에 보냈을 주문 파라미터
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: f64,
    /// 거래소 규약대로 가격은 문자열
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcoDetails {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub take_profit_price: f64,
    pub stop_price: f64,
    pub stop_limit_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dry_run_market_serialization() {
        let result = OrderResult::dry_run(
            DryRunAction::CreateMarketOrder,
            DryRunDetail::Order {
                payload: OrderPayload {
                    symbol: "BTCUSDT".to_string(),
                    side: Side::Buy,
                    order_type: OrderType::Market,
                    quantity: 0.01,
                    price: None,
                    time_in_force: None,
                    reduce_only: false,
                },
            },
        );

        assert_eq!(result.status(), "dry-run");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "status": "dry-run",
                "action": "create_market_order",
                "payload": {
                    "symbol": "BTCUSDT",
                    "side": "BUY",
                    "type": "MARKET",
                    "quantity": 0.01,
                    "reduceOnly": false
                }
            })
        );
    }

    #[test]
    fn test_twap_and_todo_serialization() {
        let twap = OrderResult::dry_run(
            DryRunAction::Twap,
            DryRunDetail::Twap {
                slices: 4,
                quantity_per_slice: 0.25,
                interval_seconds: 60,
            },
        );
        assert_eq!(
            serde_json::to_value(&twap).unwrap(),
            json!({
                "status": "dry-run",
                "action": "twap",
                "slices": 4,
                "quantity_per_slice": 0.25,
                "interval_seconds": 60
            })
        );

        let todo = OrderResult::todo("TWAP live execution not implemented yet");
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            json!({ "status": "todo", "detail": "TWAP live execution not implemented yet" })
        );
    }

    #[test]
    fn test_live_result_wraps_exchange_response() {
        let order: OrderResponse = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "orderId": 7,
            "clientOrderId": "abc",
            "executedQty": "0.01",
            "status": "FILLED"
        }))
        .unwrap();

        let value = serde_json::to_value(OrderResult::Live { order }).unwrap();
        assert_eq!(value["status"], "live");
        assert_eq!(value["order"]["orderId"], 7);
        assert_eq!(value["order"]["status"], "FILLED");
        // 거래소 필드는 최상위로 올라오지 않는다
        assert!(value.get("orderId").is_none());
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
