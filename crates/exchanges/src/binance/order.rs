use reqwest::Method;
use tracing::info;

use interface::{OrderResponse, OrderType, Side, TimeInForce};

use super::super::ExchangeError;
use super::{parse_json, BinanceClient};

/// `POST /fapi/v1/order`에 보낼 주문 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: bool,
}

impl NewOrder {
    pub fn market(symbol: impl Into<String>, side: Side, quantity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: None,
            reduce_only: false,
        }
    }

    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: f64,
        price: f64,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: Some(time_in_force),
            reduce_only: false,
        }
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// 서명 전 쿼리 문자열 (timestamp/recvWindow 제외)
    pub fn query_string(&self) -> String {
        let mut query_string = format!(
            "symbol={}&side={}&type={}&quantity={}",
            self.symbol, self.side, self.order_type, self.quantity
        );

        if let Some(price) = self.price {
            query_string.push_str(&format!("&price={}", price));
        }
        if let Some(time_in_force) = self.time_in_force {
            query_string.push_str(&format!("&timeInForce={}", time_in_force));
        }
        if self.reduce_only {
            query_string.push_str("&reduceOnly=true");
        }

        query_string
    }
}

impl BinanceClient {
    /// 신규 주문 (`POST /fapi/v1/order`)
    /// 실패 시 재시도 없이 에러를 그대로 돌려준다.
    pub async fn new_order(&self, order: &NewOrder) -> Result<OrderResponse, ExchangeError> {
        let query_string = order.query_string();
        info!("new_order query_string: {}", query_string);

        let response_text = self
            .signed_request(Method::POST, "/fapi/v1/order", &query_string)
            .await?;

        info!("new_order response: {}", response_text);

        parse_json(&response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_query_string() {
        let order = NewOrder::market("BTCUSDT", Side::Buy, 0.01);
        assert_eq!(
            order.query_string(),
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01"
        );
    }

    #[test]
    fn test_limit_query_string_with_reduce_only() {
        let order =
            NewOrder::limit("ETHUSDT", Side::Sell, 1.5, 3200.5, TimeInForce::Gtc).reduce_only(true);
        assert_eq!(
            order.query_string(),
            "symbol=ETHUSDT&side=SELL&type=LIMIT&quantity=1.5&price=3200.5&timeInForce=GTC&reduceOnly=true"
        );
    }
}
