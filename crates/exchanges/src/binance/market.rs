use interface::ServerTime;

use super::super::ExchangeError;
use super::{parse_json, BinanceClient};

impl BinanceClient {
    /// 서버 시간 조회 (`GET /fapi/v1/time`). 연결 확인 용도로도 쓴다.
    pub async fn time(&self) -> Result<ServerTime, ExchangeError> {
        let response_text = self.public_get("/fapi/v1/time").await?;
        parse_json(&response_text)
    }
}
