use reqwest::Method;

use interface::AccountSnapshot;

use super::super::ExchangeError;
use super::{parse_json, BinanceClient};

impl BinanceClient {
    /// 선물 계정 정보 조회 (`GET /fapi/v2/account`)
    /// 자산별 walletBalance와 포지션 목록을 포함한다.
    pub async fn account(&self) -> Result<AccountSnapshot, ExchangeError> {
        let response_text = self
            .signed_request(Method::GET, "/fapi/v2/account", "")
            .await?;

        parse_json(&response_text)
    }
}
