use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;
use tracing::error;

use super::ExchangeError;

pub mod account;
pub mod market;
pub mod order;

/// USD-M 선물 REST 엔드포인트
pub const FUTURES_BASE_URL: &str = "https://fapi.binance.com";

const DEFAULT_RECV_WINDOW: u64 = 5000;

/// Binance USD-M 선물 클라이언트 (시간, 계정, 주문)
#[derive(Clone)]
pub struct BinanceClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) api_secret: Option<String>,
    pub(crate) recv_window: u64,
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceClient {
    /// 공개 API만 사용하는 경우 (서버 시간 등)
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: FUTURES_BASE_URL.to_string(),
            api_key: None,
            api_secret: None,
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }

    /// 인증이 필요한 API를 사용하는 경우 (계정, 주문 등)
    pub fn with_credentials(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Self::new()
        }
    }

    /// 테스트넷이나 로컬 스텁을 가리키도록 base url 교체
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), ExchangeError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ExchangeError::Other(
                "API key not set. Use BinanceClient::with_credentials()".to_string(),
            )
        })?;
        let api_secret = self.api_secret.as_deref().ok_or_else(|| {
            ExchangeError::Other(
                "API secret not set. Use BinanceClient::with_credentials()".to_string(),
            )
        })?;
        Ok((api_key, api_secret))
    }

    /// 서명 없는 GET 요청. 응답 본문을 돌려준다.
    pub(crate) async fn public_get(&self, endpoint: &str) -> Result<String, ExchangeError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.http.get(&url).send().await?;

        read_body(response).await
    }

    /// 서명이 필요한 요청
    /// params 뒤에 timestamp/recvWindow를 붙이고 HMAC 서명을 추가한다.
    pub(crate) async fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &str,
    ) -> Result<String, ExchangeError> {
        let (api_key, api_secret) = self.credentials()?;

        let timestamp = get_timestamp();
        let query_string = if params.is_empty() {
            format!("timestamp={}&recvWindow={}", timestamp, self.recv_window)
        } else {
            format!(
                "{}&timestamp={}&recvWindow={}",
                params, timestamp, self.recv_window
            )
        };
        let signature = generate_signature(&query_string, api_secret);

        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, endpoint, query_string, signature
        );

        let response = self
            .http
            .request(method, &url)
            .header("X-MBX-APIKEY", api_key)
            .send()
            .await?;

        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, ExchangeError> {
    // response.text()는 한 번만 호출 (바디를 소비하므로)
    let status = response.status();
    let response_text = response.text().await?;

    if !status.is_success() {
        // 로그에는 앞부분만, 에러에는 본문 전체
        error!(
            "Binance API error: status {}, response: {}",
            status,
            response_text.chars().take(200).collect::<String>()
        );
        return Err(ExchangeError::Api {
            status: status.as_u16(),
            body: response_text,
        });
    }

    Ok(response_text)
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    response_text: &str,
) -> Result<T, ExchangeError> {
    serde_json::from_str(response_text).map_err(|e| {
        ExchangeError::Other(format!(
            "Failed to parse Binance response: {}, response: {}",
            e,
            response_text.chars().take(200).collect::<String>()
        ))
    })
}

type HmacSha256 = Hmac<Sha256>;

/// Binance API 서명 생성
/// query_string: 쿼리 파라미터 문자열 (예: "symbol=BTCUSDT&timestamp=1234567890")
/// api_secret: API Secret Key
pub fn generate_signature(query_string: &str, api_secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(query_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 타임스탬프 생성 (밀리초)
pub fn get_timestamp() -> u64 {
    Utc::now().timestamp_millis() as u64
}
