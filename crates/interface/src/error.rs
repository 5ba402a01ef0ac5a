use thiserror::Error;

/// 거래소 호출 중 발생하는 에러. 호출자에게 그대로 전달되며 재시도하지 않는다.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("exchange api error: status {status}, response: {body}")]
    Api { status: u16, body: String },
    #[error("other error: {0}")]
    Other(String),
}
