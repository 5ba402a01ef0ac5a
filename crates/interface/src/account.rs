use serde::{Deserialize, Serialize};

/// 서버 시간 응답. dry-run일 때만 `status`가 채워진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub server_time: i64,
}

/// 선물 계정 스냅샷 (`/fapi/v2/account`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub assets: Vec<AccountAsset>,
    #[serde(default)]
    pub positions: Vec<serde_json::Value>,
    #[serde(default)]
    pub can_deposit: bool,
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub can_withdraw: bool,
    #[serde(default)]
    pub fee_tier: u32,
    #[serde(default)]
    pub update_time: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAsset {
    pub asset: String,
    /// 거래소는 숫자를 문자열로 내려준다
    #[serde(default)]
    pub wallet_balance: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AccountSnapshot {
    /// 특정 자산의 지갑 잔고. 없거나 파싱이 안 되면 0.0
    pub fn wallet_balance(&self, asset: &str) -> f64 {
        self.assets
            .iter()
            .find(|a| a.asset == asset)
            .and_then(|a| a.wallet_balance.parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}
