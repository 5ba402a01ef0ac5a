//! 주문 입력 검증
//!
//! 모두 부수효과 없는 판정 함수다. 에러는 만들지 않고 bool/Option만 돌려주며,
//! 에러 메시지 구성은 호출하는 주문 커맨드의 몫이다.

use serde_json::Value;

/// 숫자로 해석될 수 있는 입력 (CLI 인자, HTTP 바디 값 등)
pub trait NumericInput {
    fn to_number(&self) -> Option<f64>;

    /// 에러 메시지에 넣을 원래 값
    fn describe(&self) -> String;
}

impl NumericInput for f64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl NumericInput for str {
    fn to_number(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl NumericInput for String {
    fn to_number(&self) -> Option<f64> {
        self.as_str().to_number()
    }

    fn describe(&self) -> String {
        self.clone()
    }
}

impl NumericInput for Value {
    fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.to_number(),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Null => "None".to_string(),
            other => other.to_string(),
        }
    }
}

/// 숫자 변환 시도. 실패하면 `default`를 돌려준다.
/// `None`이 돌아오면 호출자는 반드시 "잘못된 값"으로 취급해야 한다.
pub fn safe_parse_float<T: NumericInput + ?Sized>(value: &T, default: Option<f64>) -> Option<f64> {
    value.to_number().or(default)
}

/// 심볼 규칙: 비어 있지 않고, 공백/슬래시 없이 영숫자로만 구성되며 전부 대문자.
/// 대소문자 구분이 있는 문자가 최소 하나 있어야 하므로 "123" 같은 숫자만의 심볼도 거부한다.
pub fn valid_symbol(symbol: &str) -> bool {
    if symbol.is_empty() {
        return false;
    }
    if symbol.contains(' ') || symbol.contains('/') {
        return false;
    }
    if !symbol.chars().all(char::is_alphanumeric) {
        return false;
    }
    symbol.chars().any(char::is_uppercase) && !symbol.chars().any(char::is_lowercase)
}

/// 유한한 양수인지
pub fn valid_quantity<T: NumericInput + ?Sized>(quantity: &T) -> bool {
    is_positive_finite(safe_parse_float(quantity, None))
}

/// 수량과 같은 규칙
pub fn valid_price<T: NumericInput + ?Sized>(price: &T) -> bool {
    is_positive_finite(safe_parse_float(price, None))
}

fn is_positive_finite(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite() && v > 0.0)
}
