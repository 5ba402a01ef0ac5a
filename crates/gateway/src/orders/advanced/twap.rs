use tracing::{error, info, warn};

use interface::{DryRunAction, DryRunDetail, OrderResult};

use crate::client::ExchangeClient;
use crate::error::{GatewayError, ValidationError};
use crate::orders::{check_side, check_symbol, check_total_quantity};
use crate::validation::NumericInput;

/// TWAP (Time-Weighted Average Price) 분할 주문.
/// 검증 순서: symbol → side → total_quantity → slices → interval_seconds
pub async fn execute_twap<Q: NumericInput + ?Sized>(
    client: &dyn ExchangeClient,
    symbol: &str,
    side: &str,
    total_quantity: &Q,
    slices: i64,
    interval_seconds: i64,
) -> Result<OrderResult, GatewayError> {
    info!(
        "Received TWAP Request: {} {} {}",
        side,
        total_quantity.describe(),
        symbol
    );
    info!("Strategy: {} slices every {}s", slices, interval_seconds);

    check_symbol(symbol)?;
    check_side(side)?;
    let total_quantity = check_total_quantity(total_quantity)?;

    if slices <= 0 {
        let err = ValidationError::Slices(slices);
        error!("{}", err);
        return Err(err.into());
    }
    if interval_seconds <= 0 {
        let err = ValidationError::Interval(interval_seconds);
        error!("{}", err);
        return Err(err.into());
    }

    let quantity_per_slice = total_quantity / slices as f64;

    if client.is_dry_run() {
        info!("Dry-run TWAP: {} per slice", quantity_per_slice);
        return Ok(OrderResult::dry_run(
            DryRunAction::Twap,
            DryRunDetail::Twap {
                slices: slices as u64,
                quantity_per_slice,
                interval_seconds: interval_seconds as u64,
            },
        ));
    }

    warn!("TWAP live execution not implemented yet.");
    Ok(OrderResult::todo("TWAP live execution not implemented yet"))
}
