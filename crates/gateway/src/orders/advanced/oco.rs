use tracing::{info, warn};

use interface::{DryRunAction, DryRunDetail, OcoDetails, OrderResult};

use crate::client::ExchangeClient;
use crate::error::GatewayError;
use crate::orders::{check_price, check_quantity, check_side, check_symbol};
use crate::validation::NumericInput;

/// OCO (One-Cancels-the-Other) 주문.
/// 검증 순서: symbol → side → quantity → take_profit_price → stop_price → stop_limit_price
pub async fn place_oco_order<Q, P>(
    client: &dyn ExchangeClient,
    symbol: &str,
    side: &str,
    quantity: &Q,
    take_profit_price: &P,
    stop_price: &P,
    stop_limit_price: &P,
) -> Result<OrderResult, GatewayError>
where
    Q: NumericInput + ?Sized,
    P: NumericInput + ?Sized,
{
    info!(
        "Received OCO Order Request: {} {} {}",
        side,
        quantity.describe(),
        symbol
    );
    info!(
        "Params: TP={}, Stop={}, StopLimit={}",
        take_profit_price.describe(),
        stop_price.describe(),
        stop_limit_price.describe()
    );

    check_symbol(symbol)?;
    let side = check_side(side)?;
    let quantity = check_quantity(quantity)?;
    let take_profit_price = check_price("take_profit_price", take_profit_price)?;
    let stop_price = check_price("stop_price", stop_price)?;
    let stop_limit_price = check_price("stop_limit_price", stop_limit_price)?;

    if client.is_dry_run() {
        info!("Dry-run mode: Returning mock OCO response.");
        return Ok(OrderResult::dry_run(
            DryRunAction::OcoOrder,
            DryRunDetail::Oco {
                details: OcoDetails {
                    symbol: symbol.to_string(),
                    side,
                    quantity,
                    take_profit_price,
                    stop_price,
                    stop_limit_price,
                },
            },
        ));
    }

    warn!("OCO live trading is not yet implemented.");
    Ok(OrderResult::todo("OCO live trading not implemented yet"))
}
