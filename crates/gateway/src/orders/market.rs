use tracing::{debug, error, info};

use interface::OrderResult;

use super::{check_quantity, check_side, check_symbol};
use crate::client::ExchangeClient;
use crate::error::GatewayError;
use crate::validation::NumericInput;

/// 시장가 주문. 검증 순서: symbol → quantity → side
pub async fn place_market_order<Q: NumericInput + ?Sized>(
    client: &dyn ExchangeClient,
    symbol: &str,
    side: &str,
    quantity: &Q,
) -> Result<OrderResult, GatewayError> {
    info!(
        "Received Market Order Request: {} {} {}",
        side,
        quantity.describe(),
        symbol
    );

    check_symbol(symbol)?;
    let quantity = check_quantity(quantity)?;
    let side = check_side(side)?;

    debug!("Validation successful. Executing order...");

    match client.create_market_order(symbol, side, quantity, false).await {
        Ok(response) => {
            info!("Market Order executed successfully: {:?}", response);
            Ok(response)
        }
        Err(e) => {
            error!("Error executing market order for {}: {}", symbol, e);
            Err(e.into())
        }
    }
}
