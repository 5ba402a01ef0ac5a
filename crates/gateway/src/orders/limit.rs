use tracing::{debug, error, info};

use interface::{OrderResult, TimeInForce};

use super::{check_price, check_quantity, check_side, check_symbol};
use crate::client::ExchangeClient;
use crate::error::GatewayError;
use crate::validation::NumericInput;

/// 지정가 주문 (GTC). 검증 순서: symbol → quantity → price → side
pub async fn place_limit_order<Q, P>(
    client: &dyn ExchangeClient,
    symbol: &str,
    side: &str,
    quantity: &Q,
    price: &P,
) -> Result<OrderResult, GatewayError>
where
    Q: NumericInput + ?Sized,
    P: NumericInput + ?Sized,
{
    info!(
        "Received Limit Order Request: {} {} {} @ {}",
        side,
        quantity.describe(),
        symbol,
        price.describe()
    );

    check_symbol(symbol)?;
    let quantity = check_quantity(quantity)?;
    let price = check_price("price", price)?;
    let side = check_side(side)?;

    debug!("Validation successful. Executing limit order...");

    match client
        .create_limit_order(symbol, side, quantity, price, TimeInForce::Gtc, false)
        .await
    {
        Ok(response) => {
            info!("Limit Order executed successfully: {:?}", response);
            Ok(response)
        }
        Err(e) => {
            error!("Error executing limit order for {}: {}", symbol, e);
            Err(e.into())
        }
    }
}
