use std::sync::Arc;

use color_eyre::eyre;
use serde_json::Value;
use structopt::{clap::AppSettings, StructOpt};
use tracing::{error, info};

use gateway::{
    build_client, execute_twap, logger::init_tracing, place_limit_order, place_market_order,
    place_oco_order, server::start_server, ConfigError, ExchangeClient, GatewayConfig,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gateway",
    about = "Binance 선물 주문 게이트웨이",
    global_settings = &[AppSettings::AllowNegativeNumbers]
)]
struct Opt {
    /// 설정과 관계없이 dry-run으로 실행 (실제 주문 없음)
    #[structopt(long, global = true)]
    dry_run: bool,

    #[structopt(subcommand)]
    cmd: Command,
}

// 수량과 가격은 문자열로 받아 주문 커맨드에서 검증한다
#[derive(Debug, StructOpt)]
enum Command {
    /// 시장가 주문
    Market {
        symbol: String,
        side: String,
        quantity: String,
    },
    /// 지정가 주문 (GTC)
    Limit {
        symbol: String,
        side: String,
        quantity: String,
        price: String,
    },
    /// OCO 주문 (라이브 모드 미구현)
    Oco {
        symbol: String,
        side: String,
        quantity: String,
        take_profit_price: String,
        stop_price: String,
        stop_limit_price: String,
    },
    /// TWAP 분할 주문 (라이브 모드 미구현)
    Twap {
        symbol: String,
        side: String,
        total_quantity: String,
        slices: i64,
        interval_seconds: i64,
    },
    /// 거래소 연결 확인
    Ping,
    /// 자산 잔고 조회
    Balance {
        #[structopt(default_value = "USDT")]
        asset: String,
    },
    /// 주문 API 서버 실행
    Serve {
        #[structopt(long, default_value = "5000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();

    // init error reporting
    color_eyre::install()?;

    let opt = Opt::from_args();

    let (code, output) = report(run(opt).await);
    if let Some(output) = output {
        println!("{}", output);
    }
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

async fn run(opt: Opt) -> eyre::Result<Option<Value>> {
    let (config, client) = connect(&opt, GatewayConfig::load)?;

    // guards는 프로세스가 끝날 때까지 들고 있어야 한다
    let _guards = init_tracing(&config.log_file)?;
    info!("Loaded configuration: {:?}", config);

    match opt.cmd {
        Command::Serve { port } => {
            serve(client, port).await?;
            Ok(None)
        }
        cmd => execute(client.as_ref(), cmd).await.map(Some),
    }
}

/// 설정을 읽고 클라이언트를 만든다. `--dry-run`이 있으면 DRY_RUN 값보다 우선한다.
fn connect<L>(opt: &Opt, load: L) -> eyre::Result<(GatewayConfig, Arc<dyn ExchangeClient>)>
where
    L: FnOnce(Option<bool>) -> Result<GatewayConfig, ConfigError>,
{
    let dry_run_override = opt.dry_run.then_some(true);
    let config = load(dry_run_override)?;
    let client = build_client(&config, dry_run_override)?;
    Ok((config, client))
}

/// 한 번 실행하고 끝나는 커맨드. 결과를 JSON으로 돌려준다.
async fn execute(client: &dyn ExchangeClient, cmd: Command) -> eyre::Result<Value> {
    let value = match cmd {
        Command::Market {
            symbol,
            side,
            quantity,
        } => serde_json::to_value(
            place_market_order(client, &symbol, &side, &quantity).await?,
        )?,
        Command::Limit {
            symbol,
            side,
            quantity,
            price,
        } => serde_json::to_value(
            place_limit_order(client, &symbol, &side, &quantity, &price).await?,
        )?,
        Command::Oco {
            symbol,
            side,
            quantity,
            take_profit_price,
            stop_price,
            stop_limit_price,
        } => serde_json::to_value(
            place_oco_order(
                client,
                &symbol,
                &side,
                &quantity,
                &take_profit_price,
                &stop_price,
                &stop_limit_price,
            )
            .await?,
        )?,
        Command::Twap {
            symbol,
            side,
            total_quantity,
            slices,
            interval_seconds,
        } => serde_json::to_value(
            execute_twap(
                client,
                &symbol,
                &side,
                &total_quantity,
                slices,
                interval_seconds,
            )
            .await?,
        )?,
        Command::Ping => serde_json::to_value(client.ping().await?)?,
        Command::Balance { asset } => {
            let balance = client.get_balance(&asset).await?;
            serde_json::json!({
                "asset": asset,
                "balance": balance,
                "dry_run": client.is_dry_run(),
            })
        }
        Command::Serve { .. } => eyre::bail!("serve is a long-running command"),
    };

    Ok(value)
}

async fn serve(client: Arc<dyn ExchangeClient>, port: u16) -> eyre::Result<()> {
    info!("Starting order API on port {}...", port);
    info!("DRY_RUN Mode: {}", client.is_dry_run());
    start_server(client, port).await
}

/// 실행 결과를 (종료 코드, stdout 출력)으로 바꾼다.
/// 성공이면 0과 pretty JSON, 실패면 1과 `Error: <message>`.
fn report(result: eyre::Result<Option<Value>>) -> (i32, Option<String>) {
    match result {
        Ok(Some(value)) => {
            let output = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            (0, Some(output))
        }
        Ok(None) => (0, None),
        Err(e) => {
            error!("Command failed: {}", e);
            (1, Some(format!("Error: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(args: &[&str]) -> Opt {
        Opt::from_iter_safe(std::iter::once("gateway").chain(args.iter().copied())).unwrap()
    }

    fn env_loader(
        pairs: &[(&str, &str)],
    ) -> impl FnOnce(Option<bool>) -> Result<GatewayConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |dry_run_override| GatewayConfig::from_lookup(|key| env.get(key).cloned(), dry_run_override)
    }

    async fn run_with(args: &[&str], env: &[(&str, &str)]) -> (i32, Option<String>) {
        let opt = parse(args);
        let result = match connect(&opt, env_loader(env)) {
            Ok((_, client)) => execute(client.as_ref(), opt.cmd).await.map(Some),
            Err(e) => Err(e),
        };
        report(result)
    }

    #[test]
    fn test_dry_run_flag_before_or_after_subcommand() {
        assert!(parse(&["--dry-run", "market", "BTCUSDT", "BUY", "0.01"]).dry_run);
        assert!(parse(&["market", "BTCUSDT", "BUY", "0.01", "--dry-run"]).dry_run);
        assert!(!parse(&["market", "BTCUSDT", "BUY", "0.01"]).dry_run);
    }

    #[tokio::test]
    async fn test_success_prints_pretty_json() {
        let (code, output) = run_with(&["market", "BTCUSDT", "BUY", "0.01"], &[]).await;
        let output = output.unwrap();

        assert_eq!(code, 0);
        assert!(output.contains('\n'));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "dry-run");
        assert_eq!(value["payload"]["quantity"], 0.01);
    }

    #[tokio::test]
    async fn test_negative_quantity_reaches_validation() {
        let (code, output) = run_with(&["market", "BTCUSDT", "BUY", "-1", "--dry-run"], &[]).await;

        assert_eq!(code, 1);
        assert_eq!(output.as_deref(), Some("Error: Invalid quantity: -1"));

        let (code, output) =
            run_with(&["twap", "BTCUSDT", "SELL", "1", "-4", "10", "--dry-run"], &[]).await;
        assert_eq!(code, 1);
        assert_eq!(output.as_deref(), Some("Error: Invalid slices: -4. Must be > 0."));
    }

    #[tokio::test]
    async fn test_invalid_side_exits_with_error() {
        let (code, output) = run_with(&["limit", "BTCUSDT", "HOLD", "1", "45000"], &[]).await;

        assert_eq!(code, 1);
        assert_eq!(
            output.as_deref(),
            Some("Error: Invalid side: HOLD. Must be BUY or SELL.")
        );
    }

    #[tokio::test]
    async fn test_live_without_credentials_exits_with_error() {
        let (code, output) =
            run_with(&["market", "BTCUSDT", "BUY", "0.01"], &[("DRY_RUN", "false")]).await;

        assert_eq!(code, 1);
        assert_eq!(
            output.as_deref(),
            Some("Error: BINANCE_API_KEY and BINANCE_API_SECRET are required when DRY_RUN is false.")
        );
    }

    #[tokio::test]
    async fn test_dry_run_flag_overrides_live_config() {
        let (code, output) = run_with(
            &["--dry-run", "balance", "BNB"],
            &[("DRY_RUN", "false")],
        )
        .await;
        let value: Value = serde_json::from_str(&output.unwrap()).unwrap();

        assert_eq!(code, 0);
        assert_eq!(value["asset"], "BNB");
        assert_eq!(value["balance"], 10000.0);
        assert_eq!(value["dry_run"], true);
    }
}
