mod cli;

use clap::ArgMatches;
use intra42::{auth, ApiRequest, CancellationToken, Client, Config, Pagination};
use log::{debug, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches();
    cli::init_logging(matches.get_one::<String>("log-level").map(String::as_str));

    if matches.get_flag("version") {
        println!("intra42 {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match matches.subcommand() {
        Some(("authorize-link", sub)) => authorize_link(sub),
        Some(("get", sub)) => get(sub).await,
        _ => {
            cli::build_cli().print_help()?;
            Ok(())
        }
    }
}

fn authorize_link(sub: &ArgMatches) -> anyhow::Result<()> {
    let client = Client::new(Config::from_env()?)?;
    let state = sub
        .get_one::<String>("state")
        .cloned()
        .unwrap_or_else(auth::generate_state);
    println!("{}", client.authorize_url(&state)?);
    Ok(())
}

async fn get(sub: &ArgMatches) -> anyhow::Result<()> {
    let path = sub
        .get_one::<String>("path")
        .ok_or_else(|| anyhow::anyhow!("missing path"))?;
    let pagination = Pagination::new(
        sub.get_one::<u32>("page").copied().unwrap_or(0),
        sub.get_one::<u32>("per-page").copied().unwrap_or(0),
    );

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling request");
                cancel.cancel();
            }
        }
    });

    let client = Client::connect(Config::from_env()?)
        .await?
        .with_cancellation(cancel);
    let res = client
        .request(ApiRequest::get(path.as_str()).paginate(Some(&pagination)))
        .await?;
    debug!("{} bytes from {}", res.body.len(), path);

    let body: serde_json::Value = res.json()?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    if let Some(p) = res.pagination() {
        eprintln!("{}", serde_json::to_string(&p)?);
    }
    Ok(())
}
