use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("intra42")
        .about("Query the 42 intra API")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .global(true)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("authorize-link")
                .about("Print the OAuth2 authorization link for FT_API_CLIENT_ID")
                .arg(
                    Arg::new("state")
                        .long("state")
                        .num_args(1)
                        .help("State to embed (random when omitted)"),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("GET an API path (relative to /v2) and print the JSON body")
                .arg(Arg::new("path").required(true))
                .arg(
                    Arg::new("page")
                        .long("page")
                        .num_args(1)
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("per-page")
                        .long("per-page")
                        .num_args(1)
                        .value_parser(value_parser!(u32)),
                ),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level wins over RUST_LOG, which wins over the info default.
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.init();
}
