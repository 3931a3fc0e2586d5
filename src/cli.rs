use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("discogs-client")
        .about("Query the Discogs API with quota-aware pacing")
        .disable_version_flag(true)
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
            Command::new("wantlist")
                .about("Fetch a user's complete wantlist")
                .arg(Arg::new("username").required(true)),
        )
        .subcommand(
            Command::new("folders")
                .about("List a user's collection folders")
                .arg(Arg::new("username").required(true)),
        )
        .subcommand(
            Command::new("collection")
                .about("Fetch every item of a collection folder")
                .arg(Arg::new("username").required(true))
                .arg(
                    Arg::new("folder")
                        .long("folder")
                        .default_value("0")
                        .value_parser(value_parser!(u64))
                        .help("Folder id; 0 is the whole collection"),
                ),
        )
        .subcommand(
            Command::new("release")
                .about("Show a release")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(u64))),
        )
        .subcommand(
            Command::new("artist")
                .about("Show an artist")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(u64))),
        )
        .subcommand(
            Command::new("search")
                .about("Search the database")
                .arg(Arg::new("query").required(true))
                .arg(
                    Arg::new("per-page")
                        .long("per-page")
                        .value_parser(value_parser!(u32)),
                ),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level beats RUST_LOG; default to info.
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.target(env_logger::Target::Stderr).init();
}
