use {
    anyhow::{Context, Result},
    clap::Parser,
    rutld::{
        args::Args,
        engine,
        utils::read_lines,
        Error, Plugin, Tld,
    },
    tokio_util::sync::CancellationToken,
    tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let patterns = match &args.pattern {
        Some(file) => read_lines(file)
            .await
            .with_context(|| format!("error on reading pattern file {file}"))?,
        None => Vec::new(),
    };
    let global = args.global_options(patterns);

    let plugin = Tld::new(global.clone(), args.tld_options())
        .await
        .context("error on creating the TLD enumeration")?;

    if !global.quiet {
        eprintln!("{} v{}", plugin.name(), env!("CARGO_PKG_VERSION"));
        eprintln!("{}\n", plugin.config_summary());
    }

    let words = read_lines(&global.wordlist)
        .await
        .with_context(|| format!("error on reading wordlist {}", global.wordlist))?;

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    match engine::run(&plugin, &global, words, &token, |result| print!("{result}")).await {
        Ok(_) => Ok(()),
        Err(Error::Wildcard(e)) => Err(anyhow::anyhow!(
            "{e}. To force processing of Wildcard TLD, specify the '--wildcard' switch"
        )),
        Err(e) => Err(e).context("error on running the enumeration"),
    }
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose { "rutld=debug,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
