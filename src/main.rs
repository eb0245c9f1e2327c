use anyhow::Result;
use clap::Parser;
use tweet_disaster_classifier::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tweet_disaster_classifier=info".parse()?),
        )
        .init();

    Cli::parse().run()
}
