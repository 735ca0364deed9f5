//! Sample stream example
//!
//! Prints a live sample of public tweets until Ctrl-C.
//!
//! Credentials are read from TWITTER_CONSUMER_KEY, TWITTER_CONSUMER_SECRET,
//! TWITTER_ACCESS_TOKEN and TWITTER_ACCESS_TOKEN_SECRET.
//!
//! Run with: RUST_LOG=twitter_stream=debug cargo run --example sample_stream

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use twitter_stream::{AccessToken, ConsumerCredentials, TwitterClient};

fn env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{} is not set", name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Twitter Sample Stream Example");
    println!("=============================\n");

    let client = TwitterClient::new(ConsumerCredentials::new(
        env("TWITTER_CONSUMER_KEY")?,
        env("TWITTER_CONSUMER_SECRET")?,
    ));
    let token = AccessToken::new(env("TWITTER_ACCESS_TOKEN")?, env("TWITTER_ACCESS_TOKEN_SECRET")?);

    let mut stream = client.sample_stream(&token).await?;
    println!("Connected, press Ctrl-C to stop\n");

    let mut count = 0usize;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                stream.cancel();
                stream.handle.closed().await;
                break;
            }
            item = stream.next() => match item {
                Some(Ok(tweet)) => {
                    count += 1;
                    println!("[{}] @{}: {}", tweet.id, tweet.author_screen_name(), tweet.text);
                }
                Some(Err(e)) => eprintln!("stream error: {}", e),
                None => break,
            },
        }
    }

    println!("\nReceived {} tweets", count);
    Ok(())
}
