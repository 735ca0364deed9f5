//! User stream example
//!
//! Verifies the user's credentials, opens their event stream and prints the
//! friends preamble followed by each tweet as it arrives.
//!
//! Credentials are read from TWITTER_CONSUMER_KEY, TWITTER_CONSUMER_SECRET,
//! TWITTER_ACCESS_TOKEN and TWITTER_ACCESS_TOKEN_SECRET.
//!
//! Run with: RUST_LOG=twitter_stream=debug cargo run --example user_stream

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

    println!("Twitter User Stream Example");
    println!("===========================\n");

    let client = TwitterClient::new(ConsumerCredentials::new(
        env("TWITTER_CONSUMER_KEY")?,
        env("TWITTER_CONSUMER_SECRET")?,
    ));
    let token = AccessToken::new(env("TWITTER_ACCESS_TOKEN")?, env("TWITTER_ACCESS_TOKEN_SECRET")?);

    let me = client.verify_credentials(&token).await?;
    println!("Signed in as @{} ({})", me.screen_name, me.id);

    let (friends, mut stream) = client.user_stream(&token).await?;
    println!("Following {} accounts", friends.len());
    println!("Streaming, press Ctrl-C to stop\n");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                stream.cancel();
                stream.handle.closed().await;
                break;
            }
            item = stream.next() => match item {
                Some(Ok(tweet)) => {
                    let reply = if tweet.is_reply() { " (reply)" } else { "" };
                    println!("@{}{}: {}", tweet.author_screen_name(), reply, tweet.text);
                }
                Some(Err(e)) if !e.is_fatal_to_stream() => eprintln!("skipped frame: {}", e),
                Some(Err(e)) => {
                    eprintln!("stream ended: {}", e);
                    break;
                }
                None => break,
            },
        }
    }

    Ok(())
}
