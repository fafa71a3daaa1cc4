//! Basic example: resolve the account endpoint and fetch a few contacts.
//!
//! Reads credentials from `ELOQUA_ACCOUNT`, `ELOQUA_USERNAME` and
//! `ELOQUA_PASSWORD`.
//!
//! Run with: `cargo run --example basic_call`

use eloqua_rest::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("eloqua_rest=debug,basic_call=info")
        .init();

    let env = |name: &str| std::env::var(name).unwrap_or_default();

    let client = Client::builder()
        .account(env("ELOQUA_ACCOUNT"))
        .username(env("ELOQUA_USERNAME"))
        .password(env("ELOQUA_PASSWORD"))
        .build()?;

    println!("Base URL: {}", client.base_url().await);

    let response = client.get("/data/contacts?count=5").await?;
    println!("Status code: {}", response.status());
    println!("Request latency: {:?}", response.info.latency);

    match &response.data {
        Some(body) if !response.is_error() => {
            println!("Total contacts: {}", body["total"]);
        }
        Some(body) => println!("Error body: {}", body),
        None => println!("Non-JSON body: {}", response.raw_body),
    }

    Ok(())
}
