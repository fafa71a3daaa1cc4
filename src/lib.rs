//! # eloqua-rest - A thin client for the Eloqua REST API
//!
//! `eloqua-rest` wraps `reqwest` with the handful of things every Eloqua
//! integration needs: basic authentication as `Company\user`, discovery of the
//! account's pod-specific base URL, and JSON request/response handling.
//!
//! ## Quick Start
//!
//! ```no_run
//! use eloqua_rest::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), eloqua_rest::Error> {
//!     let client = Client::builder()
//!         .account("AcmeCorp")
//!         .username("api.user")
//!         .password("secret")
//!         .build()?;
//!
//!     // The first request discovers and caches the base URL
//!     let contacts = client.get("/data/contacts?count=5").await?;
//!     println!("Status: {}", contacts.status());
//!     println!("Body: {:?}", contacts.data);
//!
//!     let created = client
//!         .post("/data/contact", &json!({ "emailAddress": "alice@example.com" }))
//!         .await?;
//!     println!("Create took {:?}", created.info.latency);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Soft failures
//!
//! A status of 400 or above is logged at `warn` level and returned as a normal
//! [`Response`]. Bodies that are empty or not JSON come back as `data: None`.
//! Only transport and configuration problems produce an [`Error`]:
//!
//! ```no_run
//! use eloqua_rest::Client;
//!
//! # async fn example() -> Result<(), eloqua_rest::Error> {
//! # let client = Client::builder().account("a").username("u").password("p").build()?;
//! let response = client.delete("/data/contact/42").await?;
//! if response.is_error() {
//!     eprintln!("Delete failed with {}: {}", response.status(), response.raw_body);
//! }
//!
//! // The same metadata stays available on the client afterwards
//! if let Some(info) = client.last_response() {
//!     println!("Last call: {} {} -> {}", info.method, info.url, info.status);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod endpoint;
mod error;
pub mod metadata;
mod response;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use response::{Response, ResponseInfo};
