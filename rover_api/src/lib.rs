//! # RoVer API
//!
//! An asynchronous Rust client for the [RoVer](https://rover.link) registry
//! API, which links Discord accounts to Roblox accounts. It uses `tokio` for
//! the async runtime and `reqwest` for HTTP, maps responses onto typed
//! records, and turns failures into a [`RoverError`].
//!
//! ```rust,no_run
//! use rover_api::{LookupApi, RoverClient, RoverError};
//!
//! # async fn run() -> Result<(), RoverError> {
//! let client = RoverClient::new("my-api-key")?;
//! match client.get_roblox_from_discord(123, 456).await {
//!     Ok(info) => println!("linked to {}", info.roblox_id),
//!     Err(RoverError::NotFound(_)) => println!("not linked"),
//!     Err(RoverError::RateLimit { retry_after, .. }) => println!("slow down: {retry_after:?}"),
//!     Err(e) => return Err(e),
//! }
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod types;
pub mod util;

pub use client::*;
pub use error::{ApiError, RoverError};
pub use types::*;
