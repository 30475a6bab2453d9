//! Blocking client for the Dark Sky forecast API.
//!
//! ```no_run
//! use darksky_client::{Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::new("0123456789abcdef"))?;
//! let forecast = client.forecast(32.589720, -116.466988)?;
//! println!("{} F at {}", forecast.current_temperature(), forecast.local_time()?);
//! # Ok::<(), darksky_client::Error>(())
//! ```
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

#[macro_use]
mod timed;

mod client;
pub mod config;
pub mod error;
pub mod forecast;
mod request;
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use forecast::Forecast;
pub use transport::{HttpTransport, Transport};
