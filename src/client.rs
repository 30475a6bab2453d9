use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::forecast::Forecast;
use crate::request::{RequestBuilder, latlong, redact};
use crate::transport::{HttpTransport, Request, Transport};

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};

use std::fmt;
use std::io::Read;

/// Blocking Dark Sky client.
///
/// Configuration is resolved once in the constructor and never changes afterwards, so one
/// `Client` can be shared between threads and called concurrently.
pub struct Client {
    api_key: SecretString,
    base_url: String,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Construct a client that talks to the API over the default HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Client> {
        let transport = HttpTransport::new(config.timeout).map_err(Error::Transport)?;
        Client::with_transport(config, transport)
    }

    /// Construct a client that sends its requests through `transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Client> {
        if config.api_key.expose_secret().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let base_url = config.resolved_base_url();
        Ok(Client {
            api_key: config.api_key,
            base_url,
            transport: Box::new(transport),
        })
    }

    /// The base URL requests are sent to, with the production default filled in.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the current forecast for a location.
    pub fn forecast(&self, lat: f64, long: f64) -> Result<Forecast> {
        let url = self.request_builder().forecast_url(lat, long);
        timed!("Forecast for {}", latlong(lat, long); self.get(url))
    }

    /// Get the observed or forecast conditions for a location at a UNIX time, past or future.
    pub fn time_machine(&self, lat: f64, long: f64, time: i64) -> Result<Forecast> {
        let url = self.request_builder().time_machine_url(lat, long, time);
        timed!("Time Machine for {} at {}", latlong(lat, long), time; self.get(url))
    }

    fn request_builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.base_url, self.api_key.expose_secret())
    }

    fn get(&self, url: String) -> Result<Forecast> {
        let request = self.request_builder().build(Method::GET, url);
        let body = self.execute(request)?;
        Forecast::from_slice(&body)
    }

    /// Send `request` and read the whole body. Any status >= 400 is a [`Error::BadRequest`] and
    /// its body is dropped unread.
    fn execute(&self, request: Request) -> Result<Vec<u8>> {
        info!(
            "Calling DarkSky: {} {}",
            request.method,
            redact(&request.url, self.api_key.expose_secret())
        );

        let mut res = self.transport.execute(request).map_err(Error::Transport)?;
        let status = res.status;
        if status.as_u16() >= 400 {
            debug!("DarkSky returned status {}", status);
            return Err(Error::BadRequest { status });
        }

        let mut body = Vec::new();
        res.body
            .read_to_end(&mut body)
            .map_err(|err| Error::Transport(err.into()))?;
        debug!("DarkSky returned status {} with {} bytes", status, body.len());

        Ok(body)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
