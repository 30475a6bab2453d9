use crate::transport::Request;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

/// Builds requests against one base URL with one API key.
pub(crate) struct RequestBuilder<'a> {
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(base_url: &'a str, api_key: &'a str) -> Self {
        RequestBuilder { base_url, api_key }
    }

    /// `{base}/forecast/{key}/{lat},{long}`
    pub fn forecast_url(&self, lat: f64, long: f64) -> String {
        format!(
            "{}/forecast/{}/{}",
            self.base_url,
            self.api_key,
            latlong(lat, long)
        )
    }

    /// `{base}/forecast/{key}/{lat},{long},{time}`
    pub fn time_machine_url(&self, lat: f64, long: f64, time: i64) -> String {
        format!("{},{}", self.forecast_url(lat, long), time)
    }

    pub fn build(&self, method: Method, url: String) -> Request {
        let mut headers = HeaderMap::new();
        if method != Method::GET {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }
        headers.insert(AUTHORIZATION, basic_auth(self.api_key));

        Request {
            method,
            url,
            headers,
        }
    }
}

/// Coordinates to six decimal places, e.g. `32.589720,-116.466988`. Out-of-range values pass
/// through; the API rejects them.
pub(crate) fn latlong(lat: f64, long: f64) -> String {
    format!("{lat:.6},{long:.6}")
}

/// `Basic base64("{key}:")`: the key as username with an empty password.
fn basic_auth(api_key: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{api_key}:"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .expect("base64 output is always a valid header value");
    value.set_sensitive(true);
    value
}

/// The URL with the API key segment masked, for logging.
pub(crate) fn redact(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        url.to_string()
    } else {
        url.replace(&format!("/{api_key}/"), "/<redacted>/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_auth(request: &Request) -> String {
        let value = request.headers[AUTHORIZATION].to_str().unwrap();
        let encoded = value.strip_prefix("Basic ").unwrap();
        String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
    }

    #[test]
    fn latlong_has_six_decimals() {
        assert_eq!(latlong(32.589720, -116.466988), "32.589720,-116.466988");
        assert_eq!(latlong(1.0, -2.5), "1.000000,-2.500000");
        assert_eq!(latlong(0.0, 0.0), "0.000000,0.000000");
    }

    #[test]
    fn latlong_rounds_extra_precision() {
        assert_eq!(latlong(1.2345678, -1.2345674), "1.234568,-1.234567");
    }

    #[test]
    fn latlong_passes_out_of_range_values() {
        assert_eq!(latlong(132.0, -181.0), "132.000000,-181.000000");
    }

    #[test]
    fn forecast_url_layout() {
        let builder = RequestBuilder::new("https://api.darksky.net", "abc123");
        assert_eq!(
            builder.forecast_url(32.58972, -116.466988),
            "https://api.darksky.net/forecast/abc123/32.589720,-116.466988"
        );
    }

    #[test]
    fn time_machine_url_appends_time() {
        let builder = RequestBuilder::new("http://localhost", "k");
        assert_eq!(
            builder.time_machine_url(1.234, -1.234, 1576521551),
            "http://localhost/forecast/k/1.234000,-1.234000,1576521551"
        );
    }

    #[test]
    fn auth_header_carries_key_as_username() {
        for key in ["gibberish-key", "0123456789abcdef", "k"] {
            let builder = RequestBuilder::new("http://localhost", key);
            let request = builder.build(Method::GET, builder.forecast_url(0.0, 0.0));
            assert_eq!(decode_auth(&request), format!("{key}:"));
        }
    }

    #[test]
    fn auth_header_matches_reference_encoding() {
        let builder = RequestBuilder::new("http://localhost", "key");
        let request = builder.build(Method::GET, "http://localhost".to_string());
        assert_eq!(request.headers[AUTHORIZATION], "Basic a2V5Og==");
    }

    #[test]
    fn auth_header_present_for_any_key_bytes() {
        for key in ["ключ", "key with spaces", "k\r\ney"] {
            let builder = RequestBuilder::new("http://localhost", key);
            let request = builder.build(Method::GET, "http://localhost".to_string());
            assert!(request.headers[AUTHORIZATION].is_sensitive());
            assert_eq!(decode_auth(&request), format!("{key}:"));
        }
    }

    #[test]
    fn get_has_no_content_type() {
        let builder = RequestBuilder::new("http://localhost", "key");
        let request = builder.build(Method::GET, builder.forecast_url(1.0, 1.0));
        assert_eq!(request.method, Method::GET);
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn non_get_is_form_encoded() {
        let builder = RequestBuilder::new("http://localhost", "key");
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let request = builder.build(method, "http://localhost".to_string());
            assert_eq!(
                request.headers[CONTENT_TYPE],
                "application/x-www-form-urlencoded"
            );
        }
    }

    #[test]
    fn redact_hides_key() {
        let url = "https://api.darksky.net/forecast/abc123/1.000000,2.000000";
        assert_eq!(
            redact(url, "abc123"),
            "https://api.darksky.net/forecast/<redacted>/1.000000,2.000000"
        );
    }
}
