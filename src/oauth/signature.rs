//! RFC 5849 signature primitives: percent-encoding, nonces, base strings, and signing.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{_prelude::*, http::HttpMethod};

type HmacSha1 = Hmac<Sha1>;

const NONCE_LEN: usize = 32;

/// Signature methods understood by the transport client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// HMAC-SHA1 over the signature base string.
	#[default]
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	/// Signing key sent verbatim; only safe over TLS.
	#[serde(rename = "PLAINTEXT")]
	Plaintext,
}
impl SignatureMethod {
	/// Returns the `oauth_signature_method` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}

	/// Signs `base_string` with the consumer and token secrets.
	pub fn sign(self, base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
		let key = signing_key(consumer_secret, token_secret);

		match self {
			SignatureMethod::HmacSha1 => {
				let Ok(mut mac) = <HmacSha1 as Mac>::new_from_slice(key.as_bytes()) else {
					unreachable!("HMAC accepts keys of any length.");
				};

				mac.update(base_string.as_bytes());

				STANDARD.encode(mac.finalize().into_bytes())
			},
			SignatureMethod::Plaintext => key,
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// RFC 3986 percent-encoding: everything except unreserved characters, uppercase hex.
pub fn percent_encode(input: &str) -> String {
	let mut encoded = String::with_capacity(input.len() * 3);

	for byte in input.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' =>
				encoded.push(byte as char),
			_ => encoded.push_str(&format!("%{byte:02X}")),
		}
	}

	encoded
}

/// Generates a random alphanumeric `oauth_nonce`.
pub fn nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

/// Current Unix time in seconds, as used for `oauth_timestamp`.
pub fn timestamp() -> String {
	OffsetDateTime::now_utc().unix_timestamp().to_string()
}

/// Builds the signature base string for a request.
///
/// `params` must hold the protocol parameters and the form body parameters; query
/// parameters are read from `url` and decoded before normalization.
pub fn base_string(method: HttpMethod, url: &Url, params: &[(String, String)]) -> String {
	let mut normalized = url
		.query_pairs()
		.map(|(key, value)| (percent_encode(&key), percent_encode(&value)))
		.chain(params.iter().map(|(key, value)| (percent_encode(key), percent_encode(value))))
		.collect::<Vec<_>>();

	normalized.sort();

	let param_string = normalized
		.into_iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect::<Vec<_>>()
		.join("&");

	format!(
		"{}&{}&{}",
		method.as_str(),
		percent_encode(base_url(url)),
		percent_encode(&param_string)
	)
}

/// Formats the `Authorization` header for the given protocol parameters.
pub fn authorization_header(oauth_params: &BTreeMap<String, String>) -> String {
	let fields = oauth_params
		.iter()
		.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>()
		.join(", ");

	format!("OAuth {fields}")
}

fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
	format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret))
}

// Scheme, authority, and path; `Url` already lowercases the host and drops default ports.
fn base_url(url: &Url) -> &str {
	&url[..url::Position::AfterPath]
}
