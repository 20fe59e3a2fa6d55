//! Starts a LinkedIn sign-in: builds the strategy from configuration, prints the profile URL
//! it will query, and, when real consumer credentials are exported, fetches a request token
//! and prints the authorization redirect.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use linkedin_oauth1::{
	auth::TokenPair,
	error::BoxError,
	flows::{AuthOptions, AuthOutcome, AuthRequest},
	linkedin::{LinkedInConfig, Profile, ReqwestLinkedInStrategy},
	store::MemoryStore,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let key = env::var("LINKEDIN_CONSUMER_KEY").ok();
	let secret = env::var("LINKEDIN_CONSUMER_SECRET").ok();
	let config = LinkedInConfig::new(
		key.clone().unwrap_or_else(|| "demo-key".into()),
		secret.clone().unwrap_or_else(|| "demo-secret".into()),
	)
	.with_callback_url("/auth/linkedin/callback")
	.with_profile_fields(["id", "name", "emails"]);
	let strategy: ReqwestLinkedInStrategy<String> = ReqwestLinkedInStrategy::with_reqwest(
		config,
		Arc::new(MemoryStore::default()),
		|_: TokenPair, profile: Profile| async move {
			Ok::<_, BoxError>(Some(profile.display_name))
		},
	)?;
	let options = AuthOptions::default().with_scope(["r_basicprofile", "r_emailaddress"]);

	println!("Strategy `{}` will read {}.", strategy.name(), strategy.profile_url());
	println!("Request-token extras: {:?}.", strategy.request_token_params(&options));

	if key.is_none() || secret.is_none() {
		println!("Export LINKEDIN_CONSUMER_KEY and LINKEDIN_CONSUMER_SECRET to contact LinkedIn.");

		return Ok(());
	}

	let request = AuthRequest::default().with_origin(Url::parse("http://localhost:3000")?);

	match strategy.authenticate(&request, &options).await {
		AuthOutcome::Redirect(url) => println!("Send your user to {url}."),
		AuthOutcome::Error(e) => return Err(e.into()),
		other => println!("Unexpected first-leg outcome: {other:?}."),
	}

	Ok(())
}
