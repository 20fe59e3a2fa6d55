//! LinkedIn profile response normalization.

// self
use crate::{_prelude::*, error::ProfileParseError, linkedin::PROVIDER_ID};

type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Provider-neutral user profile built from a LinkedIn response.
///
/// Serializes in the common profile shape (`displayName`, `name.familyName`, ...), with
/// `emails` omitted entirely when the response carried no address.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Always `linkedin`.
	pub provider: &'static str,
	/// LinkedIn member id.
	pub id: String,
	/// Given and family name joined by a single space.
	pub display_name: String,
	/// Structured name.
	pub name: ProfileName,
	/// Email addresses, present only when LinkedIn returned one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emails: Option<Vec<ProfileEmail>>,
	/// Raw response body.
	#[serde(rename = "_raw")]
	pub raw: String,
	/// Parsed response object.
	#[serde(rename = "_json")]
	pub json: JsonObject,
}

/// Structured name parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
	/// LinkedIn `lastName`.
	pub family_name: Option<String>,
	/// LinkedIn `firstName`.
	pub given_name: Option<String>,
}

/// Single email record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileEmail {
	/// Email address.
	pub value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkedInPerson {
	id: String,
	#[serde(default)]
	first_name: Option<String>,
	#[serde(default)]
	last_name: Option<String>,
	#[serde(default)]
	email_address: Option<String>,
}

/// Parses a LinkedIn profile body into a [`Profile`].
///
/// The body must be a JSON object with a string `id`. Missing name parts are skipped when
/// building [`Profile::display_name`] rather than rendered as placeholders.
pub fn normalize(raw: &str) -> Result<Profile, ProfileParseError> {
	let value = serde_json::from_str::<serde_json::Value>(raw)
		.map_err(|source| ProfileParseError::Json { raw: raw.to_owned(), source })?;
	let serde_json::Value::Object(json) = value else {
		return Err(ProfileParseError::NotAnObject { raw: raw.to_owned() });
	};
	let person: LinkedInPerson = serde_path_to_error::deserialize(&json)
		.map_err(|source| ProfileParseError::Shape { raw: raw.to_owned(), source })?;
	let display_name = [person.first_name.as_deref(), person.last_name.as_deref()]
		.into_iter()
		.flatten()
		.collect::<Vec<_>>()
		.join(" ");
	let emails = person
		.email_address
		.filter(|address| !address.is_empty())
		.map(|value| vec![ProfileEmail { value }]);

	Ok(Profile {
		provider: PROVIDER_ID,
		id: person.id,
		display_name,
		name: ProfileName { family_name: person.last_name, given_name: person.first_name },
		emails,
		raw: raw.to_owned(),
		json,
	})
}
