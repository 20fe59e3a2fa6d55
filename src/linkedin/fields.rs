//! Abstract profile field names to LinkedIn field selector syntax.

/// Selector used when no profile fields are configured.
pub const DEFAULT_FIELD_SELECTOR: &str = "id,first-name,last-name";

/// Builds LinkedIn's comma-separated field selector from abstract profile field names.
///
/// `id`, `name`, and `emails` map onto LinkedIn fields (`name` expands to
/// `first-name,last-name`); any other name passes through unchanged so LinkedIn-only fields
/// such as `headline` can be requested directly. Output preserves input order.
pub fn build_field_selector<I, S>(fields: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut selector = Vec::<String>::new();

	for field in fields {
		let field = field.as_ref();

		match provider_fields(field) {
			Some(mapped) => selector.extend(mapped.iter().map(|name| (*name).to_owned())),
			None => selector.push(field.to_owned()),
		}
	}

	selector.join(",")
}

fn provider_fields(field: &str) -> Option<&'static [&'static str]> {
	match field {
		"id" => Some(&["id"]),
		"name" => Some(&["first-name", "last-name"]),
		"emails" => Some(&["email-address"]),
		_ => None,
	}
}
