use serde::{Deserialize, Deserializer};

use crate::vcheck::{io_common::make_source_label, *};

// A voter as stored by the portal. The uploaded lists used lowercase keys,
// the ones entered by hand used camelCase keys.
#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct JsonVoter {
    #[serde(default, deserialize_with = "text_or_number")]
    name: String,
    #[serde(
        default,
        alias = "dateOfBirth",
        alias = "date_of_birth",
        deserialize_with = "text_or_number"
    )]
    dob: String,
    #[serde(
        default,
        rename = "voterId",
        alias = "voterid",
        alias = "voter_id",
        deserialize_with = "text_or_number"
    )]
    voter_id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    mobile: String,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JSValue::deserialize(deserializer)? {
        JSValue::String(s) => Ok(s),
        JSValue::Number(n) => Ok(n.to_string()),
        JSValue::Null => Ok("".to_string()),
        x => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {}",
            x
        ))),
    }
}

pub fn read_json_voters(path: &str) -> VcheckResult<Vec<ParsedVoter>> {
    let source_label = make_source_label(path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let parsed: Vec<JsonVoter> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_json_voters: {} entries in {}", parsed.len(), path);

    let res = parsed
        .into_iter()
        .enumerate()
        .map(|(idx, jv)| ParsedVoter {
            source: source_label(idx + 1),
            record: VoterRecord {
                name: jv.name.trim().to_string(),
                date_of_birth: jv.dob.trim().to_string(),
                voter_id: jv.voter_id.trim().to_string(),
                mobile: jv.mobile.trim().to_string(),
            },
        })
        .collect();
    Ok(res)
}
