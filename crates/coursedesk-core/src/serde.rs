use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

/// Accepts an integer either as a JSON number or as a numeric string
/// (`4` or `"4"`), which is what HTML form selects submit.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("`{}` is not an integer", s))),
    }
}

/// [`deserialize_lenient_i64`] narrowed to `i32`.
pub fn deserialize_lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_lenient_i64(deserializer)?;
    i32::try_from(value).map_err(|_| de::Error::custom(format!("`{}` is out of range", value)))
}
