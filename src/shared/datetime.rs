/// Serde adapter for the backend's timestamps, which are local date-times
/// without a UTC offset (`2026-03-14T09:26:53` with optional fractional
/// seconds).
pub mod local_timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::PrimitiveDateTime;
    use time::format_description::well_known::Iso8601;
    use time::macros::format_description;

    pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
        let formatted = value.format(&format).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&raw, &Iso8601::DEFAULT).map_err(de::Error::custom)
    }
}
