//! Custom serde helpers for backend wire formats.

/// Deserializes an optional timestamp into `Option<DateTime<Utc>>`.
///
/// The console backend sends build timestamps either as epoch milliseconds or
/// as RFC 3339 strings depending on the field's Java type. `null` and a missing
/// field both map to `None`.
pub mod timestamp_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Millis(millis)) => DateTime::<Utc>::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis))),
            Some(Raw::Text(s)) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| serde::de::Error::custom(format!("Invalid timestamp {:?}: {}", s, e))),
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, with = "super::timestamp_opt")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_timestamp_from_millis() {
        let h: Holder = serde_json::from_str(r#"{"at": 1740076800000}"#).unwrap();
        assert_eq!(h.at.unwrap().timestamp_millis(), 1740076800000);
    }

    #[test]
    fn test_timestamp_from_rfc3339() {
        let h: Holder = serde_json::from_str(r#"{"at": "2025-02-20T18:40:00Z"}"#).unwrap();
        assert_eq!(h.at.unwrap().timestamp(), 1740076800);
    }

    #[test]
    fn test_timestamp_null_and_missing() {
        let h: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.at.is_none());
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(serde_json::from_str::<Holder>(r#"{"at": "yesterday"}"#).is_err());
    }
}
