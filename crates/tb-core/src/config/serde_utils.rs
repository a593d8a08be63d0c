//! Serde helpers shared by the settings types

/// Serialize a `Duration` as whole seconds.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Settings {
///     #[serde(with = "tb_core::config::serde_utils::duration_secs")]
///     timeout: Duration,
/// }
/// ```
pub mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Timeouts {
        #[serde(with = "duration_secs")]
        request: Duration,
    }

    #[test]
    fn test_duration_written_as_seconds() {
        let t = Timeouts {
            request: Duration::from_millis(90_500),
        };
        assert_eq!(toml::to_string(&t).unwrap().trim(), "request = 90");
    }

    #[test]
    fn test_duration_read_from_seconds() {
        let t: Timeouts = toml::from_str("request = 300").unwrap();
        assert_eq!(t.request, Duration::from_secs(300));
        assert!(toml::from_str::<Timeouts>("request = -1").is_err());
    }
}
