use crate::poison::DEFAULT_POISON_STORE_NAME;
use humantime::parse_duration;
use queue_provider_deserialize::Slug;
use queue_provider_util::BackoffConfig;
use serde::de::{Error, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::Formatter;
use std::time::Duration;

/// Tuning knobs for a [`QueueProvider`](crate::QueueProvider).
///
/// Fixed, compatibility-critical names (the overflow and persisted-message
/// container names) are not configurable here; see
/// [`overflow::OVERFLOW_CONTAINER`](crate::overflow::OVERFLOW_CONTAINER) and
/// [`poison::PERSISTED_CONTAINER`](crate::poison::PERSISTED_CONTAINER).
#[derive(Debug, Clone, PartialEq)]
pub struct QueueProviderConfig {
    pub(crate) poison_store_name: String,
    pub(crate) max_message_size: usize,
    pub(crate) default_max_trials: u32,
    pub(crate) default_visibility_timeout: Duration,
    pub(crate) retry_max_attempts: u32,
    pub(crate) retry_backoff: BackoffConfig,
    pub(crate) instantiation_backoff: BackoffConfig,
}

impl QueueProviderConfig {
    /// The poison store a message is persisted to when no explicit store
    /// name is given and its max trial count is exceeded.
    pub fn poison_store_name(&self) -> &str {
        &self.poison_store_name
    }

    /// The maximum size, in bytes, of a message accepted by the underlying
    /// queue service; used to derive the overflow threshold.
    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// The default max trial count applied to [`get`](crate::QueueProvider::get)
    /// calls that do not specify their own.
    pub fn default_max_trials(&self) -> u32 {
        self.default_max_trials
    }

    /// The default visibility timeout applied to
    /// [`get`](crate::QueueProvider::get) calls that do not specify their
    /// own.
    pub fn default_visibility_timeout(&self) -> Duration {
        self.default_visibility_timeout
    }

    /// The maximum number of attempts made against a transient server fault
    /// before it is propagated to the caller.
    pub fn retry_max_attempts(&self) -> u32 {
        self.retry_max_attempts
    }

    /// The backoff parameters used between retries of an ordinary backend
    /// call.
    pub fn retry_backoff(&self) -> &BackoffConfig {
        &self.retry_backoff
    }

    /// The backoff parameters used while waiting for a just-created queue to
    /// become usable.
    pub fn instantiation_backoff(&self) -> &BackoffConfig {
        &self.instantiation_backoff
    }

    /// Computes the byte threshold past which a message is routed through
    /// the overflow blob instead of being put directly onto the queue.
    pub fn message_size_threshold(&self) -> usize {
        crate::overflow::message_size_threshold(self.max_message_size)
    }
}

impl QueueProviderConfig {
    fn default_poison_store_name() -> String {
        DEFAULT_POISON_STORE_NAME.to_string()
    }

    fn default_max_message_size() -> usize {
        65_536
    }

    fn default_default_max_trials() -> u32 {
        5
    }

    fn default_default_visibility_timeout() -> Duration {
        Duration::from_secs(30)
    }

    fn default_retry_max_attempts() -> u32 {
        5
    }

    fn default_retry_backoff() -> BackoffConfig {
        BackoffConfig::default()
    }

    fn default_instantiation_backoff() -> BackoffConfig {
        BackoffConfig::new(
            Duration::from_millis(500),
            Duration::from_secs(10),
            0.5,
            2.0,
            Some(Duration::from_secs(120)),
        )
    }
}

impl Default for QueueProviderConfig {
    fn default() -> Self {
        Self {
            poison_store_name: Self::default_poison_store_name(),
            max_message_size: Self::default_max_message_size(),
            default_max_trials: Self::default_default_max_trials(),
            default_visibility_timeout: Self::default_default_visibility_timeout(),
            retry_max_attempts: Self::default_retry_max_attempts(),
            retry_backoff: Self::default_retry_backoff(),
            instantiation_backoff: Self::default_instantiation_backoff(),
        }
    }
}

/// Identifies one of the known fields of [`QueueProviderConfig`] during
/// deserialization, matching field names loosely (case- and
/// punctuation-insensitively) via [`Slug::eq_as_slugs`].
#[allow(non_camel_case_types)]
enum QueueProviderConfigField {
    poison_store_name,
    max_message_size,
    default_max_trials,
    default_visibility_timeout,
    retry_max_attempts,
    retry_backoff,
    instantiation_backoff,
    __ignore,
}

impl QueueProviderConfigField {
    fn from_str(value: &str) -> Self {
        if Slug::eq_as_slugs(value, "poison_store_name") {
            Self::poison_store_name
        } else if Slug::eq_as_slugs(value, "max_message_size") {
            Self::max_message_size
        } else if Slug::eq_as_slugs(value, "default_max_trials") {
            Self::default_max_trials
        } else if Slug::eq_as_slugs(value, "default_visibility_timeout") {
            Self::default_visibility_timeout
        } else if Slug::eq_as_slugs(value, "retry_max_attempts") {
            Self::retry_max_attempts
        } else if Slug::eq_as_slugs(value, "retry_backoff") {
            Self::retry_backoff
        } else if Slug::eq_as_slugs(value, "instantiation_backoff") {
            Self::instantiation_backoff
        } else {
            Self::__ignore
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::poison_store_name => "poison_store_name",
            Self::max_message_size => "max_message_size",
            Self::default_max_trials => "default_max_trials",
            Self::default_visibility_timeout => "default_visibility_timeout",
            Self::retry_max_attempts => "retry_max_attempts",
            Self::retry_backoff => "retry_backoff",
            Self::instantiation_backoff => "instantiation_backoff",
            Self::__ignore => "__ignore",
        }
    }

    fn poll<'de, A, T>(&self, from: &mut A, into: &mut Option<T>) -> Result<IgnoredAny, A::Error>
    where
        A: MapAccess<'de>,
        T: Deserialize<'de>,
    {
        if into.is_some() {
            return Err(Error::duplicate_field(self.as_str()));
        }
        *into = Some(from.next_value()?);
        Ok(IgnoredAny)
    }
}

impl<'de> Deserialize<'de> for QueueProviderConfigField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = QueueProviderConfigField;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("a queue provider configuration field name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(QueueProviderConfigField::from_str(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(QueueProviderConfigField::from_str(&value))
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for QueueProviderConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(QueueProviderConfigVisitor)
    }
}

struct QueueProviderConfigVisitor;

impl<'de> Visitor<'de> for QueueProviderConfigVisitor {
    type Value = QueueProviderConfig;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a map of queue provider configuration")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut poison_store_name = None;
        let mut max_message_size = None;
        let mut default_max_trials = None;
        let mut default_visibility_timeout = None;
        let mut retry_max_attempts = None;
        let mut retry_backoff = None;
        let mut instantiation_backoff = None;

        while let Some(key) = map.next_key::<QueueProviderConfigField>()? {
            match key {
                QueueProviderConfigField::poison_store_name => {
                    key.poll(&mut map, &mut poison_store_name)?
                }
                QueueProviderConfigField::max_message_size => {
                    key.poll(&mut map, &mut max_message_size)?
                }
                QueueProviderConfigField::default_max_trials => {
                    key.poll(&mut map, &mut default_max_trials)?
                }
                QueueProviderConfigField::default_visibility_timeout => {
                    let duration_string = map.next_value::<String>()?;
                    let duration = parse_duration(&duration_string).map_err(Error::custom)?;
                    default_visibility_timeout = Some(duration);
                    IgnoredAny
                }
                QueueProviderConfigField::retry_max_attempts => {
                    key.poll(&mut map, &mut retry_max_attempts)?
                }
                QueueProviderConfigField::retry_backoff => {
                    key.poll(&mut map, &mut retry_backoff)?
                }
                QueueProviderConfigField::instantiation_backoff => {
                    key.poll(&mut map, &mut instantiation_backoff)?
                }
                QueueProviderConfigField::__ignore => map.next_value()?,
            };
        }

        Ok(QueueProviderConfig {
            poison_store_name: poison_store_name
                .unwrap_or_else(QueueProviderConfig::default_poison_store_name),
            max_message_size: max_message_size
                .unwrap_or_else(QueueProviderConfig::default_max_message_size),
            default_max_trials: default_max_trials
                .unwrap_or_else(QueueProviderConfig::default_default_max_trials),
            default_visibility_timeout: default_visibility_timeout
                .unwrap_or_else(QueueProviderConfig::default_default_visibility_timeout),
            retry_max_attempts: retry_max_attempts
                .unwrap_or_else(QueueProviderConfig::default_retry_max_attempts),
            retry_backoff: retry_backoff.unwrap_or_else(QueueProviderConfig::default_retry_backoff),
            instantiation_backoff: instantiation_backoff
                .unwrap_or_else(QueueProviderConfig::default_instantiation_backoff),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty() {
        let input = "";
        let expected_output = QueueProviderConfig::default();

        let actual_output = serde_yml::from_str::<QueueProviderConfig>(input).unwrap();

        assert_eq!(expected_output, actual_output);
    }

    #[test]
    fn partial() {
        let input = r#"
poison_store_name: quarantine
default_max_trials: 3
default_visibility_timeout: 45s
"#;
        let actual_output = serde_yml::from_str::<QueueProviderConfig>(input).unwrap();

        assert_eq!(actual_output.poison_store_name, "quarantine");
        assert_eq!(actual_output.default_max_trials, 3);
        assert_eq!(
            actual_output.default_visibility_timeout,
            Duration::from_secs(45)
        );
        assert_eq!(
            actual_output.max_message_size,
            QueueProviderConfig::default_max_message_size()
        );
    }

    #[test]
    fn loose_field_names() {
        let input = r#"
PoisonStoreName: quarantine
MAX-MESSAGE-SIZE: 32768
"#;
        let actual_output = serde_yml::from_str::<QueueProviderConfig>(input).unwrap();

        assert_eq!(actual_output.poison_store_name, "quarantine");
        assert_eq!(actual_output.max_message_size, 32_768);
    }
}
