use humantime::parse_duration;
use queue_provider_deserialize::Slug;
use serde::de::{Error, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::Formatter;
use std::time::Duration;

/// Defines a collection of fine-tune parameters for an
/// [exponential backoff](backoff::ExponentialBackoff) mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffConfig {
    pub(crate) initial_interval: Duration,
    pub(crate) max_interval: Duration,
    pub(crate) randomization_factor: f64,
    pub(crate) multiplier: f64,
    pub(crate) max_elapsed_time: Option<Duration>,
}

impl BackoffConfig {
    /// Exposes the
    /// [initial interval](backoff::ExponentialBackoffBuilder::with_initial_interval)
    /// of this exponential backoff definition.
    pub fn initial_interval(&self) -> Duration {
        self.initial_interval
    }

    /// Exposes the
    /// [max interval](backoff::ExponentialBackoffBuilder::with_max_interval)
    /// of this exponential backoff definition.
    pub fn max_interval(&self) -> Duration {
        self.max_interval
    }

    /// Exposes the
    /// [randomization factor](backoff::ExponentialBackoffBuilder::with_randomization_factor)
    /// of this exponential backoff definition.
    pub fn randomization_factor(&self) -> f64 {
        self.randomization_factor
    }

    /// Exposes the
    /// [multiplier](backoff::ExponentialBackoffBuilder::with_multiplier)
    /// of this exponential backoff definition.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Exposes the
    /// [max elapsed time](backoff::ExponentialBackoffBuilder::with_max_elapsed_time)
    /// of this exponential backoff definition.
    pub fn max_elapsed_time(&self) -> Option<Duration> {
        self.max_elapsed_time
    }
}

impl BackoffConfig {
    fn default_initial_interval() -> Duration {
        Duration::from_secs(3)
    }

    fn default_max_interval() -> Duration {
        Duration::from_secs(60)
    }

    fn default_randomization_factor() -> f64 {
        0.5
    }

    fn default_multiplier() -> f64 {
        2.0
    }

    fn default_max_elapsed_time() -> Option<Duration> {
        None
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_interval: Self::default_initial_interval(),
            max_interval: Self::default_max_interval(),
            randomization_factor: Self::default_randomization_factor(),
            multiplier: Self::default_multiplier(),
            max_elapsed_time: Self::default_max_elapsed_time(),
        }
    }
}

impl BackoffConfig {
    /// Builds a [`BackoffConfig`] from explicit values, bypassing the
    /// individual defaults. Useful for crates downstream of this one that
    /// want to ship their own tuned default, without going through
    /// deserialization to get there.
    pub fn new(
        initial_interval: Duration,
        max_interval: Duration,
        randomization_factor: f64,
        multiplier: f64,
        max_elapsed_time: Option<Duration>,
    ) -> Self {
        Self {
            initial_interval,
            max_interval,
            randomization_factor,
            multiplier,
            max_elapsed_time,
        }
    }
}

impl AsRef<BackoffConfig> for BackoffConfig {
    fn as_ref(&self) -> &BackoffConfig {
        self
    }
}

/// Identifies one of the known fields of [`BackoffConfig`] during
/// deserialization, matching field names loosely (case- and
/// punctuation-insensitively) via [`Slug::eq_as_slugs`].
#[allow(non_camel_case_types)]
enum BackoffConfigField {
    initial_interval,
    max_interval,
    randomization_factor,
    multiplier,
    max_elapsed_time,
    __ignore,
}

impl BackoffConfigField {
    fn from_str(value: &str) -> Self {
        if Slug::eq_as_slugs(value, "initial_interval") {
            Self::initial_interval
        } else if Slug::eq_as_slugs(value, "max_interval") {
            Self::max_interval
        } else if Slug::eq_as_slugs(value, "randomization_factor") {
            Self::randomization_factor
        } else if Slug::eq_as_slugs(value, "multiplier") {
            Self::multiplier
        } else if Slug::eq_as_slugs(value, "max_elapsed_time") {
            Self::max_elapsed_time
        } else {
            Self::__ignore
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::initial_interval => "initial_interval",
            Self::max_interval => "max_interval",
            Self::randomization_factor => "randomization_factor",
            Self::multiplier => "multiplier",
            Self::max_elapsed_time => "max_elapsed_time",
            Self::__ignore => "__ignore",
        }
    }

    /// Polls the `next_value` from the given `MapAccess` reference and puts it
    /// into the given [`Option`]. Returns a Serde error on a duplicate field.
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

impl<'de> Deserialize<'de> for BackoffConfigField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = BackoffConfigField;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("a backoff configuration field name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(BackoffConfigField::from_str(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(BackoffConfigField::from_str(&value))
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for BackoffConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BackoffConfigVisitor)
    }
}

struct BackoffConfigVisitor;

impl<'de> Visitor<'de> for BackoffConfigVisitor {
    type Value = BackoffConfig;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a map of backoff configuration")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut initial_interval = None;
        let mut max_interval = None;
        let mut randomization_factor = None;
        let mut multiplier = None;
        let mut max_elapsed_time = None;

        while let Some(key) = map.next_key::<BackoffConfigField>()? {
            match key {
                BackoffConfigField::initial_interval => {
                    let duration_string = map.next_value::<String>()?;
                    let duration = parse_duration(&duration_string).map_err(Error::custom)?;
                    initial_interval = Some(duration);
                    IgnoredAny
                }
                BackoffConfigField::max_interval => {
                    let duration_string = map.next_value::<String>()?;
                    let duration = parse_duration(&duration_string).map_err(Error::custom)?;
                    max_interval = Some(duration);
                    IgnoredAny
                }
                BackoffConfigField::randomization_factor => {
                    key.poll(&mut map, &mut randomization_factor)?
                }
                BackoffConfigField::multiplier => key.poll(&mut map, &mut multiplier)?,
                BackoffConfigField::max_elapsed_time => {
                    let duration_string = map.next_value::<String>()?;
                    let duration = parse_duration(&duration_string).map_err(Error::custom)?;
                    max_elapsed_time = Some(Some(duration));
                    IgnoredAny
                }
                BackoffConfigField::__ignore => map.next_value()?,
            };
        }

        Ok(BackoffConfig {
            initial_interval: initial_interval
                .unwrap_or_else(BackoffConfig::default_initial_interval),
            max_interval: max_interval.unwrap_or_else(BackoffConfig::default_max_interval),
            randomization_factor: randomization_factor
                .unwrap_or_else(BackoffConfig::default_randomization_factor),
            multiplier: multiplier.unwrap_or_else(BackoffConfig::default_multiplier),
            max_elapsed_time: max_elapsed_time
                .unwrap_or_else(BackoffConfig::default_max_elapsed_time),
        })
    }
}
