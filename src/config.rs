#[cfg(feature = "serde")]
use figment::{
    providers::{Env, Serialized},
    Figment,
};

/// Decimal digits a 32-bit float carries reliably.
const FLT_DIG: i32 = 6;

const MIN_EXTRA_FLOAT_DIGITS: i32 = -15;
const MAX_EXTRA_FLOAT_DIGITS: i32 = 3;

/// Text output settings for half values.
///
/// Mirrors the database's `extra_float_digits` setting. A positive value
/// selects the shortest text that parses back to the same half; zero or
/// less selects `6 + extra_float_digits` significant digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OutputConfig {
    extra_float_digits: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            extra_float_digits: 1,
        }
    }
}

impl OutputConfig {
    /// Environment variable read by [`OutputConfig::from_env`].
    pub const ENV_VAR: &'static str = "PGHALF_EXTRA_FLOAT_DIGITS";

    /// Creates a config, clamping to the range the database accepts.
    pub fn new(extra_float_digits: i32) -> OutputConfig {
        OutputConfig {
            extra_float_digits: extra_float_digits
                .clamp(MIN_EXTRA_FLOAT_DIGITS, MAX_EXTRA_FLOAT_DIGITS),
        }
    }

    /// Reads the setting from `PGHALF_EXTRA_FLOAT_DIGITS`, falling back to the
    /// default when it is unset or not an integer.
    #[cfg(feature = "serde")]
    pub fn from_env() -> OutputConfig {
        let figment = Figment::new()
            .merge(Serialized::defaults(OutputConfig::default()))
            .merge(Env::prefixed("PGHALF_").only(&["extra_float_digits"]));

        match figment.extract::<OutputConfig>() {
            Ok(config) => OutputConfig::new(config.extra_float_digits),
            Err(e) => {
                tracing::warn!(
                    var = Self::ENV_VAR,
                    error = %e,
                    "ignoring invalid extra_float_digits"
                );
                OutputConfig::default()
            }
        }
    }

    /// Returns the effective setting.
    pub fn extra_float_digits(&self) -> i32 {
        // deserialized values skip `new`
        self.extra_float_digits
            .clamp(MIN_EXTRA_FLOAT_DIGITS, MAX_EXTRA_FLOAT_DIGITS)
    }

    /// Returns whether output uses the shortest round-trip form.
    pub fn shortest(&self) -> bool {
        self.extra_float_digits() > 0
    }

    /// Significant digits used when not in shortest mode.
    pub(crate) fn significant_digits(&self) -> usize {
        (FLT_DIG + self.extra_float_digits()).max(1) as usize
    }
}
