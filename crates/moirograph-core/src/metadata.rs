//! The metadata contract.
//!
//! The decoder needs nothing from encode time except the stripe parameters.
//! They are carried as string key/value pairs in the persisted container's
//! auxiliary text storage and must survive the save/load round trip verbatim.

use crate::error::MoireError;
use crate::result::Result;
use crate::stripes::{StripeParameters, Waveform};

/// Auxiliary-storage key carrying the stripe period.
pub const KEY_STRIPE_PERIOD: &str = "stripe_period";

/// Auxiliary-storage key carrying the stripe waveform.
pub const KEY_STRIPE_TYPE: &str = "stripe_type";

/// The minimal state needed to regenerate the stripe key at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingMetadata {
    stripe: StripeParameters,
}

impl EncodingMetadata {
    pub fn new(stripe: StripeParameters) -> Self {
        Self { stripe }
    }

    pub fn stripe_parameters(&self) -> &StripeParameters {
        &self.stripe
    }

    /// Key/value pairs destined for the container's text storage.
    pub fn to_text_chunks(&self) -> Vec<(String, String)> {
        vec![
            (KEY_STRIPE_PERIOD.to_string(), self.stripe.period().to_string()),
            (KEY_STRIPE_TYPE.to_string(), self.stripe.waveform().to_string()),
        ]
    }

    /// Rebuild metadata from the container's text storage. Unknown keys are
    /// ignored.
    pub fn from_text_chunks<'a, I>(chunks: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut period = None;
        let mut waveform = None;

        for (key, value) in chunks {
            match key {
                KEY_STRIPE_PERIOD => {
                    period = Some(value.parse::<u32>().map_err(|_| {
                        MoireError::CorruptMetadata {
                            key: KEY_STRIPE_PERIOD,
                            value: value.to_string(),
                        }
                    })?);
                }
                KEY_STRIPE_TYPE => {
                    waveform = Some(value.parse::<Waveform>().map_err(|_| {
                        MoireError::CorruptMetadata {
                            key: KEY_STRIPE_TYPE,
                            value: value.to_string(),
                        }
                    })?);
                }
                _ => {}
            }
        }

        let period = period.ok_or(MoireError::MissingMetadata(KEY_STRIPE_PERIOD))?;
        let waveform = waveform.ok_or(MoireError::MissingMetadata(KEY_STRIPE_TYPE))?;

        Ok(Self {
            stripe: StripeParameters::new(period, waveform)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(period: u32, waveform: Waveform) -> EncodingMetadata {
        EncodingMetadata::new(StripeParameters::new(period, waveform).unwrap())
    }

    #[test]
    fn chunks_carry_both_keys() {
        let chunks = metadata(4, Waveform::Binary).to_text_chunks();

        assert_eq!(
            chunks,
            vec![
                ("stripe_period".to_string(), "4".to_string()),
                ("stripe_type".to_string(), "binary".to_string()),
            ]
        );
    }

    #[test]
    fn chunks_round_trip() {
        let original = metadata(10, Waveform::Sinusoidal);

        let chunks = original.to_text_chunks();
        let parsed = EncodingMetadata::from_text_chunks(
            chunks.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
        .unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let parsed = EncodingMetadata::from_text_chunks([
            ("Software", "moirograph"),
            ("stripe_period", "2"),
            ("stripe_type", "binary"),
        ])
        .unwrap();

        assert_eq!(parsed, metadata(2, Waveform::Binary));
    }

    #[test]
    fn absent_keys_are_missing_metadata() {
        assert!(matches!(
            EncodingMetadata::from_text_chunks([("stripe_type", "binary")]),
            Err(MoireError::MissingMetadata(KEY_STRIPE_PERIOD))
        ));
        assert!(matches!(
            EncodingMetadata::from_text_chunks([("stripe_period", "2")]),
            Err(MoireError::MissingMetadata(KEY_STRIPE_TYPE))
        ));
    }

    #[test]
    fn unparsable_values_are_corrupt_metadata() {
        assert!(matches!(
            EncodingMetadata::from_text_chunks([
                ("stripe_period", "two"),
                ("stripe_type", "binary")
            ]),
            Err(MoireError::CorruptMetadata { key: KEY_STRIPE_PERIOD, .. })
        ));
        assert!(matches!(
            EncodingMetadata::from_text_chunks([
                ("stripe_period", "2"),
                ("stripe_type", "sawtooth")
            ]),
            Err(MoireError::CorruptMetadata { key: KEY_STRIPE_TYPE, .. })
        ));
    }

    #[test]
    fn out_of_range_period_is_an_invalid_parameter() {
        assert!(matches!(
            EncodingMetadata::from_text_chunks([
                ("stripe_period", "1"),
                ("stripe_type", "binary")
            ]),
            Err(MoireError::InvalidParameter(_))
        ));
    }
}
