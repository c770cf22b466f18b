use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Serialization format for emitted samples.
///
/// Selected by the `data_format` configuration option; the monitor itself
/// never encodes anything, only the shipping layer does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON format (human-readable, good for debugging).
    #[default]
    Json,

    /// CBOR format (compact binary, better for high-volume telemetry).
    Cbor,
}

impl Format {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Cbor => "application/cbor",
        }
    }
}

/// Encoding/decoding errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CBOR serialization error: {0}")]
    Cbor(String),
}

impl From<ciborium::ser::Error<std::io::Error>> for CodecError {
    fn from(e: ciborium::ser::Error<std::io::Error>) -> Self {
        CodecError::Cbor(e.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for CodecError {
    fn from(e: ciborium::de::Error<std::io::Error>) -> Self {
        CodecError::Cbor(e.to_string())
    }
}

/// Encode a value to bytes using the specified format.
pub fn encode<T: Serialize>(value: &T, format: Format) -> Result<Vec<u8>, CodecError> {
    match format {
        Format::Json => serde_json::to_vec(value).map_err(CodecError::from),
        Format::Cbor => {
            let mut buf = Vec::new();
            ciborium::into_writer(value, &mut buf)?;
            Ok(buf)
        }
    }
}

/// Decode bytes to a value using the specified format.
pub fn decode<T: DeserializeOwned>(data: &[u8], format: Format) -> Result<T, CodecError> {
    match format {
        Format::Json => serde_json::from_slice(data).map_err(CodecError::from),
        Format::Cbor => ciborium::from_reader(data).map_err(CodecError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{FieldValue, Sample};

    fn sample() -> Sample {
        Sample::new("thermal_zone")
            .with_field("value", 45000i64)
            .with_tag("zone", "thermal_zone0")
            .with_tag("type", "cpu-thermal")
    }

    #[test]
    fn test_json_roundtrip() {
        let point = sample();
        let encoded = encode(&point, Format::Json).unwrap();
        let decoded: Sample = decode(&encoded, Format::Json).unwrap();

        assert_eq!(decoded.measurement, point.measurement);
        assert_eq!(decoded.fields.get("value"), Some(&FieldValue::Integer(45000)));
        assert_eq!(decoded.tags, point.tags);
    }

    #[test]
    fn test_cbor_roundtrip() {
        let point = sample();
        let encoded = encode(&point, Format::Cbor).unwrap();
        let decoded: Sample = decode(&encoded, Format::Cbor).unwrap();

        assert_eq!(decoded.measurement, point.measurement);
        assert_eq!(decoded.fields.get("value"), Some(&FieldValue::Integer(45000)));
        assert_eq!(decoded.tags, point.tags);
    }

    #[test]
    fn test_cbor_is_smaller() {
        let point = sample();
        let json = encode(&point, Format::Json).unwrap();
        let cbor = encode(&point, Format::Cbor).unwrap();

        assert!(cbor.len() < json.len(), "CBOR should be smaller than JSON");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(json5::from_str::<Format>("\"json\"").unwrap(), Format::Json);
        assert_eq!(json5::from_str::<Format>("\"cbor\"").unwrap(), Format::Cbor);
        assert_eq!(Format::default(), Format::Json);
    }
}
