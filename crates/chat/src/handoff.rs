//! Kiosk to WhatsApp hand-off bundle. Travels either as a percent-encoded
//! JSON query parameter (kiosk QR/link) or as an in-memory value (same-device
//! navigation). Malformed or partial input degrades to unknown fields; it
//! never fails the channel.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopper_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopper_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl HandoffPayload {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Encoded form for the kiosk QR code / link query parameter.
    pub fn encode_query(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned());
        urlencoding::encode(&json).into_owned()
    }

    /// Decode a query parameter value. Anything unparseable yields the
    /// all-unknown payload.
    pub fn decode_query(raw: &str) -> Self {
        let decoded = match urlencoding::decode(raw) {
            Ok(decoded) => decoded,
            Err(error) => {
                warn!(error = %error, "hand-off query parameter is not valid percent-encoding");
                return Self::default();
            }
        };
        match serde_json::from_str(&decoded) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(error = %error, "hand-off payload is not valid JSON, treating as empty");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HandoffPayload;

    fn payload() -> HandoffPayload {
        HandoffPayload {
            order_id: Some("ORD-2025-5678".to_owned()),
            product_name: Some("Allen Solly Blue Formal Shirt".to_owned()),
            shopper_name: Some("Rohan Mehta".to_owned()),
            shopper_id: Some("u-rohan".to_owned()),
            session_id: Some("SES-LZX41K2M-8QJ3".to_owned()),
        }
    }

    #[test]
    fn query_round_trip_preserves_every_field() {
        let encoded = payload().encode_query();
        // Percent-encoded: no raw braces or quotes survive.
        assert!(!encoded.contains('{'));
        assert_eq!(HandoffPayload::decode_query(&encoded), payload());
    }

    #[test]
    fn garbage_input_degrades_to_all_unknown() {
        assert!(HandoffPayload::decode_query("not-json-at-all").is_empty());
        assert!(HandoffPayload::decode_query("%7Bbroken").is_empty());
        assert!(HandoffPayload::decode_query("").is_empty());
    }

    #[test]
    fn partial_payloads_keep_what_they_carry() {
        let decoded = HandoffPayload::decode_query(
            &urlencoding::encode(r#"{"order_id":"ORD-1"}"#),
        );
        assert_eq!(decoded.order_id.as_deref(), Some("ORD-1"));
        assert!(decoded.product_name.is_none());
        assert!(decoded.shopper_name.is_none());
    }
}
