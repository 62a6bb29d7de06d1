//! Request construction and strict response parsing for the wish backend.
//!
//! The backend speaks the Gemini `generateContent` shape: the request pins a
//! JSON response mime type plus a response schema with exactly the two
//! fields of [`WishResponse`], and the reply nests the generated JSON as
//! text inside `candidates[0].content.parts[0].text`.

use crate::client::WishResponse;
use crate::error::{Result, WishError};
use serde::Deserialize;
use serde_json::{json, Value};

/// Blessing prompt wrapped around the user's wish text.
pub fn wish_prompt(wish: &str) -> String {
    format!(
        "The user's wish is: \"{wish}\". \
         You are the Spirit of the Golden Evergreen. \
         Write a short, poetic, and luxurious blessing (max 25 words) that grants \
         this wish in a metaphorical way. \
         Use words related to gold, light, emerald, and eternity."
    )
}

/// Full `generateContent` request body for a wish.
pub fn request_body(wish: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": wish_prompt(wish) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "message": { "type": "STRING" },
                    "magicalFactor": {
                        "type": "NUMBER",
                        "description": "A random number between 80 and 100"
                    }
                },
                "required": ["message", "magicalFactor"]
            }
        }
    })
}

#[derive(Deserialize)]
struct Envelope {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

/// Parse a raw backend reply into a [`WishResponse`].
///
/// Strict on both layers: the envelope must carry at least one candidate
/// with text, and the inner JSON must carry both required fields. Factor
/// values outside the intended 80-100 range pass through untouched.
pub fn parse_response(body: &str) -> Result<WishResponse> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let text = envelope
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.as_str())
        .ok_or_else(|| WishError::Malformed("no candidate text in response".into()))?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(inner: &str) -> String {
        serde_json::to_string(&json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn test_prompt_carries_the_wish() {
        let prompt = wish_prompt("a quiet winter");
        assert!(prompt.contains("\"a quiet winter\""));
        assert!(prompt.contains("Spirit of the Golden Evergreen"));
    }

    #[test]
    fn test_request_body_pins_json_schema() {
        let body = request_body("peace");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let required = body["generationConfig"]["responseSchema"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 2);
    }

    #[test]
    fn test_parse_well_formed_response() {
        let raw = envelope(r#"{"message": "Gold light endures.", "magicalFactor": 93}"#);
        let parsed = parse_response(&raw).unwrap();
        assert_eq!(parsed.message, "Gold light endures.");
        assert_eq!(parsed.magical_factor, 93);
    }

    #[test]
    fn test_out_of_range_factor_passes_through() {
        let raw = envelope(r#"{"message": "m", "magicalFactor": 250}"#);
        assert_eq!(parse_response(&raw).unwrap().magical_factor, 250);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let raw = envelope(r#"{"message": "no factor here"}"#);
        assert!(matches!(
            parse_response(&raw),
            Err(WishError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_candidates_is_malformed() {
        let raw = r#"{"candidates": []}"#;
        assert!(matches!(parse_response(raw), Err(WishError::Malformed(_))));
    }

    #[test]
    fn test_garbage_is_malformed_not_a_panic() {
        assert!(parse_response("the spirits are quiet").is_err());
    }
}
