//! Response schemas handed to the provider for JSON-mode calls.
//! Uses the provider's OpenAPI subset (upper-case type names).

use serde_json::{json, Value};
use starlight_core::CampaignStatus;

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

pub fn videos() -> Value {
    array_of(object(
        json!({
            "id": string(),
            "title": string(),
            "thumbnailUrl": string(),
            "channelName": string(),
            "channelAvatarUrl": string(),
            "views": string(),
            "uploadTime": string(),
            "duration": string(),
            "description": string(),
            "category": string(),
        }),
        &["id", "title", "channelName", "views", "uploadTime", "duration", "description"],
    ))
}

pub fn comments() -> Value {
    array_of(object(
        json!({
            "author": string(),
            "text": string(),
            "likes": string(),
            "timestamp": string(),
        }),
        &["author", "text", "likes", "timestamp"],
    ))
}

pub fn ad_copy() -> Value {
    object(
        json!({
            "headline": string(),
            "body": string(),
            "callToAction": string(),
        }),
        &["headline", "body", "callToAction"],
    )
}

pub fn campaign_suggestions() -> Value {
    let statuses: Vec<&str> = CampaignStatus::ALL.iter().map(|s| s.as_str()).collect();
    array_of(object(
        json!({
            "title": string(),
            "status": { "type": "STRING", "enum": statuses },
            "spend": string(),
            "ctr": string(),
            "views": string(),
        }),
        &["title", "status", "spend", "ctr", "views"],
    ))
}

pub fn press_release() -> Value {
    object(json!({ "headline": string(), "body": string() }), &["headline", "body"])
}

pub fn quiz() -> Value {
    array_of(object(
        json!({
            "id": { "type": "INTEGER" },
            "question": string(),
            "options": array_of(string()),
            "correctIndex": { "type": "INTEGER" },
            "explanation": string(),
        }),
        &["id", "question", "options", "correctIndex"],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_status_enum_matches_wire_names() {
        let schema = campaign_suggestions();
        let allowed = schema["items"]["properties"]["status"]["enum"].as_array().unwrap();
        let names: Vec<&str> = allowed.iter().filter_map(Value::as_str).collect();
        assert_eq!(names, vec!["Active", "Paused", "Ended", "In Review"]);
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for schema in [videos(), comments(), quiz()] {
            let item = &schema["items"];
            for field in item["required"].as_array().unwrap() {
                let name = field.as_str().unwrap();
                assert!(item["properties"].get(name).is_some(), "{name} missing");
            }
        }
    }
}
