//! VK API response envelopes and their conversion into entity records.
//!
//! Every method answers with either `{"response": ...}` or
//! `{"error": {"error_code": .., "error_msg": ..}}`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use vkgraph_core::{SourceError, SubscriptionTarget, TargetKind, UserRecord, UserRef};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: Option<T>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    error_code: i64,
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: i64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    screen_name: Option<String>,
    sex: Option<i64>,
    city: Option<RawCity>,
}

#[derive(Debug, Deserialize)]
struct RawCity {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    id: i64,
    name: Option<String>,
    screen_name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    // Present on profile entries instead of `name`.
    first_name: Option<String>,
    last_name: Option<String>,
}

fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last)
}

impl From<RawUser> for UserRecord {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            name: full_name(&raw.first_name, &raw.last_name),
            screen_name: raw.screen_name.unwrap_or_default(),
            sex: raw.sex.unwrap_or(0),
            city: raw.city.and_then(|c| c.title).unwrap_or_default(),
        }
    }
}

impl From<RawTarget> for SubscriptionTarget {
    fn from(raw: RawTarget) -> Self {
        let kind = TargetKind::from_str(raw.kind.as_deref().unwrap_or("group"));
        let name = raw.name.unwrap_or_else(|| {
            full_name(
                raw.first_name.as_deref().unwrap_or_default(),
                raw.last_name.as_deref().unwrap_or_default(),
            )
        });
        Self {
            id: raw.id,
            name,
            screen_name: raw.screen_name.filter(|s| !s.is_empty()),
            kind,
        }
    }
}

/// Unwrap an envelope, turning the error object into [`SourceError::Api`].
fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

    if let Some(error) = envelope.error {
        return Err(SourceError::Api {
            code: error.error_code,
            message: error.error_msg.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    envelope
        .response
        .ok_or_else(|| SourceError::Malformed("neither response nor error present".to_string()))
}

/// Parse a `users.get` body. An empty list means the user does not exist.
pub fn parse_profile(body: &str, requested: &UserRef) -> Result<UserRecord, SourceError> {
    let users: Vec<RawUser> = unwrap_envelope(body)?;
    users
        .into_iter()
        .next()
        .map(UserRecord::from)
        .ok_or_else(|| SourceError::NotFound(requested.to_string()))
}

/// Parse a `users.getFollowers` body.
pub fn parse_followers(body: &str) -> Result<Vec<i64>, SourceError> {
    let list: ItemList<i64> = unwrap_envelope(body)?;
    Ok(list.items)
}

/// Parse an extended `users.getSubscriptions` body.
pub fn parse_subscriptions(body: &str) -> Result<Vec<SubscriptionTarget>, SourceError> {
    let list: ItemList<RawTarget> = unwrap_envelope(body)?;
    Ok(list.items.into_iter().map(SubscriptionTarget::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_success() {
        let body = r#"{"response":[{"id":100,"first_name":"Pavel","last_name":"Durov",
            "screen_name":"durov","sex":2,"city":{"id":2,"title":"Saint Petersburg"}}]}"#;
        let user = parse_profile(body, &UserRef::Id(100)).unwrap();
        assert_eq!(
            user,
            UserRecord {
                id: 100,
                name: "Pavel Durov".to_string(),
                screen_name: "durov".to_string(),
                sex: 2,
                city: "Saint Petersburg".to_string(),
            }
        );
    }

    #[test]
    fn test_profile_without_optional_fields() {
        let body = r#"{"response":[{"id":5,"first_name":"A","last_name":"B","city":null}]}"#;
        let user = parse_profile(body, &UserRef::Id(5)).unwrap();
        assert_eq!(user.screen_name, "");
        assert_eq!(user.sex, 0);
        assert_eq!(user.city, "");
    }

    #[test]
    fn test_profile_empty_list_is_not_found() {
        let err = parse_profile(r#"{"response":[]}"#, &UserRef::ScreenName("ghost".to_string())).unwrap_err();
        assert_eq!(err, SourceError::NotFound("ghost".to_string()));
    }

    #[test]
    fn test_error_object() {
        let body = r#"{"error":{"error_code":5,"error_msg":"User authorization failed: invalid access_token (4).","request_params":[]}}"#;
        let err = parse_profile(body, &UserRef::Id(1)).unwrap_err();
        assert!(matches!(err, SourceError::Api { code: 5, .. }));

        let err = parse_followers(r#"{"error":{"error_code":30}}"#).unwrap_err();
        assert_eq!(
            err,
            SourceError::Api {
                code: 30,
                message: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(parse_followers("<html>"), Err(SourceError::Malformed(_))));
        assert!(matches!(parse_followers("{}"), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn test_followers() {
        let body = r#"{"response":{"count":3,"items":[101,102,103]}}"#;
        assert_eq!(parse_followers(body).unwrap(), vec![101, 102, 103]);
        assert!(parse_followers(r#"{"response":{"count":0,"items":[]}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_subscriptions_mixed_types() {
        let body = r#"{"response":{"count":3,"items":[
            {"id":500,"name":"Chess Club","screen_name":"chess","type":"group"},
            {"id":600,"name":"News","screen_name":"","type":"page"},
            {"id":7,"first_name":"Ivan","last_name":"Ivanov","type":"profile"}
        ]}}"#;
        let targets = parse_subscriptions(body).unwrap();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].kind, TargetKind::Group);
        assert_eq!(targets[0].screen_name.as_deref(), Some("chess"));
        assert_eq!(targets[1].kind, TargetKind::Page);
        assert_eq!(targets[1].screen_name, None);
        assert_eq!(targets[2].kind, TargetKind::Profile);
        assert_eq!(targets[2].name, "Ivan Ivanov");
        assert!(targets[2].as_group().is_none());
    }
}
