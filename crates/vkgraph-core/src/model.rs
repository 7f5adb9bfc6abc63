//! Entity records exchanged between the source, the engine and the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference to a user as accepted by the remote source.
///
/// Seeds may be given as a screen name; everything discovered during a crawl
/// is referenced by numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(i64),
    ScreenName(String),
}

impl UserRef {
    /// Numeric id, if this reference carries one.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::ScreenName(_) => None,
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::ScreenName(name) => f.write_str(name),
        }
    }
}

impl FromStr for UserRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("user reference must not be empty".to_string());
        }
        // VK also accepts the "id123" form for numeric users.
        let digits = s.strip_prefix("id").filter(|rest| !rest.is_empty()).unwrap_or(s);
        match digits.parse::<i64>() {
            Ok(id) => Ok(Self::Id(id)),
            Err(_) => Ok(Self::ScreenName(s.to_string())),
        }
    }
}

impl From<i64> for UserRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

/// A user profile, as fetched and as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    /// "First Last".
    pub name: String,
    pub screen_name: String,
    /// VK sex code: 0 unknown, 1 female, 2 male.
    pub sex: i64,
    pub city: String,
}

/// A group (community) node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
    pub screen_name: String,
}

/// Type tag of a subscription target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Group,
    Page,
    Event,
    /// Another user's profile. Not a group.
    Profile,
}

impl TargetKind {
    /// Parse from the remote type tag. Unknown tags are treated as groups.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "profile" => Self::Profile,
            "page" => Self::Page,
            "event" => Self::Event,
            _ => Self::Group,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Page => "page",
            Self::Event => "event",
            Self::Profile => "profile",
        }
    }
}

/// One entry of a user's subscription list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionTarget {
    pub id: i64,
    pub name: String,
    pub screen_name: Option<String>,
    pub kind: TargetKind,
}

impl SubscriptionTarget {
    /// The group this target stands for, or `None` for profile pseudo-subscriptions.
    pub fn as_group(&self) -> Option<GroupRecord> {
        if self.kind == TargetKind::Profile {
            return None;
        }
        Some(GroupRecord {
            id: self.id,
            name: self.name.clone(),
            screen_name: self.screen_name.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_parsing() {
        assert_eq!("100".parse::<UserRef>().unwrap(), UserRef::Id(100));
        assert_eq!("id42".parse::<UserRef>().unwrap(), UserRef::Id(42));
        assert_eq!(
            "durov".parse::<UserRef>().unwrap(),
            UserRef::ScreenName("durov".to_string())
        );
        assert_eq!(
            "idiot".parse::<UserRef>().unwrap(),
            UserRef::ScreenName("idiot".to_string())
        );
        assert!("  ".parse::<UserRef>().is_err());
    }

    #[test]
    fn test_profile_target_is_not_a_group() {
        let target = SubscriptionTarget {
            id: 7,
            name: "Somebody".to_string(),
            screen_name: None,
            kind: TargetKind::from_str("profile"),
        };
        assert!(target.as_group().is_none());
    }

    #[test]
    fn test_page_target_becomes_group() {
        let target = SubscriptionTarget {
            id: 500,
            name: "Chess Club".to_string(),
            screen_name: None,
            kind: TargetKind::from_str("page"),
        };
        let group = target.as_group().unwrap();
        assert_eq!(group.id, 500);
        assert_eq!(group.screen_name, "");
    }
}
