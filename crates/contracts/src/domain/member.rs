use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer on whose behalf orders are placed. Created by admin action and
/// immutable afterwards; deletion is handled by the backend, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// DTO for creating a member from the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDto {
    pub name: String,
}

impl MemberDto {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Please enter member name".into());
        }
        Ok(())
    }
}

/// Case-insensitive substring filter used by the member pickers.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.to_lowercase();
    members
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_trims_and_validates() {
        let dto = MemberDto::new("  Budi  ");
        assert_eq!(dto.name, "Budi");
        assert!(dto.validate().is_ok());

        assert!(MemberDto::new("   ").validate().is_err());
    }

    #[test]
    fn test_filter_members() {
        let members = vec![
            Member {
                id: Uuid::new_v4(),
                name: "Budi".into(),
                created_at: None,
            },
            Member {
                id: Uuid::new_v4(),
                name: "Siti".into(),
                created_at: None,
            },
        ];
        let hits = filter_members(&members, "bu");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Budi");
        assert_eq!(filter_members(&members, "").len(), 2);
    }
}
