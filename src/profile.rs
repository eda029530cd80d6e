//! Player profile
//!
//! The menu asks for a name before a run can start; it is persisted so the
//! game page and the leaderboard submission can read it back.

use thiserror::Error;

use crate::platform::storage;

/// Longest name accepted (characters)
pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("enter your name")]
    Empty,
    #[error("name must be at most {} characters", MAX_NAME_LEN)]
    TooLong,
}

/// Trim and validate a name typed at the menu
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameError::TooLong);
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
}

impl PlayerProfile {
    const STORAGE_KEY: &'static str = "playerName";

    /// Validate `raw` and build a profile from it
    pub fn from_input(raw: &str) -> Result<Self, NameError> {
        Ok(Self {
            name: validate_name(raw)?,
        })
    }

    /// Load the stored profile, if a valid name was saved
    pub fn load() -> Option<Self> {
        let raw = storage::get_item(Self::STORAGE_KEY)?;
        match Self::from_input(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Ignoring stored player name: {}", e);
                None
            }
        }
    }

    pub fn save(&self) {
        if storage::set_item(Self::STORAGE_KEY, &self.name) {
            log::info!("Player name saved: {}", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims() {
        assert_eq!(validate_name("  ana  ").as_deref(), Ok("ana"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("   \t"), Err(NameError::Empty));
        assert_eq!(NameError::Empty.to_string(), "enter your name");
    }

    #[test]
    fn test_long_name_rejected() {
        assert_eq!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)), Err(NameError::TooLong));
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_save_and_load() {
        assert_eq!(PlayerProfile::load(), None);
        let profile = PlayerProfile::from_input(" bo ").unwrap();
        profile.save();
        assert_eq!(PlayerProfile::load(), Some(PlayerProfile { name: "bo".into() }));
    }
}
