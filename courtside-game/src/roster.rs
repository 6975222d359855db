//! Player repository: a read-only catalog loaded once.
use std::collections::HashMap;

use thiserror::Error;

use crate::player::PlayerProfile;

const DEFAULT_PLAYERS_DATA: &str = include_str!("../../assets/data/players.json");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("player not found: {0}")]
    PlayerNotFound(String),
    #[error("duplicate player id: {0}")]
    DuplicateId(String),
    #[error("failed to parse player data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lookup-by-id contract consumed by match entry points.
pub trait PlayerRepository {
    /// # Errors
    ///
    /// Returns [`RosterError::PlayerNotFound`] for an unknown id.
    fn player(&self, id: &str) -> Result<&PlayerProfile, RosterError>;

    fn players(&self) -> &[PlayerProfile];
}

/// In-memory catalog in dataset order.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: Vec<PlayerProfile>,
    index: HashMap<String, usize>,
}

impl PlayerCatalog {
    /// Build a catalog, rejecting repeated ids. Players without an id are kept
    /// for listing but cannot be looked up.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateId`] when two players share an id.
    pub fn new(players: Vec<PlayerProfile>) -> Result<Self, RosterError> {
        let mut index = HashMap::with_capacity(players.len());
        for (position, player) in players.iter().enumerate() {
            let Some(id) = player.id.as_ref() else {
                continue;
            };
            if index.insert(id.as_str().to_string(), position).is_some() {
                return Err(RosterError::DuplicateId(id.to_string()));
            }
        }
        Ok(Self { players, index })
    }

    /// Parse a JSON array of player records.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Parse`] for malformed JSON and
    /// [`RosterError::DuplicateId`] for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let players: Vec<PlayerProfile> = serde_json::from_str(json)?;
        Self::new(players)
    }

    /// Load the dataset bundled with the crate.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled dataset is itself invalid.
    pub fn load_default() -> Result<Self, RosterError> {
        Self::from_json(DEFAULT_PLAYERS_DATA)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerRepository for PlayerCatalog {
    fn player(&self, id: &str) -> Result<&PlayerProfile, RosterError> {
        self.index
            .get(id.trim())
            .and_then(|&position| self.players.get(position))
            .ok_or_else(|| RosterError::PlayerNotFound(id.to_string()))
    }

    fn players(&self) -> &[PlayerProfile] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_compare_textually() {
        let catalog = PlayerCatalog::from_json(
            r#"[{"id": 1, "name": "One"}, {"id": "two", "name": "Two"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.player("1").unwrap().name, "One");
        assert_eq!(catalog.player("two").unwrap().name, "Two");
        assert_eq!(catalog.player(" 1 ").unwrap().name, "One");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = PlayerCatalog::from_json(r#"[{"id": 1, "name": "One"}]"#).unwrap();
        assert!(matches!(
            catalog.player("99"),
            Err(RosterError::PlayerNotFound(id)) if id == "99"
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = PlayerCatalog::from_json(
            r#"[{"id": 7, "name": "A"}, {"id": "7", "name": "B"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::DuplicateId(id) if id == "7"));
    }

    #[test]
    fn bundled_dataset_loads_with_long_keys() {
        let catalog = PlayerCatalog::load_default().unwrap();
        assert!(!catalog.is_empty());
        let first = &catalog.players()[0];
        assert!(first.fg_pct.is_some());
        assert!(first.height_inches().is_ok());
        for player in catalog.players() {
            assert!(player.height_inches().is_ok(), "bad height for {}", player.name);
        }
    }
}
