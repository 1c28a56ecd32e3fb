/// A team registered for exactly one season
///
/// # Invariants
/// - Always belongs to a season
/// - Name is unique across all teams (enforced by the store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Option<i64>,
    name: String,
    color: Option<String>,
    season_id: i64,
}

/// Partial update of a [`Team`]
///
/// Name and season cannot be cleared, only replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
    pub season_id: Option<i64>,
}

impl Team {
    /// Creates an unpersisted team
    pub fn new(name: String, color: Option<String>, season_id: i64) -> Self {
        Self {
            id: None,
            name,
            color,
            season_id,
        }
    }

    /// Applies a partial update, overwriting only supplied fields
    pub fn apply(&mut self, patch: TeamPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(season_id) = patch.season_id {
            self.season_id = season_id;
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn season_id(&self) -> i64 {
        self.season_id
    }

    /// Reconstructs a Team from persistence layer data
    pub fn from_persistence(id: i64, name: String, color: Option<String>, season_id: i64) -> Self {
        Self {
            id: Some(id),
            name,
            color,
            season_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_getters() {
        let team = Team::new("Falcons".to_string(), Some("red".to_string()), 2);

        assert!(team.id().is_none());
        assert_eq!(team.name(), "Falcons");
        assert_eq!(team.color(), Some("red"));
        assert_eq!(team.season_id(), 2);
    }

    #[test]
    fn apply_only_supplied_fields() {
        let mut team = Team::from_persistence(5, "Falcons".to_string(), Some("red".to_string()), 2);

        team.apply(TeamPatch {
            color: Some(None),
            ..TeamPatch::default()
        });

        assert_eq!(team.name(), "Falcons");
        assert!(team.color().is_none());
        assert_eq!(team.season_id(), 2);
        assert_eq!(team.id(), Some(5));
    }
}
