use std::sync::Arc;

use crate::application::errors::HostError;
use crate::domain::entities::EntityState;
use crate::domain::traits::HomeHost;

/// Resolves a free-text name to an entity id against the host's live states.
/// Nothing is cached; every call takes a fresh snapshot.
#[derive(Clone)]
pub struct EntityResolver {
    host: Arc<dyn HomeHost>,
}

impl EntityResolver {
    pub fn new(host: Arc<dyn HomeHost>) -> Self {
        Self { host }
    }

    pub async fn resolve(&self, name: &str, domain: Option<&str>) -> Result<Option<String>, HostError> {
        let states = self.host.states().await?;
        let found = find_entity(&states, name, domain).map(|s| s.entity_id.clone());
        match &found {
            Some(id) => tracing::debug!("Resolved '{}' to {}", name, id),
            None => tracing::debug!("No entity matches '{}'", name),
        }
        Ok(found)
    }
}

/// Exact friendly-name match first, then substring of friendly name or id.
/// First hit in snapshot order wins.
pub fn find_entity<'a>(states: &'a [EntityState], name: &str, domain: Option<&str>) -> Option<&'a EntityState> {
    let name = name.to_lowercase();
    // Unlike the plain substring rule, where "" is contained in every name,
    // a bare "turn on" must not act on whichever entity happens to come first.
    if name.is_empty() {
        return None;
    }

    let prefix = domain.map(|d| format!("{}.", d));
    let prefix = prefix.as_deref();
    let in_domain = |s: &&EntityState| prefix.map_or(true, |p| s.entity_id.starts_with(p));
    let friendly = |s: &EntityState| s.friendly_name().unwrap_or_default().to_lowercase();

    states
        .iter()
        .filter(in_domain)
        .find(|s| friendly(*s) == name)
        .or_else(|| {
            states.iter().filter(in_domain).find(|s| {
                friendly(*s).contains(&name) || s.entity_id.to_lowercase().contains(&name)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<EntityState> {
        vec![
            EntityState::new("light.kitchen", "off").with_friendly_name("Kitchen Light"),
            EntityState::new("light.main", "on").with_friendly_name("Light"),
            EntityState::new("scene.movie", "scening").with_friendly_name("Movie Night"),
            EntityState::new("switch.movie_projector", "off"),
        ]
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let states = states();
        let found = find_entity(&states, "Light", None).unwrap();
        assert_eq!(found.entity_id, "light.main");
    }

    #[test]
    fn test_substring_on_friendly_name() {
        let states = states();
        assert_eq!(find_entity(&states, "kitchen", None).unwrap().entity_id, "light.kitchen");
    }

    #[test]
    fn test_substring_on_entity_id() {
        let states = states();
        assert_eq!(
            find_entity(&states, "projector", None).unwrap().entity_id,
            "switch.movie_projector"
        );
    }

    #[test]
    fn test_domain_filter() {
        let states = states();
        assert_eq!(find_entity(&states, "movie", Some("scene")).unwrap().entity_id, "scene.movie");
        assert_eq!(
            find_entity(&states, "movie", Some("switch")).unwrap().entity_id,
            "switch.movie_projector"
        );
        assert!(find_entity(&states, "kitchen", Some("scene")).is_none());
    }

    #[test]
    fn test_not_found_and_empty() {
        let states = states();
        assert!(find_entity(&states, "garage", None).is_none());
        assert!(find_entity(&states, "", None).is_none());
    }
}
