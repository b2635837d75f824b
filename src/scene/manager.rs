//! Named top-level scenes sharing one actor tree.

use super::actor::ActorId;
use super::error::SceneError;
use super::tree::ActorTree;
use std::collections::HashMap;

/// Maps scene names to root actors and tracks the current one.
///
/// Scene roots are zero-sized group actors: an input hook on a root sees
/// every event its children leave unhandled.
#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: HashMap<String, ActorId>,
    current: Option<String>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the root actor of a new scene. The first scene added becomes
    /// current.
    pub fn add_scene(
        &mut self,
        tree: &mut ActorTree,
        name: impl Into<String>,
    ) -> Result<ActorId, SceneError> {
        let name = name.into();
        if self.scenes.contains_key(&name) {
            return Err(SceneError::DuplicateScene(name));
        }
        let root = tree.create(name.clone());
        log::info!("SCENE: Added scene '{}' ({})", name, root);
        if self.current.is_none() {
            self.current = Some(name.clone());
        }
        self.scenes.insert(name, root);
        Ok(root)
    }

    /// Destroys a scene and everything in it.
    pub fn remove_scene(&mut self, tree: &mut ActorTree, name: &str) -> Result<(), SceneError> {
        let root = self
            .scenes
            .remove(name)
            .ok_or_else(|| SceneError::UnknownScene(name.to_string()))?;
        tree.destroy(root);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        log::info!("SCENE: Removed scene '{}'", name);
        Ok(())
    }

    pub fn switch_to(&mut self, name: &str) -> Result<ActorId, SceneError> {
        let root = self
            .scene(name)
            .ok_or_else(|| SceneError::UnknownScene(name.to_string()))?;
        if self.current.as_deref() != Some(name) {
            log::info!(
                "SCENE: Switching {} -> {}",
                self.current.as_deref().unwrap_or("<none>"),
                name
            );
            self.current = Some(name.to_string());
        }
        Ok(root)
    }

    /// Root of the current scene.
    pub fn current(&self) -> Option<ActorId> {
        self.current.as_deref().and_then(|name| self.scene(name))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn scene(&self, name: &str) -> Option<ActorId> {
        self.scenes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_scene_becomes_current() {
        let mut tree = ActorTree::new();
        let mut scenes = SceneManager::new();
        let menu = scenes.add_scene(&mut tree, "menu").unwrap();
        scenes.add_scene(&mut tree, "game").unwrap();
        assert_eq!(scenes.current(), Some(menu));
        assert_eq!(scenes.current_name(), Some("menu"));
        assert_eq!(tree.get(menu).unwrap().name(), "menu");
    }

    #[test]
    fn test_switch_and_errors() {
        let mut tree = ActorTree::new();
        let mut scenes = SceneManager::new();
        scenes.add_scene(&mut tree, "menu").unwrap();
        let game = scenes.add_scene(&mut tree, "game").unwrap();

        assert_eq!(scenes.switch_to("game"), Ok(game));
        assert_eq!(scenes.current(), Some(game));
        assert_eq!(
            scenes.switch_to("credits"),
            Err(SceneError::UnknownScene("credits".to_string()))
        );
        assert_eq!(scenes.current(), Some(game));
        assert_eq!(
            scenes.add_scene(&mut tree, "menu"),
            Err(SceneError::DuplicateScene("menu".to_string()))
        );
    }

    #[test]
    fn test_remove_current_scene_destroys_root() {
        let mut tree = ActorTree::new();
        let mut scenes = SceneManager::new();
        let menu = scenes.add_scene(&mut tree, "menu").unwrap();
        let button = tree.create("button");
        tree.add_child(menu, button).unwrap();

        scenes.remove_scene(&mut tree, "menu").unwrap();
        assert_eq!(scenes.current(), None);
        assert!(!tree.contains(menu));
        assert!(!tree.contains(button));
        assert!(scenes.remove_scene(&mut tree, "menu").is_err());
        assert!(scenes.is_empty());
    }
}
