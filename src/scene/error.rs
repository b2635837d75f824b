use super::actor::ActorId;

/// Error type for tree and scene operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live actor.
    UnknownActor(ActorId),
    /// The child is the parent itself or one of its ancestors.
    Cycle { parent: ActorId, child: ActorId },
    /// No scene is registered under this name.
    UnknownScene(String),
    /// A scene with this name already exists.
    DuplicateScene(String),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::UnknownActor(id) => write!(f, "Unknown actor: {}", id),
            SceneError::Cycle { parent, child } => {
                write!(f, "Adding {} under {} would create a cycle", child, parent)
            }
            SceneError::UnknownScene(name) => write!(f, "Unknown scene: {}", name),
            SceneError::DuplicateScene(name) => write!(f, "Scene already exists: {}", name),
        }
    }
}

impl std::error::Error for SceneError {}
