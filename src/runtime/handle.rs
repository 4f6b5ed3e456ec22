use std::{cell::RefCell, rc::Rc, sync::Arc};

use crate::runtime::table::Table;

/// Type tag of an external resource. Keys the per-context resource registry
/// and the destination-side descriptor cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Sampled audio buffer.
    SoundData,
    /// Playback session.
    Player,
}

/// Sampled audio buffer shared between contexts.
#[derive(Debug)]
pub struct SoundData {
    pub rate: f64,
    pub channels: u32,
    pub samples: Vec<f64>,
}

/// Playback session shared between contexts.
#[derive(Debug)]
pub struct Player {
    pub position: f64,
    pub looping: bool,
}

/// Externally-owned resource payload behind a shared refcount.
///
/// The reference count is the `Arc` strong count: every context holding a
/// live handle owns one increment, and the resource is released when the
/// last handle drops. Release-side concurrency discipline belongs to the
/// resource type, not to this crate.
#[derive(Debug)]
pub enum SharedResource {
    SoundData(SoundData),
    Player(Player),
}

impl SharedResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            SharedResource::SoundData(_) => ResourceKind::SoundData,
            SharedResource::Player(_) => ResourceKind::Player,
        }
    }
}

/// Small fixed-size handle record a context holds for one shared resource.
///
/// The descriptor table supplies the resource type's behavior inside the
/// owning context. It belongs to the context (not the resource), so
/// replication copies it per destination and caches it per type tag.
#[derive(Debug)]
pub struct Handle {
    pub kind: ResourceKind,
    pub resource: Arc<SharedResource>,
    pub descriptor: Rc<RefCell<Table>>,
}

impl Handle {
    pub fn new(
        kind: ResourceKind,
        resource: Arc<SharedResource>,
        descriptor: Rc<RefCell<Table>>,
    ) -> Self {
        Self {
            kind,
            resource,
            descriptor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind() {
        let sound = SharedResource::SoundData(SoundData {
            rate: 44100.0,
            channels: 2,
            samples: vec![0.0; 8],
        });
        assert_eq!(sound.kind(), ResourceKind::SoundData);

        let player = SharedResource::Player(Player {
            position: 0.0,
            looping: false,
        });
        assert_eq!(player.kind(), ResourceKind::Player);
    }
}
