use super::{GeometryDescriptor, SceneAccess, SceneNode};
use crate::animation::{ObjectId, TransformSnapshot};
use bevy_ecs::prelude::*;
use std::collections::BTreeMap;

/// 内存场景
///
/// 节点按ID有序保存，遍历顺序稳定。ID从1开始分配且不复用。
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneStore {
    nodes: BTreeMap<ObjectId, SceneNode>,
    last_id: u64,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneAccess for SceneStore {
    fn transform(&self, id: ObjectId) -> Option<TransformSnapshot> {
        self.nodes.get(&id).map(|node| node.transform)
    }

    fn set_transform(&mut self, id: ObjectId, transform: TransformSnapshot) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    fn geometry(&self, id: ObjectId) -> Option<GeometryDescriptor> {
        self.nodes.get(&id).and_then(|node| node.geometry)
    }

    fn mesh_ids(&self) -> Vec<ObjectId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.geometry.is_some())
            .map(|(id, _)| *id)
            .collect()
    }

    fn add_node(&mut self, node: SceneNode) -> ObjectId {
        self.last_id += 1;
        let id = ObjectId::new(self.last_id);
        self.nodes.insert(id, node);
        id
    }

    fn remove_node(&mut self, id: ObjectId) -> bool {
        self.nodes.remove(&id).is_some()
    }
}
