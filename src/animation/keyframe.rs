use crate::impl_default;
use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 场景对象ID
///
/// 只是指向场景的弱引用：对象被删除后，关键帧里残留的条目会被静默跳过。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 变换快照
///
/// 旋转以XYZ顺序的欧拉角 (弧度) 保存，插值时按分量线性混合。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    /// 位置
    pub position: Vec3,
    /// 欧拉角旋转 (弧度)
    pub rotation: Vec3,
    /// 缩放
    pub scale: Vec3,
}

impl_default!(TransformSnapshot {
    position: Vec3::ZERO,
    rotation: Vec3::ZERO,
    scale: Vec3::ONE,
});

impl TransformSnapshot {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// 仅指定位置，旋转为零、缩放为一
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// 欧拉角对应的四元数
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// 局部到世界的仿射矩阵
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.to_affine().transform_point3(local)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// 关键帧：某一时间点上各对象的变换快照
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    time: f32,
    snapshots: HashMap<ObjectId, TransformSnapshot>,
}

impl Keyframe {
    fn new(time: f32) -> Self {
        Self {
            time,
            snapshots: HashMap::new(),
        }
    }

    /// 时间 (帧)
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn get(&self, id: ObjectId) -> Option<&TransformSnapshot> {
        self.snapshots.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.snapshots.contains_key(&id)
    }

    /// 本关键帧记录的对象 (按ID排序)
    pub fn objects(&self) -> Vec<ObjectId> {
        let mut ids: Vec<_> = self.snapshots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &TransformSnapshot)> {
        self.snapshots.iter().map(|(id, snapshot)| (*id, snapshot))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// 关键帧存储
///
/// 按时间升序保存互不相同的关键帧，因此存储本身就是插值查找所用的有序时间索引。
/// 时间相等按位比较，和宿主传入的浮点帧号一致。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeStore {
    keyframes: Vec<Keyframe>,
}

impl KeyframeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加或覆盖关键帧
    ///
    /// 同一时间再次添加只会覆盖该对象的快照，同一关键帧中其他对象不受影响。
    pub fn add_keyframe(&mut self, time: f32, id: ObjectId, snapshot: TransformSnapshot) {
        let time = canonical(time);
        // 按时间排序插入
        let index = match self.search(time) {
            Ok(index) => index,
            Err(index) => {
                self.keyframes.insert(index, Keyframe::new(time));
                index
            }
        };
        self.keyframes[index].snapshots.insert(id, snapshot);
    }

    /// 删除整个关键帧
    pub fn remove_keyframe(&mut self, time: f32) -> Option<Keyframe> {
        let index = self.search(time).ok()?;
        Some(self.keyframes.remove(index))
    }

    /// 从关键帧中删除单个对象；关键帧变空时一并删除
    pub fn remove_object(&mut self, time: f32, id: ObjectId) -> Option<TransformSnapshot> {
        let index = self.search(time).ok()?;
        let removed = self.keyframes[index].snapshots.remove(&id);
        if self.keyframes[index].is_empty() {
            self.keyframes.remove(index);
        }
        removed
    }

    pub fn get(&self, time: f32) -> Option<&Keyframe> {
        self.search(time).ok().map(|index| &self.keyframes[index])
    }

    pub fn snapshot(&self, time: f32, id: ObjectId) -> Option<&TransformSnapshot> {
        self.get(time).and_then(|keyframe| keyframe.get(id))
    }

    /// 有序且互不相同的关键帧时间
    pub fn times(&self) -> Vec<f32> {
        self.keyframes.iter().map(Keyframe::time).collect()
    }

    /// 按时间顺序遍历
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keyframes.iter()
    }

    pub fn as_slice(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn clear(&mut self) {
        self.keyframes.clear();
    }

    fn search(&self, time: f32) -> Result<usize, usize> {
        let time = canonical(time);
        self.keyframes
            .binary_search_by(|keyframe| keyframe.time.total_cmp(&time))
    }
}

/// -0.0 与 0.0 视为同一时间
fn canonical(time: f32) -> f32 {
    time + 0.0
}
