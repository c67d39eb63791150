use super::interpolation::InterpolationMode;
use super::keyframe::{KeyframeStore, ObjectId, TransformSnapshot};
use super::service::AnimationService;
use super::timeline::TimelineState;
use crate::core::error::AnimationResult;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 序列化的关键帧记录
///
/// 记录列表是无序的，加载时重新建立有序索引。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeRecord {
    pub time: f32,
    pub object_id: ObjectId,
    pub position: [f32; 3],
    /// 欧拉角 (弧度)
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl KeyframeRecord {
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            position: Vec3::from_array(self.position),
            rotation: Vec3::from_array(self.rotation),
            scale: Vec3::from_array(self.scale),
        }
    }
}

impl KeyframeStore {
    /// 导出为扁平记录列表 (按时间、对象ID排序)
    pub fn to_records(&self) -> Vec<KeyframeRecord> {
        let mut records = Vec::new();
        for keyframe in self.iter() {
            for id in keyframe.objects() {
                if let Some(snapshot) = keyframe.get(id) {
                    records.push(KeyframeRecord {
                        time: keyframe.time(),
                        object_id: id,
                        position: snapshot.position.to_array(),
                        rotation: snapshot.rotation.to_array(),
                        scale: snapshot.scale.to_array(),
                    });
                }
            }
        }
        records
    }

    /// 从记录列表重建
    ///
    /// 记录时间按时间轴规整到 [0, duration)，非有限的快照被丢弃。
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a KeyframeRecord>,
        timeline: &TimelineState,
    ) -> Self {
        let mut store = Self::new();
        for record in records {
            let snapshot = record.snapshot();
            if !snapshot.is_finite() {
                tracing::warn!(
                    target: "animation",
                    "Dropping non-finite keyframe record for object {} at {}",
                    record.object_id,
                    record.time
                );
                continue;
            }
            let time = AnimationService::normalize_keyframe_time(timeline, record.time);
            store.add_keyframe(time, record.object_id, snapshot);
        }
        store
    }
}

/// 序列化的时间轴数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedTimeline {
    /// 总长度 (帧)
    pub duration: f32,
    /// 帧率
    pub fps: f32,
    /// 插值模式
    #[serde(default)]
    pub interpolation: InterpolationMode,
    /// 关键帧记录
    pub keyframes: Vec<KeyframeRecord>,
}

impl SerializedTimeline {
    pub fn capture(timeline: &TimelineState, store: &KeyframeStore) -> Self {
        Self {
            duration: timeline.duration,
            fps: timeline.fps,
            interpolation: timeline.interpolation,
            keyframes: store.to_records(),
        }
    }

    /// 还原时间轴设置与关键帧
    pub fn restore(&self) -> AnimationResult<(TimelineState, KeyframeStore)> {
        let mut timeline = TimelineState::new(self.duration, self.fps)?;
        timeline.interpolation = self.interpolation;
        let keyframes = KeyframeStore::from_records(&self.keyframes, &timeline);
        Ok((timeline, keyframes))
    }

    pub fn to_json(&self) -> AnimationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> AnimationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 保存到JSON文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> AnimationResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// 从JSON文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AnimationResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Interpolator;
    use crate::core::error::AnimationError;

    fn sample_store() -> KeyframeStore {
        let mut store = KeyframeStore::new();
        store.add_keyframe(
            0.0,
            ObjectId(1),
            TransformSnapshot::new(Vec3::ZERO, Vec3::new(0.1, 0.2, 0.3), Vec3::ONE),
        );
        store.add_keyframe(
            37.5,
            ObjectId(1),
            TransformSnapshot::new(
                Vec3::new(1.25, -3.5, 0.125),
                Vec3::new(1.5, 0.0, -0.75),
                Vec3::splat(2.0),
            ),
        );
        store.add_keyframe(37.5, ObjectId(2), TransformSnapshot::default());
        store
    }

    #[test]
    fn test_records_round_trip() {
        let store = sample_store();
        let records = store.to_records();
        assert_eq!(records.len(), 3);

        let timeline = TimelineState::new(60.0, 24.0).unwrap();
        let rebuilt = KeyframeStore::from_records(records.iter().rev(), &timeline);
        assert_eq!(rebuilt, store);
    }

    fn record(time: f32, x: f32) -> KeyframeRecord {
        KeyframeRecord {
            time,
            object_id: ObjectId(1),
            position: [x, 0.0, 0.0],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    #[test]
    fn test_restore_normalizes_out_of_range_times() {
        let serialized = SerializedTimeline {
            duration: 100.0,
            fps: 30.0,
            interpolation: InterpolationMode::Linear,
            keyframes: vec![
                record(40.0, 4.0),
                record(100.0, 1.0),
                record(-20.0, 2.0),
                record(250.0, 3.0),
            ],
        };
        let (_, store) = serialized.restore().unwrap();
        // 100 与 250 都落在循环起点，后写入的覆盖先写入的
        assert_eq!(store.times(), vec![0.0, 40.0]);
        assert_eq!(
            store.snapshot(0.0, ObjectId(1)).map(|s| s.position.x),
            Some(3.0)
        );
        assert!(store
            .times()
            .iter()
            .all(|&t| (0.0..serialized.duration).contains(&t)));
    }

    #[test]
    fn test_restore_drops_non_finite_records() {
        let serialized = SerializedTimeline {
            duration: 100.0,
            fps: 30.0,
            interpolation: InterpolationMode::Linear,
            keyframes: vec![record(10.0, 1.0), record(20.0, f32::INFINITY)],
        };
        let (_, store) = serialized.restore().unwrap();
        assert_eq!(store.times(), vec![10.0]);
    }

    #[test]
    fn test_json_round_trip_preserves_samples() {
        let store = sample_store();
        let mut timeline = TimelineState::new(60.0, 24.0).unwrap();
        timeline.interpolation = InterpolationMode::Smooth;

        let json = SerializedTimeline::capture(&timeline, &store).to_json().unwrap();
        let (restored_timeline, restored) = SerializedTimeline::from_json(&json)
            .unwrap()
            .restore()
            .unwrap();

        assert_eq!(restored_timeline.interpolation, InterpolationMode::Smooth);
        for step in 0..=120 {
            let t = step as f32 * 0.5;
            assert_eq!(
                Interpolator::sample(&store, t, 60.0, InterpolationMode::Smooth),
                Interpolator::sample(&restored, t, 60.0, InterpolationMode::Smooth),
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = SerializedTimeline::from_json("{ not json").unwrap_err();
        assert!(matches!(err, AnimationError::Serialization(_)));
    }
}
