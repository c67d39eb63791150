#[cfg(test)]
mod property_tests {
    use crate::animation::*;
    use glam::Vec3;
    use proptest::prelude::*;

    const DURATION: f32 = 100.0;

    fn store_from(points: &[(u32, f32)]) -> KeyframeStore {
        let mut store = KeyframeStore::new();
        for &(time, x) in points {
            store.add_keyframe(
                time as f32,
                ObjectId::new(1),
                TransformSnapshot::from_position(Vec3::new(x, -x, 2.0 * x)),
            );
        }
        store
    }

    proptest! {
        #[test]
        fn sample_at_stored_time_is_exact(
            points in prop::collection::vec((0u32..100, -50.0f32..50.0), 2..8),
            smooth in any::<bool>(),
        ) {
            let store = store_from(&points);
            prop_assume!(store.len() >= 2);
            let mode = if smooth { InterpolationMode::Smooth } else { InterpolationMode::Linear };

            for keyframe in store.iter() {
                let sampled = Interpolator::sample(&store, keyframe.time(), DURATION, mode);
                prop_assert_eq!(sampled.len(), 1);
                prop_assert_eq!(Some(&sampled[0].1), keyframe.get(ObjectId::new(1)));
            }
        }

        #[test]
        fn alpha_always_in_unit_range(
            points in prop::collection::vec((0u32..100, -50.0f32..50.0), 2..8),
            t in 0.0f32..=100.0,
        ) {
            let store = store_from(&points);
            prop_assume!(store.len() >= 2);
            let bracket = Interpolator::bracket(&store, t, DURATION).unwrap();
            prop_assert!((0.0..=1.0).contains(&bracket.alpha));
        }

        #[test]
        fn sample_stays_between_bracketing_values(
            points in prop::collection::vec((0u32..100, -50.0f32..50.0), 2..8),
            t in 0.0f32..100.0,
        ) {
            let store = store_from(&points);
            prop_assume!(store.len() >= 2);
            let bracket = Interpolator::bracket(&store, t, DURATION).unwrap();
            let a = bracket.prev.get(ObjectId::new(1)).unwrap().position.x;
            let b = bracket.next.get(ObjectId::new(1)).unwrap().position.x;
            let x = Interpolator::sample(&store, t, DURATION, InterpolationMode::Smooth)[0].1.position.x;
            prop_assert!(x >= a.min(b) - 1e-3 && x <= a.max(b) + 1e-3);
        }

        #[test]
        fn loop_closes_with_keyframe_at_zero(
            points in prop::collection::vec((1u32..100, -50.0f32..50.0), 1..6),
            start in -50.0f32..50.0,
        ) {
            let mut all = vec![(0u32, start)];
            all.extend(points);
            let store = store_from(&all);
            prop_assume!(store.len() >= 2);

            let at_end = Interpolator::sample(&store, DURATION, DURATION, InterpolationMode::Linear);
            let at_start = Interpolator::sample(&store, 0.0, DURATION, InterpolationMode::Linear);
            prop_assert_eq!(at_end, at_start);
        }

        #[test]
        fn continuity_away_from_keyframes(
            points in prop::collection::vec((0u32..100, -50.0f32..50.0), 2..8),
            t in 0.5f32..99.5,
        ) {
            let store = store_from(&points);
            prop_assume!(store.len() >= 2);
            let eps = 1e-3;
            // 第一个关键帧之前停在最后一个姿态，在第一个关键帧处跳变
            let first = store.times()[0];
            prop_assume!((t - first).abs() > 2.0 * eps);
            let x = |time: f32| Interpolator::sample(&store, time, DURATION, InterpolationMode::Linear)[0].1.position.x;
            // 相邻关键帧最小间隔为1帧，值域跨度不超过100，斜率有界
            prop_assert!((x(t - eps) - x(t + eps)).abs() < 0.5);
        }
    }
}
