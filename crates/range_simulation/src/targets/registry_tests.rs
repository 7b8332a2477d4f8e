//! Tests for TargetRegistry

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    use crate::bridge::{HeadlessBackend, VisualKind};
    use crate::config::TargetConfig;
    use crate::targets::{random_spawn_position, TargetId, TargetRegistry};

    const ONE_SECOND: Duration = Duration::from_secs(1);

    fn seeded_registry(count: usize) -> (TargetRegistry, HeadlessBackend) {
        let mut backend = HeadlessBackend::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = TargetConfig::default();
        let mut registry = TargetRegistry::new();
        for _ in 0..count {
            registry.spawn(&mut rng, &mut backend, &config);
        }
        (registry, backend)
    }

    #[test]
    fn test_spawn_inside_bounds_at_fixed_height() {
        let (registry, backend) = seeded_registry(200);

        assert_eq!(registry.len(), 200);
        for target in registry.query_all() {
            assert!(target.alive);
            assert!(target.position.x >= -5.0 && target.position.x <= 5.0);
            assert!(target.position.z >= -5.0 && target.position.z <= 5.0);
            assert_eq!(target.position.y, 0.5);

            let visual = backend.visual(target.visual).expect("visual registered");
            assert_eq!(visual.kind, VisualKind::Target);
            assert_eq!(visual.position, target.position);
        }
    }

    #[test]
    fn test_ids_distinct_in_spawn_order() {
        let (registry, _backend) = seeded_registry(5);

        let ids: Vec<TargetId> = registry.query_all().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![TargetId(0), TargetId(1), TargetId(2), TargetId(3), TargetId(4)]
        );
    }

    #[test]
    fn test_zero_extent_spawns_at_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = TargetConfig {
            spawn_half_extent: 0.0,
            ..Default::default()
        };

        let position = random_spawn_position(&mut rng, &config);
        assert_eq!(position.x.abs(), 0.0);
        assert_eq!(position.z.abs(), 0.0);
        assert_eq!(position.y, 0.5);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let (a, _) = seeded_registry(5);
        let (b, _) = seeded_registry(5);

        let positions_a: Vec<Vec3> = a.query_all().iter().map(|t| t.position).collect();
        let positions_b: Vec<Vec3> = b.query_all().iter().map(|t| t.position).collect();
        assert_eq!(positions_a, positions_b);
    }

    #[test]
    fn test_remove_evicts_and_schedules_respawn() {
        let (mut registry, mut backend) = seeded_registry(3);
        let victim = registry.query_all()[1];

        let removed = registry
            .remove(victim.id, &mut backend, ONE_SECOND)
            .expect("target exists");

        assert_eq!(removed.id, victim.id);
        assert!(!removed.alive);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(victim.id).is_none());
        assert!(backend.visual(victim.visual).is_none());
        assert_eq!(registry.pending_respawns(), 1);

        // Оставшиеся - в исходном порядке
        let ids: Vec<TargetId> = registry.query_all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TargetId(0), TargetId(2)]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (mut registry, mut backend) = seeded_registry(2);

        assert!(registry
            .remove(TargetId(99), &mut backend, ONE_SECOND)
            .is_none());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.pending_respawns(), 0);
    }

    #[test]
    fn test_double_remove_schedules_once() {
        let (mut registry, mut backend) = seeded_registry(1);
        let id = registry.query_all()[0].id;

        assert!(registry.remove(id, &mut backend, ONE_SECOND).is_some());
        assert!(registry.remove(id, &mut backend, ONE_SECOND).is_none());
        assert_eq!(registry.pending_respawns(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_respawn_matures_after_exact_delay() {
        let (mut registry, mut backend) = seeded_registry(1);
        let id = registry.query_all()[0].id;
        registry.remove(id, &mut backend, ONE_SECOND);

        let quarter = Duration::from_millis(250);
        assert_eq!(registry.tick_respawns(quarter), 0);
        assert_eq!(registry.tick_respawns(quarter), 0);
        assert_eq!(registry.tick_respawns(quarter), 0);
        assert_eq!(registry.tick_respawns(quarter), 1);

        assert_eq!(registry.pending_respawns(), 0);
        assert_eq!(registry.tick_respawns(quarter), 0);
    }

    #[test]
    fn test_timers_are_independent() {
        let (mut registry, mut backend) = seeded_registry(2);
        let first = registry.query_all()[0].id;
        let second = registry.query_all()[1].id;

        registry.remove(first, &mut backend, ONE_SECOND);
        assert_eq!(registry.tick_respawns(Duration::from_millis(500)), 0);
        registry.remove(second, &mut backend, ONE_SECOND);

        assert_eq!(registry.tick_respawns(Duration::from_millis(500)), 1);
        assert_eq!(registry.pending_respawns(), 1);
        assert_eq!(registry.tick_respawns(Duration::from_millis(500)), 1);
        assert_eq!(registry.pending_respawns(), 0);
    }

    #[test]
    fn test_zero_delay_matures_on_next_poll() {
        let (mut registry, mut backend) = seeded_registry(1);
        let id = registry.query_all()[0].id;
        registry.remove(id, &mut backend, Duration::ZERO);

        assert_eq!(registry.tick_respawns(Duration::ZERO), 1);
    }

    #[test]
    fn test_find_by_visual() {
        let (registry, _backend) = seeded_registry(3);
        let target = registry.query_all()[2];

        let found = registry.find_by_visual(target.visual).expect("found");
        assert_eq!(found.id, target.id);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut backend = HeadlessBackend::new();
        let mut registry = TargetRegistry::new();
        let a = registry.spawn_at(Vec3::ZERO, &mut backend);
        registry.remove(a, &mut backend, ONE_SECOND);
        let b = registry.spawn_at(Vec3::ONE, &mut backend);

        assert_ne!(a, b);
    }
}
