//! Procedural obstacle spawning
//!
//! Each step may spawn either a packed cluster (tight gap range) or a single
//! isolated obstacle (loose gap range) at the right edge of the viewport.
//! Spawning is gated by a frame-rate independent random draw, the live
//! obstacle cap, and the distance travelled since the previous spawn.

use rand::Rng;

use super::state::{GapKind, Obstacle, Viewport, World};
use crate::tuning::Tuning;
use crate::util::random_int;

/// Obstacles per tight cluster
pub const CLUSTER_COUNT_MIN: i32 = 2;
pub const CLUSTER_COUNT_MAX: i32 = 3;
/// Shared base height of a cluster
pub const CLUSTER_BASE_HEIGHT_MIN: i32 = 20;
pub const CLUSTER_BASE_HEIGHT_MAX: i32 = 40;
/// Per-obstacle deviation from the cluster base height
pub const CLUSTER_HEIGHT_JITTER: i32 = 10;
/// Horizontal step between obstacles in a cluster
pub const CLUSTER_SPACING_MIN: i32 = 30;
pub const CLUSTER_SPACING_MAX: i32 = 50;
pub const CLUSTER_WIDTH_MIN: i32 = 15;
pub const CLUSTER_WIDTH_MAX: i32 = 30;

pub const SINGLE_HEIGHT_MIN: i32 = 20;
pub const SINGLE_HEIGHT_MAX: i32 = 50;
pub const SINGLE_WIDTH_MIN: i32 = 20;
pub const SINGLE_WIDTH_MAX: i32 = 40;

/// Pick the gap range for the next spawn
pub fn choose_gap_kind<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> GapKind {
    if rng.random::<f32>() < tuning.tight_gap_chance {
        GapKind::Tight
    } else {
        GapKind::Loose
    }
}

/// Cluster of 2-3 narrow obstacles around `base_height`, starting at the right edge
pub fn tight_cluster<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    viewport: &Viewport,
    base_height: i32,
) -> Vec<Obstacle> {
    let ground_line = viewport.ground_line(tuning.ground_height);
    let count = random_int(rng, CLUSTER_COUNT_MIN, CLUSTER_COUNT_MAX);

    let mut x = viewport.width;
    let mut cluster = Vec::with_capacity(count as usize);
    for i in 0..count {
        if i > 0 {
            x += random_int(rng, CLUSTER_SPACING_MIN, CLUSTER_SPACING_MAX) as f32;
        }
        let height = base_height + random_int(rng, -CLUSTER_HEIGHT_JITTER, CLUSTER_HEIGHT_JITTER);
        let width = random_int(rng, CLUSTER_WIDTH_MIN, CLUSTER_WIDTH_MAX);
        cluster.push(Obstacle::on_ground(
            x,
            width as f32,
            height as f32,
            ground_line,
            tuning.obstacle_color,
        ));
    }
    cluster
}

/// One obstacle at the right edge
pub fn single_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    viewport: &Viewport,
) -> Obstacle {
    let height = random_int(rng, SINGLE_HEIGHT_MIN, SINGLE_HEIGHT_MAX);
    let width = random_int(rng, SINGLE_WIDTH_MIN, SINGLE_WIDTH_MAX);
    Obstacle::on_ground(
        viewport.width,
        width as f32,
        height as f32,
        viewport.ground_line(tuning.ground_height),
        tuning.obstacle_color,
    )
}

/// Build the obstacles for one spawn of the given kind
pub fn spawn_group<R: Rng + ?Sized>(
    rng: &mut R,
    kind: GapKind,
    tuning: &Tuning,
    viewport: &Viewport,
) -> Vec<Obstacle> {
    match kind {
        GapKind::Tight => {
            let base = random_int(rng, CLUSTER_BASE_HEIGHT_MIN, CLUSTER_BASE_HEIGHT_MAX);
            tight_cluster(rng, tuning, viewport, base)
        }
        GapKind::Loose => vec![single_obstacle(rng, tuning, viewport)],
    }
}

/// Possibly spawn obstacles into `world`; returns how many were added
///
/// Uses the distance as it stood before this step's scroll.
pub fn maybe_spawn<R: Rng + ?Sized>(
    world: &mut World,
    tuning: &Tuning,
    viewport: &Viewport,
    rng: &mut R,
    time_scale: f32,
) -> usize {
    let chance = (tuning.obstacle_frequency * time_scale).min(1.0);
    if rng.random::<f32>() >= chance {
        return 0;
    }

    let capacity = tuning.max_obstacles.saturating_sub(world.obstacles.len());
    if capacity == 0 {
        return 0;
    }

    let distance = world.distance();
    let far_enough = world
        .last_spawn_distance
        .is_none_or(|last| distance - last >= tuning.min_obstacle_distance);
    if !far_enough {
        return 0;
    }

    let kind = choose_gap_kind(rng, tuning);
    let gap = kind.range(tuning);
    // Sampled for pacing; spawning is only gated by min_obstacle_distance
    let next_gap = random_int(rng, gap.min, gap.max);

    let mut group = spawn_group(rng, kind, tuning, viewport);
    group.truncate(capacity);
    let added = group.len();
    world.obstacles.extend(group);
    world.last_spawn_distance = Some(distance);

    log::debug!(
        "Spawned {} obstacle(s) ({:?}) at distance {:.0}, next gap {}",
        added,
        kind,
        distance,
        next_gap
    );
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 250.0)
    }

    fn always_spawn() -> Tuning {
        Tuning {
            obstacle_frequency: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_tight_cluster_shape() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for base in [20, 30, 40] {
            for _ in 0..200 {
                let cluster = tight_cluster(&mut rng, &tuning, &viewport(), base);
                assert!(cluster.len() == 2 || cluster.len() == 3);
                for ob in &cluster {
                    let h = ob.rect.size.y as i32;
                    let w = ob.rect.size.x as i32;
                    assert!((base - 10..=base + 10).contains(&h), "height {h} base {base}");
                    assert!((15..=30).contains(&w), "width {w}");
                    assert_eq!(ob.rect.bottom(), 200.0);
                }
            }
        }
    }

    #[test]
    fn test_tight_cluster_x_increases() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..100 {
            let cluster = spawn_group(&mut rng, GapKind::Tight, &tuning, &viewport());
            assert_eq!(cluster[0].rect.left(), 800.0);
            for pair in cluster.windows(2) {
                let step = pair[1].rect.left() - pair[0].rect.left();
                assert!((30.0..=50.0).contains(&step));
            }
        }
    }

    #[test]
    fn test_single_obstacle_shape() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..200 {
            let group = spawn_group(&mut rng, GapKind::Loose, &tuning, &viewport());
            assert_eq!(group.len(), 1);
            let r = group[0].rect;
            assert_eq!(r.left(), 800.0);
            assert!((20.0..=50.0).contains(&r.size.y));
            assert!((20.0..=40.0).contains(&r.size.x));
            assert_eq!(r.bottom(), 200.0);
        }
    }

    #[test]
    fn test_gap_kind_split() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(10);
        let tight = (0..10_000)
            .filter(|_| choose_gap_kind(&mut rng, &tuning) == GapKind::Tight)
            .count();
        let freq = tight as f64 / 10_000.0;
        assert!((freq - 0.3).abs() < 0.03);
    }

    #[test]
    fn test_zero_frequency_never_spawns() {
        let tuning = Tuning {
            obstacle_frequency: 0.0,
            ..Default::default()
        };
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1000 {
            assert_eq!(maybe_spawn(&mut world, &tuning, &viewport(), &mut rng, 1.0), 0);
        }
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_first_spawn_then_distance_gate() {
        let tuning = always_spawn();
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(12);

        let first = maybe_spawn(&mut world, &tuning, &viewport(), &mut rng, 1.0);
        assert!(first >= 1);
        assert_eq!(world.last_spawn_distance, Some(0.0));

        // Not far enough yet
        world.score.advance(299.0);
        assert_eq!(maybe_spawn(&mut world, &tuning, &viewport(), &mut rng, 1.0), 0);

        world.obstacles.clear();
        world.score.advance(1.0);
        assert!(maybe_spawn(&mut world, &tuning, &viewport(), &mut rng, 1.0) >= 1);
        assert_eq!(world.last_spawn_distance, Some(300.0));
    }

    #[test]
    fn test_cap_is_respected() {
        let tuning = Tuning {
            min_obstacle_distance: 0.0,
            ..always_spawn()
        };
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(13);
        for _ in 0..50 {
            maybe_spawn(&mut world, &tuning, &viewport(), &mut rng, 1.0);
            assert!(world.obstacles.len() <= tuning.max_obstacles);
        }
        assert_eq!(world.obstacles.len(), tuning.max_obstacles);
    }
}
