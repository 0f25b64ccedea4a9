//! Variable timestep simulation step
//!
//! Motion is expressed per nominal 60 Hz step and scaled by the ratio of the
//! real frame delta to that step, so the game plays at the same speed on any
//! display refresh rate.

use rand::Rng;

use super::collision::aabb_overlap;
use super::spawn::maybe_spawn;
use super::state::{Viewport, World};
use crate::tuning::Tuning;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Player overlapped an obstacle
    pub collided: bool,
    /// New score, if it went up
    pub score_changed: Option<u32>,
    /// Obstacles spawned this step
    pub spawned: usize,
}

/// Ratio of `delta_ms` to the nominal physics step (negative deltas count as 0)
#[inline]
pub fn time_scale(delta_ms: f64, tuning: &Tuning) -> f32 {
    (delta_ms.max(0.0) / tuning.physics_step_ms) as f32
}

/// Advance the world by `delta_ms` of real time
pub fn step<R: Rng + ?Sized>(
    world: &mut World,
    tuning: &Tuning,
    viewport: &Viewport,
    rng: &mut R,
    delta_ms: f64,
) -> StepOutcome {
    let scale = time_scale(delta_ms, tuning);
    let scroll = tuning.scroll_speed * scale;

    // Spawn against the pre-step distance so new obstacles render this frame
    let spawned = maybe_spawn(world, tuning, viewport, rng, scale);

    let score_changed = world.score.advance(f64::from(scroll));

    let rest_y = viewport.rest_y(tuning.ground_height, world.player.size.y);
    world.player.integrate(tuning.gravity, scale, rest_y);

    let player = world.player.rect();
    let mut collided = false;
    for obstacle in &mut world.obstacles {
        obstacle.rect.pos.x -= scroll;
        if aabb_overlap(&player, &obstacle.rect) {
            collided = true;
        }
    }
    world.obstacles.retain(|o| !o.is_offscreen());

    StepOutcome {
        collided,
        score_changed,
        spawned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::consts::PHYSICS_STEP_MS;
    use crate::sim::collision::Rect;
    use crate::sim::state::Obstacle;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 250.0)
    }

    fn quiet() -> Tuning {
        Tuning {
            obstacle_frequency: 0.0,
            ..Default::default()
        }
    }

    fn obstacle(x: f32, width: f32) -> Obstacle {
        Obstacle {
            rect: Rect::new(x, 180.0, width, 20.0),
            color: Rgb::BLACK,
        }
    }

    #[test]
    fn test_time_scale() {
        let tuning = Tuning::default();
        assert_eq!(time_scale(PHYSICS_STEP_MS, &tuning), 1.0);
        assert_eq!(time_scale(-5.0, &tuning), 0.0);
        assert!((time_scale(PHYSICS_STEP_MS * 2.0, &tuning) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tuning = Tuning {
            gravity: 0.5,
            jump_force: -12.0,
            ..quiet()
        };
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(world.player.pos.y, 170.0);

        assert!(world.player.jump(tuning.jump_force));

        let mut last_y = world.player.pos.y;
        for _ in 0..10 {
            step(&mut world, &tuning, &viewport(), &mut rng, 16.67);
            assert!(world.player.pos.y < last_y, "y should rise while velocity < 0");
            last_y = world.player.pos.y;
        }
        assert!(world.player.velocity_y < 0.0);

        let mut landed = false;
        for _ in 0..100 {
            step(&mut world, &tuning, &viewport(), &mut rng, 16.67);
            if !world.player.airborne {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(world.player.pos.y, 170.0);
        assert_eq!(world.player.velocity_y, 0.0);
    }

    #[test]
    fn test_distance_scales_with_delta() {
        let tuning = quiet();
        let mut rng = Pcg32::seed_from_u64(2);

        let mut one = World::new(&tuning, &viewport());
        step(&mut one, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS * 2.0);

        let mut two = World::new(&tuning, &viewport());
        step(&mut two, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);
        step(&mut two, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);

        assert!((one.distance() - two.distance()).abs() < 1e-6);
        assert!((one.distance() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_obstacle_removal_boundary() {
        let tuning = quiet();
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(3);

        // Scroll is exactly 5 per nominal step
        world.obstacles.push(obstacle(-16.0, 20.0)); // ends at x + w == -1
        world.obstacles.push(obstacle(-15.0, 20.0)); // ends at x + w == 0
        step(&mut world, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);

        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].rect.right(), 0.0);
    }

    #[test]
    fn test_collision_detected() {
        let tuning = quiet();
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(4);

        // Player occupies x 50..80, y 170..200
        world.obstacles.push(Obstacle {
            rect: Rect::new(80.0, 170.0, 20.0, 30.0),
            color: Rgb::BLACK,
        });
        let outcome = step(&mut world, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);
        assert!(outcome.collided);
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let tuning = quiet();
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(5);

        world.obstacles.push(Obstacle {
            rect: Rect::new(100.0, 180.0, 20.0, 20.0),
            color: Rgb::BLACK,
        });
        world.player.jump(tuning.jump_force);
        for _ in 0..20 {
            let outcome = step(&mut world, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);
            assert!(!outcome.collided);
        }
    }

    #[test]
    fn test_score_reported_on_increase() {
        let tuning = quiet();
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(6);

        let first = step(&mut world, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);
        assert_eq!(first.score_changed, None); // distance 5
        let second = step(&mut world, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);
        assert_eq!(second.score_changed, Some(1)); // distance 10
    }

    #[test]
    fn test_spawned_obstacles_scroll_same_step() {
        let tuning = Tuning {
            obstacle_frequency: 1.0,
            ..Default::default()
        };
        let mut world = World::new(&tuning, &viewport());
        let mut rng = Pcg32::seed_from_u64(7);

        let outcome = step(&mut world, &tuning, &viewport(), &mut rng, PHYSICS_STEP_MS);
        assert!(outcome.spawned >= 1);
        assert_eq!(world.obstacles[0].rect.left(), 795.0);
        assert_eq!(world.last_spawn_distance, Some(0.0));
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(
            seed in any::<u64>(),
            frames in proptest::collection::vec((0.0f64..250.0, any::<bool>()), 1..200),
        ) {
            let tuning = quiet();
            let vp = viewport();
            let rest_y = vp.rest_y(tuning.ground_height, tuning.player_height);
            let mut world = World::new(&tuning, &vp);
            let mut rng = Pcg32::seed_from_u64(seed);

            for (delta, jump) in frames {
                if jump {
                    world.player.jump(tuning.jump_force);
                }
                step(&mut world, &tuning, &vp, &mut rng, delta);
                prop_assert!(world.player.pos.y >= 0.0);
                prop_assert!(world.player.pos.y <= rest_y);
            }
        }
    }
}
