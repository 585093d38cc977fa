//! Fixed step simulation tick
//!
//! Order within a step matters: the player moves and resolves on X before Y,
//! enemies move after the player, and the camera follows last.

use super::collision::overlaps;
use super::entity::{Entity, EntityKind, Facing};
use super::state::{DeathCause, GameEvent, GameStatus, World};
use crate::consts::*;
use crate::tuning::Tuning;

/// Held controls for a single step (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the world by one step. Does nothing unless the game is playing.
pub fn tick(world: &mut World, input: &TickInput) {
    if world.status() != GameStatus::Playing {
        return;
    }
    world.events.clear();
    let tuning = world.tuning;

    // Horizontal movement, then push out of walls
    walk(&mut world.player, input, &tuning);
    resolve_x(&mut world.player, &world.entities);

    // Vertical movement, then land or bump heads
    fall_and_jump(world, input);
    resolve_y(world);

    if reached_flag(&world.player, &world.entities) {
        world.state.finish(GameStatus::Won);
        world.events.push(GameEvent::FlagReached);
        return;
    }

    step_enemies(world);
    if world.status() != GameStatus::Playing {
        return;
    }

    // World bounds: wall on the left, pit below
    if world.player.pos.x < 0.0 {
        world.player.pos.x = 0.0;
    }
    if world.player.pos.y > tuning.kill_plane_y {
        world.state.finish(GameStatus::GameOver);
        world.events.push(GameEvent::PlayerDied {
            cause: DeathCause::Pit,
        });
        return;
    }

    follow_camera(world);
}

/// Apply held direction keys and friction, then move on X
fn walk(player: &mut Entity, input: &TickInput, tuning: &Tuning) {
    if input.left {
        player.vel.x -= tuning.walk_accel();
        player.set_facing(Facing::Left);
    }
    if input.right {
        player.vel.x += tuning.walk_accel();
        player.set_facing(Facing::Right);
    }
    player.vel.x *= tuning.friction;
    player.pos.x += player.vel.x;
}

/// Snap the player out of any solid it walked into, by direction of travel.
/// Overlaps are handled in storage order; the last one applied wins.
pub(crate) fn resolve_x(player: &mut Entity, entities: &[Entity]) {
    for entity in entities {
        if entity.is_dead || !entity.kind.is_solid() || !overlaps(player, entity) {
            continue;
        }
        if player.vel.x > 0.0 {
            player.pos.x = entity.pos.x - player.width;
            player.vel.x = 0.0;
        } else if player.vel.x < 0.0 {
            player.pos.x = entity.pos.x + entity.width;
            player.vel.x = 0.0;
        }
    }
}

/// Gravity, the jump impulse, then move on Y
fn fall_and_jump(world: &mut World, input: &TickInput) {
    let tuning = world.tuning;
    let player = &mut world.player;

    player.vel.y += tuning.gravity;
    if input.jump && player.is_grounded {
        player.vel.y = tuning.jump_force;
        player.is_grounded = false;
        world.events.push(GameEvent::Jumped);
    }
    player.pos.y += player.vel.y;
    player.is_grounded = false;
}

/// Land on solids when falling; bump them when rising. Bumping a question
/// block pays out a coin and turns it into a plain block.
fn resolve_y(world: &mut World) {
    let World {
        player,
        entities,
        state,
        events,
        ..
    } = world;

    for entity in entities.iter_mut() {
        if entity.is_dead || !entity.kind.is_solid() || !overlaps(player, entity) {
            continue;
        }
        if player.vel.y > 0.0 {
            player.pos.y = entity.pos.y - player.height;
            player.vel.y = 0.0;
            player.is_grounded = true;
        } else if player.vel.y < 0.0 {
            player.pos.y = entity.pos.y + entity.height;
            player.vel.y = 0.0;
            if entity.kind == EntityKind::Question {
                entity.kind = EntityKind::Block;
                state.coins += 1;
                state.score += COIN_SCORE;
                events.push(GameEvent::CoinCollected { block: entity.id });
            }
        }
    }
}

fn reached_flag(player: &Entity, entities: &[Entity]) -> bool {
    entities
        .iter()
        .any(|e| e.kind == EntityKind::Flag && overlaps(player, e))
}

/// Move every live goomba, turn it around at walls, then settle contact with
/// the player: a shallow landing stomps it, anything else ends the run.
fn step_enemies(world: &mut World) {
    let World {
        player,
        entities,
        state,
        events,
        tuning,
        ..
    } = world;

    for i in 0..entities.len() {
        let goomba = &mut entities[i];
        let EntityKind::Goomba { squashed_ticks } = &mut goomba.kind else {
            continue;
        };
        if goomba.is_dead {
            *squashed_ticks = (*squashed_ticks + 1).min(SQUASH_TICKS);
            continue;
        }

        goomba.pos.x += goomba.vel.x;

        // One reversal per step, against the first obstacle found
        let body = goomba.bounds();
        let blocked = entities
            .iter()
            .enumerate()
            .any(|(j, other)| {
                j != i
                    && !other.is_dead
                    && other.kind.blocks_enemies()
                    && body.overlaps(&other.bounds())
            });
        if blocked {
            let goomba = &mut entities[i];
            goomba.vel.x = -goomba.vel.x;
            goomba.pos.x += goomba.vel.x;
        }

        let feet = entities[i].bounds().translated(0.0, 1.0);
        let grounded = entities.iter().any(|other| {
            !other.is_dead && other.kind.blocks_enemies() && feet.overlaps(&other.bounds())
        });

        let goomba = &mut entities[i];
        goomba.is_grounded = grounded;

        if !overlaps(player, goomba) {
            continue;
        }
        let overlap_y = player.pos.y + player.height - goomba.pos.y;
        if player.vel.y > 0.0 && overlap_y < tuning.stomp_threshold {
            goomba.is_dead = true;
            player.vel.y = tuning.stomp_bounce;
            state.score += STOMP_SCORE;
            events.push(GameEvent::EnemyStomped { enemy: goomba.id });
        } else {
            state.finish(GameStatus::GameOver);
            events.push(GameEvent::PlayerDied {
                cause: DeathCause::Enemy,
            });
            return;
        }
    }
}

/// Scroll right to keep the player at the threshold. Never scrolls back.
fn follow_camera(world: &mut World) {
    let threshold = world.tuning.scroll_threshold;
    if world.player.pos.x > world.camera.x + threshold {
        world.camera.x = world.player.pos.x - threshold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, EntityType};
    use crate::sim::level::LevelLayout;
    use glam::Vec2;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn world_1_1() -> World {
        World::start(&LevelLayout::world_1_1(), Tuning::default()).unwrap()
    }

    /// Small test room: flag far right, ground on row 5 (y = 160)
    fn room(rows: &[&str], spawns: &[u32], enemy_row: u32) -> World {
        let layout = LevelLayout {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            enemy_spawns: spawns.to_vec(),
            enemy_row,
            pipe_top_row: 0,
            player_spawn: Vec2::new(0.0, 0.0),
        };
        World::start(&layout, Tuning::default()).unwrap()
    }

    const OPEN_ROOM: [&str; 6] = [
        "                     F",
        "  Q                   ",
        "                      ",
        "                      ",
        "                      ",
        "GGGGGGGGGGGGGGGGGGGGGG",
    ];

    fn kind_of(world: &World, ty: EntityType) -> &Entity {
        world.entities.iter().find(|e| e.kind.tag() == ty).unwrap()
    }

    #[test]
    fn test_left_step_applies_accel_then_friction() {
        let mut world = world_1_1();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert!((world.player.vel.x - -0.68).abs() < EPS);
        assert!((world.player.pos.x - (100.0 - 0.68)).abs() < EPS);
        assert_eq!(world.player.facing(), Facing::Left);
    }

    #[test]
    fn test_friction_decays_without_input() {
        let mut world = world_1_1();
        world.player.vel.x = 2.0;
        tick(&mut world, &TickInput::default());
        assert!((world.player.vel.x - 1.7).abs() < EPS);
        assert_eq!(world.player.facing(), Facing::Right);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut world = world_1_1();
        world.player.pos = Vec2::new(100.0, 352.0 - 44.0);
        world.player.is_grounded = true;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert_eq!(world.player.vel.y, world.tuning.jump_force);
        assert!(!world.player.is_grounded);
        assert_eq!(world.events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_no_jump_in_air() {
        let mut world = world_1_1();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert!((world.player.vel.y - world.tuning.gravity).abs() < EPS);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_lands_on_ground() {
        let mut world = world_1_1();
        world.player.pos = Vec2::new(100.0, 352.0 - 44.0);
        tick(&mut world, &TickInput::default());
        assert!(world.player.is_grounded);
        assert_eq!(world.player.vel.y, 0.0);
        assert!((world.player.pos.y - 308.0).abs() < EPS);
    }

    #[test]
    fn test_walk_into_wall_stops_at_edge() {
        // Block at column 3, row 4 (x 96..128, y 128..160)
        let mut world = room(
            &[
                "                    F",
                "                     ",
                "                     ",
                "                     ",
                "   B                 ",
                "GGGGGGGGGGGGGGGGGGGGG",
            ],
            &[],
            0,
        );
        world.player.pos = Vec2::new(96.0 - 28.0 - 0.5, 160.0 - 44.0);
        world.player.vel.x = 3.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.vel.x, 0.0);
        assert!((world.player.pos.x - (96.0 - 28.0)).abs() < EPS);
    }

    #[test]
    fn test_question_block_pays_once() {
        let mut world = room(&OPEN_ROOM, &[], 0);
        // Just under the question block at (64, 32), rising
        world.player.pos = Vec2::new(66.0, 64.5);
        world.player.vel.y = -5.0;
        tick(&mut world, &TickInput::default());

        let id = kind_of(&world, EntityType::Block).id;
        assert_eq!(world.entity(id).unwrap().kind, EntityKind::Block);
        assert!(!world.entities.iter().any(|e| e.kind == EntityKind::Question));
        assert_eq!(world.state.coins, 1);
        assert_eq!(world.state.score, 100);
        assert_eq!(world.player.vel.y, 0.0);
        assert!((world.player.pos.y - 64.0).abs() < EPS);
        assert_eq!(world.events, vec![GameEvent::CoinCollected { block: id }]);

        // Strike the spent block again
        world.player.pos = Vec2::new(66.0, 64.5);
        world.player.vel.y = -5.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.state.coins, 1);
        assert_eq!(world.state.score, 100);
        assert_eq!(world.player.vel.y, 0.0);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_stomp_goomba() {
        // Goomba on row 4 at column 2: (64, 128)
        let mut world = room(&OPEN_ROOM, &[2], 4);
        world.player.pos = Vec2::new(64.0, 88.4);
        world.player.vel.y = 5.0;
        tick(&mut world, &TickInput::default());

        let goomba = kind_of(&world, EntityType::Goomba);
        assert!(goomba.is_dead);
        assert_eq!(world.player.vel.y, world.tuning.stomp_bounce);
        assert_eq!(world.state.score, 200);
        assert_eq!(world.status(), GameStatus::Playing);
        assert_eq!(
            world.events,
            vec![GameEvent::EnemyStomped { enemy: goomba.id }]
        );
    }

    #[test]
    fn test_squashed_goomba_stays_briefly() {
        let mut world = room(&OPEN_ROOM, &[2], 4);
        world.entities.last_mut().unwrap().is_dead = true;
        let start = world.entities.last().unwrap().pos;
        for _ in 0..SQUASH_TICKS {
            assert!(world.entities.last().unwrap().is_squash_visible());
            tick(&mut world, &TickInput::default());
        }
        let goomba = world.entities.last().unwrap();
        assert!(!goomba.is_squash_visible());
        // Dead goombas no longer move
        assert_eq!(goomba.pos, start);
    }

    #[test]
    fn test_side_contact_is_game_over() {
        let mut world = room(&OPEN_ROOM, &[4], 4);
        world.player.pos = Vec2::new(100.0, 160.0 - 44.0);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.status(), GameStatus::GameOver);
        assert_eq!(
            world.events,
            vec![GameEvent::PlayerDied {
                cause: DeathCause::Enemy
            }]
        );
    }

    /// Goomba at (64, 128) and a player falling at 5 px per step with no
    /// gravity, positioned so the step ends `overlap` px into the goomba
    fn falling_onto_goomba(overlap: f32) -> World {
        let mut world = room(&OPEN_ROOM, &[2], 4);
        world.tuning.gravity = 0.0;
        world.player.pos = Vec2::new(64.0, 128.0 + overlap - 44.0 - 5.0);
        world.player.vel.y = 5.0;
        tick(&mut world, &TickInput::default());
        world
    }

    #[test]
    fn test_shallow_fall_still_stomps() {
        let world = falling_onto_goomba(19.0);
        assert_eq!(world.status(), GameStatus::Playing);
        assert!(kind_of(&world, EntityType::Goomba).is_dead);
    }

    #[test]
    fn test_fall_at_stomp_threshold_is_game_over() {
        let world = falling_onto_goomba(20.0);
        assert_eq!(world.status(), GameStatus::GameOver);
        assert!(!kind_of(&world, EntityType::Goomba).is_dead);
        assert_eq!(world.state.score, 0);
        assert_eq!(
            world.events,
            vec![GameEvent::PlayerDied {
                cause: DeathCause::Enemy
            }]
        );
    }

    #[test]
    fn test_deep_fall_into_goomba_is_game_over() {
        let world = falling_onto_goomba(25.0);
        assert_eq!(world.status(), GameStatus::GameOver);
        assert!(!kind_of(&world, EntityType::Goomba).is_dead);
    }

    #[test]
    fn test_goomba_turns_around_once() {
        let mut world = room(
            &[
                "                    F",
                "                     ",
                "                     ",
                "                     ",
                "B                    ",
                "GGGGGGGGGGGGGGGGGGGGG",
            ],
            &[1],
            4,
        );
        world.player.pos = Vec2::new(400.0, 160.0 - 44.0);
        tick(&mut world, &TickInput::default());
        let goomba = kind_of(&world, EntityType::Goomba);
        assert_eq!(goomba.vel.x, world.tuning.enemy_speed);
        assert!((goomba.pos.x - 32.0).abs() < EPS);
        assert!(goomba.is_grounded);

        tick(&mut world, &TickInput::default());
        let goomba = kind_of(&world, EntityType::Goomba);
        assert_eq!(goomba.vel.x, world.tuning.enemy_speed);
        assert!((goomba.pos.x - 33.5).abs() < EPS);
    }

    #[test]
    fn test_goomba_walks_through_question_blocks() {
        let mut world = room(
            &[
                "                    F",
                "                     ",
                "                     ",
                "                     ",
                "Q                    ",
                "GGGGGGGGGGGGGGGGGGGGG",
            ],
            &[1],
            4,
        );
        world.player.pos = Vec2::new(400.0, 160.0 - 44.0);
        tick(&mut world, &TickInput::default());
        let goomba = kind_of(&world, EntityType::Goomba);
        assert_eq!(goomba.vel.x, -world.tuning.enemy_speed);
    }

    #[test]
    fn test_fall_into_pit() {
        let mut world = world_1_1();
        world.player.pos.y = CANVAS_HEIGHT + 20.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.status(), GameStatus::GameOver);
        assert_eq!(
            world.events,
            vec![GameEvent::PlayerDied {
                cause: DeathCause::Pit
            }]
        );
    }

    #[test]
    fn test_left_wall_clamp() {
        let mut world = world_1_1();
        world.player.pos.x = 0.5;
        world.player.vel.x = -5.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.pos.x, 0.0);
    }

    #[test]
    fn test_flag_wins_and_freezes() {
        let mut world = room(&OPEN_ROOM, &[], 0);
        let flag = kind_of(&world, EntityType::Flag).pos;
        world.player.pos = Vec2::new(flag.x, 0.0);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.status(), GameStatus::Won);
        assert_eq!(world.events, vec![GameEvent::FlagReached]);

        let before = world.player.pos;
        tick(&mut world, &TickInput {
            right: true,
            ..Default::default()
        });
        assert_eq!(world.player.pos, before);
        assert_eq!(world.status(), GameStatus::Won);
    }

    #[test]
    fn test_menu_world_does_not_tick() {
        let mut world = World::menu(&LevelLayout::world_1_1(), Tuning::default()).unwrap();
        let before = world.player.pos;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.pos, before);
    }

    #[test]
    fn test_camera_follows_past_threshold() {
        let mut world = world_1_1();
        world.player.pos = Vec2::new(580.0, 308.0);
        tick(&mut world, &TickInput::default());
        assert!((world.camera.x - (world.player.pos.x - world.tuning.scroll_threshold)).abs() < EPS);

        // Walking back does not scroll back
        let cam = world.camera.x;
        world.player.pos.x = 200.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.camera.x, cam);
    }

    #[test]
    fn test_camera_idle_left_of_threshold() {
        let mut world = world_1_1();
        tick(&mut world, &TickInput::default());
        assert_eq!(world.camera.x, 0.0);
    }

    #[test]
    fn test_ids_stay_put() {
        let mut world = world_1_1();
        let ids: Vec<EntityId> = world.entities.iter().map(|e| e.id).collect();
        for _ in 0..120 {
            tick(&mut world, &TickInput {
                right: true,
                ..Default::default()
            });
        }
        let after: Vec<EntityId> = world.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, after);
    }

    proptest! {
        #[test]
        fn prop_camera_never_scrolls_back(
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400)
        ) {
            let mut world = world_1_1();
            let mut last = world.camera.x;
            for (left, right, jump) in inputs {
                tick(&mut world, &TickInput { left, right, jump });
                prop_assert!(world.camera.x >= last);
                last = world.camera.x;
            }
        }

        #[test]
        fn prop_horizontal_resolution_separates(
            offset in 0.5f32..27.5,
            y in 80.0f32..120.0,
            speed in prop_oneof![0.1f32..10.0, -10.0f32..-0.1],
        ) {
            let block = Entity::tile(EntityId(0), EntityKind::Block, Vec2::new(100.0, 100.0));
            let mut player = Entity::player(EntityId(1), Vec2::ZERO);
            // Penetrate from the side we are moving from
            player.pos.x = if speed > 0.0 { 100.0 - 28.0 + offset } else { 132.0 - offset };
            player.pos.y = y;
            player.vel.x = speed;
            prop_assume!(overlaps(&player, &block));

            resolve_x(&mut player, std::slice::from_ref(&block));
            prop_assert!(!overlaps(&player, &block));
            prop_assert_eq!(player.vel.x, 0.0);
        }

        #[test]
        fn prop_coins_never_decrease(
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400)
        ) {
            let mut world = world_1_1();
            let mut coins = 0;
            for (left, right, jump) in inputs {
                tick(&mut world, &TickInput { left, right, jump });
                prop_assert!(world.state.coins >= coins);
                coins = world.state.coins;
            }
        }
    }
}
