//! Integration tests for player kinematics and the collision resolver:
//! motion intent accumulation, gravity and flight integration, penetration
//! clamping, and the game loop's tick ordering.

use std::cell::RefCell;
use std::rc::Rc;

use blockworld::game_state::audio::NullSoundPlayer;
use blockworld::game_state::player::PLAYER_HEIGHT;
use blockworld::game_state::rendering::NullRegistrar;
use blockworld::{
    collide, BlockKind, CollisionOutcome, GameState, Player, Position, WorldStore, WORLD_SIZE,
};
use cgmath::{InnerSpace, Point3};

const EPSILON: f32 = 1e-4;

fn test_world() -> WorldStore {
    WorldStore::new(
        Box::new(NullRegistrar::new()),
        Box::new(NullSoundPlayer),
    )
}

fn test_game() -> GameState {
    GameState::new(
        Box::new(NullRegistrar::new()),
        Box::new(NullSoundPlayer),
    )
}

/// Collision callback that accepts every proposed position unchanged.
fn no_collision(position: Point3<f32>, _height: i32) -> CollisionOutcome {
    CollisionOutcome {
        position,
        hit_vertical_face: false,
    }
}

#[test]
fn collide_clamps_horizontal_penetration() {
    let mut world = test_world();
    world.add_block(Position::new(1, 1, 0), BlockKind::Brick, false);

    let outcome = collide(&world, Point3::new(0.49, 1.0, 0.0), PLAYER_HEIGHT);
    assert!((outcome.position.x - 0.25).abs() < EPSILON);
    assert!((outcome.position.y - 1.0).abs() < EPSILON);
    assert!((outcome.position.z - 0.0).abs() < EPSILON);
    assert!(!outcome.hit_vertical_face);
}

#[test]
fn collide_ignores_overlap_within_the_pad() {
    let mut world = test_world();
    world.add_block(Position::new(1, 1, 0), BlockKind::Brick, false);

    let proposed = Point3::new(0.2, 1.0, 0.0);
    let outcome = collide(&world, proposed, PLAYER_HEIGHT);
    assert_eq!(outcome.position, proposed);
}

#[test]
fn collide_reports_a_floor_hit() {
    let mut world = test_world();
    world.add_block(Position::new(0, -1, 0), BlockKind::Grass, false);

    // Sunk 0.3 into the floor cell below.
    let outcome = collide(&world, Point3::new(0.0, -0.3, 0.0), PLAYER_HEIGHT);
    assert!(outcome.hit_vertical_face);
    assert!((outcome.position.y - (-0.25)).abs() < EPSILON);
}

#[test]
fn collide_passes_through_clouds_and_leaves() {
    let mut world = test_world();
    world.add_block(Position::new(1, 50, 0), BlockKind::LightCloud, false);
    world.add_block(Position::new(0, 49, 0), BlockKind::DarkCloud, false);
    world.add_block(Position::new(-1, 50, 0), BlockKind::TreeLeaves, false);

    let proposed = Point3::new(0.49, 50.0, 0.0);
    let outcome = collide(&world, proposed, PLAYER_HEIGHT);
    assert_eq!(outcome.position, proposed);
    assert!(!outcome.hit_vertical_face);
}

#[test]
fn collide_checks_the_whole_player_height() {
    let mut world = test_world();
    // Block at head level only; feet-level neighbor is empty.
    world.add_block(Position::new(1, 1, 0), BlockKind::Brick, false);

    // Player feet at y = 2: the height scan covers y = 2 and y = 1.
    let outcome = collide(&world, Point3::new(0.49, 2.0, 0.0), PLAYER_HEIGHT);
    assert!((outcome.position.x - 0.25).abs() < EPSILON);
}

#[test]
fn gravity_accelerates_fall_to_terminal_velocity() {
    let mut player = Player::new();
    player.update(0.1, no_collision);
    assert!(player.dy < 0.0);
    assert!(player.position.y < 0.0);

    for _ in 0..1000 {
        player.update(0.1, no_collision);
    }
    assert!((player.dy - (-50.0)).abs() < EPSILON, "terminal velocity");
}

#[test]
fn landing_zeroes_vertical_velocity() {
    let mut player = Player::new();
    player.update(0.1, |position, _height| CollisionOutcome {
        position,
        hit_vertical_face: true,
    });
    assert_eq!(player.dy, 0.0);
}

#[test]
fn jump_requires_being_grounded() {
    let mut player = Player::new();
    player.jump();
    let airborne_dy = player.dy;
    assert!(airborne_dy > 0.0);

    // A second jump mid-flight must not reset the velocity.
    player.update(0.01, no_collision);
    let falling_dy = player.dy;
    player.jump();
    assert_eq!(player.dy, falling_dy);
}

#[test]
fn flying_ignores_gravity() {
    let mut player = Player::new();
    player.toggle_flight();
    for _ in 0..100 {
        player.update(0.1, no_collision);
    }
    assert_eq!(player.dy, 0.0);
    assert_eq!(player.position.y, 0.0);
}

#[test]
fn ascend_and_descend_drive_vertical_motion_while_flying() {
    let mut player = Player::new();
    player.toggle_flight();
    player.set_ascend(true);
    player.update(0.1, no_collision);
    assert!(player.position.y > 0.0);

    player.set_ascend(false);
    player.set_descend(true);
    let high = player.position.y;
    player.update(0.1, no_collision);
    assert!(player.position.y < high);
}

#[test]
fn motion_vector_is_zero_without_intent() {
    let player = Player::new();
    assert_eq!(player.get_motion_vector(), cgmath::Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn opposing_intents_cancel() {
    let mut player = Player::new();
    player.move_forward();
    player.move_backward();
    assert_eq!(player.get_motion_vector(), cgmath::Vector3::new(0.0, 0.0, 0.0));
    player.stop_backward();
    assert!(player.get_motion_vector().magnitude() > 0.9);
}

#[test]
fn two_forward_sources_compose_additively() {
    let mut player = Player::new();
    player.move_forward();
    player.move_forward();
    player.stop_forward();
    // One source released, one still held: still moving.
    assert!(player.get_motion_vector().magnitude() > 0.9);
    player.stop_forward();
    assert_eq!(player.get_motion_vector(), cgmath::Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn walking_motion_stays_horizontal_regardless_of_pitch() {
    let mut player = Player::new();
    player.adjust_sight(0.0, 400.0); // look well above the horizon
    player.move_forward();
    let motion = player.get_motion_vector();
    assert_eq!(motion.y, 0.0);
}

#[test]
fn flying_forward_follows_the_pitch_of_the_view() {
    let mut player = Player::new();
    player.toggle_flight();
    player.adjust_sight(0.0, 200.0); // pitch up 30 degrees
    player.move_forward();
    let motion = player.get_motion_vector();
    assert!(motion.y > 0.4, "flying forward climbs with the view");
}

#[test]
fn sight_pitch_clamps_at_straight_up_and_down() {
    let mut player = Player::new();
    player.adjust_sight(0.0, 10_000.0);
    assert_eq!(player.rotation.1, 90.0);
    player.adjust_sight(0.0, -100_000.0);
    assert_eq!(player.rotation.1, -90.0);
}

#[test]
fn walking_speed_is_bounded() {
    let mut player = Player::new();
    assert_eq!(player.current_speed(), 5.0);
    for _ in 0..10 {
        player.speed_up();
    }
    assert_eq!(player.current_speed(), 20.0);
    for _ in 0..10 {
        player.speed_down();
    }
    assert_eq!(player.current_speed(), 5.0);
}

#[test]
fn inventory_selection_wraps() {
    let mut player = Player::new();
    let len = player.inventory().len();
    player.select_active_item(1);
    assert_eq!(player.selected_block(), BlockKind::Grass);
    player.select_active_item(len + 2);
    assert_eq!(player.selected_block(), BlockKind::Sand);
}

#[test]
fn boundary_clamp_fences_x_and_z_only() {
    let mut player = Player::new();
    player.position = Point3::new(WORLD_SIZE as f32 + 30.0, 500.0, -(WORLD_SIZE as f32) - 7.0);
    player.clamp_to_world_boundary();
    assert_eq!(player.position.x, WORLD_SIZE as f32);
    assert_eq!(player.position.z, -(WORLD_SIZE as f32));
    assert_eq!(player.position.y, 500.0);
}

#[test]
fn update_loop_lands_the_player_on_a_floor() {
    let mut game = test_game();
    // A small grass pad under the spawn point.
    for x in -2..=2 {
        for z in -2..=2 {
            game.world.add_block(Position::new(x, -2, z), BlockKind::Grass, false);
        }
    }
    game.player.position = Point3::new(0.0, 2.0, 0.0);
    for _ in 0..240 {
        game.update(1.0 / 60.0);
    }
    // Settled on the pad rather than falling forever.
    assert_eq!(game.player.dy, 0.0);
    assert!(game.player.position.y > -2.0);
    assert!(game.player.position.y < 0.0);
}

#[test]
fn update_clamps_oversized_time_deltas() {
    let mut game = test_game();
    game.player.position = Point3::new(0.0, 0.0, 0.0);
    game.update(10.0); // a 10 second hitch integrates as 0.2s
    let after_hitch = game.player.position.y;

    let mut reference = test_game();
    reference.player.position = Point3::new(0.0, 0.0, 0.0);
    reference.update(0.2);
    assert!((after_hitch - reference.player.position.y).abs() < EPSILON);
}

#[test]
fn primary_action_breaks_only_breakable_blocks() {
    let mut game = test_game();
    // Looking along -z from the origin at default rotation.
    let sight = game.player.get_sight_vector();
    let target = Position::new(
        (sight.x * 3.0).round() as i32,
        (sight.y * 3.0).round() as i32,
        (sight.z * 3.0).round() as i32,
    );
    game.world.add_block(target, BlockKind::Stone, true);
    game.handle_primary_action();
    assert!(game.world.contains(target), "stone is unbreakable");

    game.world.add_block(target, BlockKind::Brick, true);
    game.handle_primary_action();
    assert!(!game.world.contains(target), "brick breaks");
}

#[test]
fn secondary_action_places_the_selected_block() {
    let mut game = test_game();
    let sight = game.player.get_sight_vector();
    let target = Position::new(
        (sight.x * 4.0).round() as i32,
        (sight.y * 4.0).round() as i32,
        (sight.z * 4.0).round() as i32,
    );
    game.world.add_block(target, BlockKind::Grass, true);

    game.handle_change_active_block(0);
    game.handle_secondary_action();
    assert_eq!(game.world.block_count(), 2, "a brick was placed");

    let placed = game
        .world
        .iter_blocks()
        .find(|(_, kind)| *kind == BlockKind::Brick);
    assert!(placed.is_some());
}

#[test]
fn secondary_action_respects_can_build_on() {
    let mut game = test_game();
    let sight = game.player.get_sight_vector();
    let target = Position::new(
        (sight.x * 4.0).round() as i32,
        (sight.y * 4.0).round() as i32,
        (sight.z * 4.0).round() as i32,
    );
    game.world.add_block(target, BlockKind::LightCloud, true);

    game.handle_secondary_action();
    assert_eq!(game.world.block_count(), 1, "cannot build on a cloud");
}

#[test]
fn movement_intents_route_through_the_game_state() {
    let mut game = test_game();
    game.handle_movement(1, 0, 0, 0);
    assert!(game.player.get_motion_vector().magnitude() > 0.9);
    game.handle_movement(-1, 0, 0, 0);
    assert_eq!(
        game.player.get_motion_vector(),
        cgmath::Vector3::new(0.0, 0.0, 0.0)
    );
}

#[test]
fn first_update_fully_builds_the_initial_view() {
    let registrar = Rc::new(RefCell::new(NullRegistrar::new()));
    let mut game = GameState::new(Box::new(registrar.clone()), Box::new(NullSoundPlayer));
    for x in -4..=4 {
        for z in -4..=4 {
            game.world.add_block(Position::new(x, -2, z), BlockKind::Grass, false);
        }
    }
    assert_eq!(game.current_sector(), None);
    game.update(1.0 / 60.0);
    // The very first sector assignment drains the queue completely.
    assert_eq!(game.world.queued_len(), 0);
    assert!(game.current_sector().is_some());
    assert!(registrar.borrow().registered > 0);
}
