//! # Headless Simulation Entry Point
//!
//! Runs the engine without a window: generates a full world, walks the
//! player around for a few simulated seconds, and logs visibility and
//! collision statistics. Useful for profiling world generation and the
//! deferred visibility queue.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use blockworld::game_state::audio::NullSoundPlayer;
use blockworld::game_state::rendering::NullRegistrar;
use blockworld::game_state::GameState;
use blockworld::TICKS_PER_SEC;
use log::info;

fn main() {
    blockworld::init_logging();

    let registrar = Rc::new(RefCell::new(NullRegistrar::new()));
    let mut game = GameState::new(Box::new(registrar.clone()), Box::new(NullSoundPlayer));

    let start = web_time::Instant::now();
    game.generate_terrain();
    info!("world generation took {:?}", start.elapsed());

    let dt = 1.0 / TICKS_PER_SEC as f32;

    // Walk forward for five simulated seconds, jumping once a second.
    game.handle_movement(1, 0, 0, 0);
    for tick in 0..5 * TICKS_PER_SEC {
        if tick % TICKS_PER_SEC == 0 {
            game.handle_jump();
        }
        game.update(dt);
    }
    game.handle_movement(-1, 0, 0, 0);

    // Fly up and keep moving until the deferred queue settles.
    game.handle_flight_toggle();
    game.handle_flight(1, 0);
    game.handle_movement(1, 0, 0, 0);
    for _ in 0..10 * TICKS_PER_SEC {
        game.update(dt);
    }

    info!(
        "simulated 15s: position {:?}, sector {:?}",
        game.player_position(),
        game.current_sector()
    );
    info!(
        "world blocks: {}, shown: {}, live meshes: {}, queued ops: {}",
        game.world.block_count(),
        game.world.shown_count(),
        game.world.mesh_count(),
        game.world.queued_len()
    );
    info!(
        "registrar totals: {} registered, {} destroyed",
        registrar.borrow().registered,
        registrar.borrow().destroyed
    );
}
