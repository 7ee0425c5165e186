//! # Sound Effect Interface
//!
//! Opportunistic sound hooks fired by the world store, such as the rock
//! hit when a block is broken. Playback lives entirely behind this trait;
//! a failed or absent backend can never affect world state.

/// Plays named one-shot sound effects.
pub trait SoundPlayer {
    /// Plays the effect with the given name, best effort.
    fn play_effect(&mut self, name: &str);
}

/// Shared single-threaded sound player handle, mirroring the registrar
/// sharing pattern used by the rendering seam.
impl<S: SoundPlayer> SoundPlayer for std::rc::Rc<std::cell::RefCell<S>> {
    fn play_effect(&mut self, name: &str) {
        self.borrow_mut().play_effect(name)
    }
}

/// Sound player that discards every effect. Used headless and in tests.
#[derive(Debug, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play_effect(&mut self, _name: &str) {}
}
