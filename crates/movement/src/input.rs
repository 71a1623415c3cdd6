use bevy::prelude::{Input, KeyCode, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Build,
    Reset,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
    pub build: Vec<KeyCode>,
    pub reset: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            left: vec![KeyCode::Left, KeyCode::A],
            right: vec![KeyCode::Right, KeyCode::D],
            up: vec![KeyCode::Up, KeyCode::W],
            down: vec![KeyCode::Down, KeyCode::S],
            jump: vec![KeyCode::Space],
            build: vec![KeyCode::E],
            reset: vec![KeyCode::R],
        }
    }
}

impl KeyBindings {
    fn codes(&self, key: Key) -> &[KeyCode] {
        match key {
            Key::Left => &self.left,
            Key::Right => &self.right,
            Key::Up => &self.up,
            Key::Down => &self.down,
            Key::Jump => &self.jump,
            Key::Build => &self.build,
            Key::Reset => &self.reset,
        }
    }
}

/// Snapshot of which named keys are held this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub build: bool,
    pub reset: bool,
}

impl ControlInput {
    pub fn from_keyboard(keyboard_input: &Input<KeyCode>, bindings: &KeyBindings) -> ControlInput {
        let held = |key| keyboard_input.any_pressed(bindings.codes(key).iter().copied());

        ControlInput {
            left: held(Key::Left),
            right: held(Key::Right),
            up: held(Key::Up),
            down: held(Key::Down),
            jump: held(Key::Jump),
            build: held(Key::Build),
            reset: held(Key::Reset),
        }
    }

    #[cfg(test)]
    pub fn holding(keys: &[Key]) -> ControlInput {
        let mut input = ControlInput::default();
        for key in keys {
            match key {
                Key::Left => input.left = true,
                Key::Right => input.right = true,
                Key::Up => input.up = true,
                Key::Down => input.down = true,
                Key::Jump => input.jump = true,
                Key::Build => input.build = true,
                Key::Reset => input.reset = true,
            }
        }
        input
    }

    /// Build key held while a buildable is in reach: vertical keys belong to the tool.
    pub fn build_combo(&self, can_build: bool) -> bool {
        self.build && can_build
    }
}
