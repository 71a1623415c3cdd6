use bevy::{prelude::*, utils::HashMap};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationState {
    #[default] Stand,
    Walk,
    Jump,
}

#[derive(Clone, Debug)]
pub struct Animation {
    pub frames: Vec<usize>,
    pub looping: bool,
    pub ticks_per_frame: u32,
}

/// Frame clock advanced once per simulation tick by [`animator_sys`].
#[derive(Component, Debug)]
pub struct Animator {
    pub animations: HashMap<AnimationState, Animation>,
    pub current_animation: AnimationState,
    pub prev_animation: AnimationState,
    pub current_frame: usize,
    pub counter: u32,
}

impl Animator {
    pub fn new(animations: HashMap<AnimationState, Animation>) -> Animator {
        Animator {
            animations,
            current_animation: AnimationState::default(),
            prev_animation: AnimationState::default(),
            current_frame: 0,
            counter: 0,
        }
    }

    pub fn reset_loop(&mut self) {
        self.current_frame = 0;
        self.counter = 0;
    }

    /// Advances one tick and returns the atlas index to display.
    pub fn tick(&mut self) -> Option<usize> {
        let current_animation = self.current_animation;

        if current_animation != self.prev_animation {
            self.prev_animation = current_animation;
            self.reset_loop();
            return self.current_index();
        }

        let animation = self.animations.get(&current_animation)?;
        if animation.frames.is_empty() {
            return None;
        }

        self.counter += 1;
        if self.counter >= animation.ticks_per_frame {
            let new_frame = (self.current_frame + 1) % animation.frames.len();

            if animation.looping || new_frame > self.current_frame {
                self.current_frame = new_frame;
            } else {
                // If not looping and at the end, hold the last frame
                self.current_frame = animation.frames.len() - 1;
            }

            self.counter = 0;
        }

        self.current_index()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.animations
            .get(&self.current_animation)
            .and_then(|animation| animation.frames.get(self.current_frame))
            .copied()
    }
}

pub fn animator_sys (
    mut query: Query<(&mut Animator, &mut TextureAtlasSprite)>,
) {
    for (mut animator, mut sprite) in query.iter_mut() {
        if let Some(index) = animator.tick() {
            sprite.index = index;
        }
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationSet;

#[derive(Debug, Default)]
pub struct AnimationPlugin {}

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app
            .register_type::<AnimationState>()
            .add_systems(Update, animator_sys.in_set(AnimationSet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> Animator {
        let mut animations = HashMap::new();
        animations.insert(AnimationState::Stand, Animation { frames: vec![0, 1, 2], looping: true, ticks_per_frame: 2 });
        animations.insert(AnimationState::Jump, Animation { frames: vec![10, 11], looping: false, ticks_per_frame: 1 });

        Animator::new(animations)
    }

    #[test]
    fn advances_every_ticks_per_frame() {
        let mut animator = animator();

        assert_eq!(animator.tick(), Some(0));
        assert_eq!(animator.tick(), Some(1));
        assert_eq!(animator.tick(), Some(1));
        assert_eq!(animator.tick(), Some(2));
    }

    #[test]
    fn looping_animation_wraps() {
        let mut animator = animator();
        let frames: Vec<_> = (0..6).filter_map(|_| animator.tick()).collect();

        assert_eq!(frames, vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn one_shot_animation_holds_the_last_frame() {
        let mut animator = animator();
        animator.current_animation = AnimationState::Jump;

        assert_eq!(animator.tick(), Some(10));
        assert_eq!(animator.tick(), Some(11));
        assert_eq!(animator.tick(), Some(11));
        assert_eq!(animator.tick(), Some(11));
    }

    #[test]
    fn changing_animation_restarts_the_cycle() {
        let mut animator = animator();
        animator.tick();
        animator.tick();
        animator.tick();
        assert_eq!(animator.current_frame, 1);

        animator.current_animation = AnimationState::Jump;
        assert_eq!(animator.tick(), Some(10));
        assert_eq!(animator.counter, 0);
    }

    #[test]
    fn missing_animation_shows_nothing() {
        let mut animator = animator();
        animator.current_animation = AnimationState::Walk;
        animator.prev_animation = AnimationState::Walk;

        assert_eq!(animator.tick(), None);
    }

    #[test]
    fn system_updates_the_sprite_once_per_update() {
        let mut app = App::new();
        app.add_systems(Update, animator_sys);

        let entity = app.world.spawn((animator(), TextureAtlasSprite::new(7))).id();

        app.update();
        assert_eq!(app.world.get::<TextureAtlasSprite>(entity).map(|sprite| sprite.index), Some(0));

        app.update();
        assert_eq!(app.world.get::<TextureAtlasSprite>(entity).map(|sprite| sprite.index), Some(1));
    }
}
