use bevy::{log::debug, prelude::{Changed, DetectChangesMut, Entity, Input, KeyCode, Query, Res, Sprite, Transform, Vec2, With}};
use bevy_rapier2d::prelude::Collider;
use kc_common::components::{buildable::Buildable, player::Player, tool::Tool};
use kc_util::constants::BUILDABLE_MIN_THICKNESS;

use crate::{body::to_screen, input::{ControlInput, KeyBindings}, physics::{ColliderQueries, ShapeQueries}, settings::MovementSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildAction {
    Grow,
    Shrink,
}

/// Up wins when both vertical keys are held.
pub fn requested_build_action(input: &ControlInput) -> Option<BuildAction> {
    if !input.build {
        return None;
    }

    if input.up {
        Some(BuildAction::Grow)
    } else if input.down {
        Some(BuildAction::Shrink)
    } else {
        None
    }
}

/// Build action a tool performs for a character standing at `at`, if any.
pub fn tool_action(tool: Entity, queries: &impl ShapeQueries, at: Vec2, input: &ControlInput) -> Option<BuildAction> {
    if !queries.contains_point(tool, at) {
        return None;
    }

    requested_build_action(input)
}

pub fn apply_build_action(buildable: &mut Buildable, action: BuildAction) -> bool {
    match action {
        BuildAction::Grow => buildable.grow(),
        BuildAction::Shrink => buildable.shrink(),
    }
}

pub fn tool_controls(
    q_player: Query<(Entity, &Transform), With<Player>>,
    q_tools: Query<(Entity, &Tool)>,
    mut q_buildables: Query<&mut Buildable>,
    shapes: ColliderQueries,
    keyboard_input: Res<Input<KeyCode>>,
    bindings: Res<KeyBindings>,
    settings: Res<MovementSettings>,
) {
    let input = ControlInput::from_keyboard(&keyboard_input, &bindings);
    if requested_build_action(&input).is_none() {
        return;
    }

    for (player, transform) in q_player.iter() {
        let Some(queries) = shapes.for_character(player, settings.contact_tolerance) else {
            continue;
        };
        let at = to_screen(transform.translation.truncate());

        for (tool_entity, tool) in q_tools.iter() {
            let Some(structure) = tool.buildable else {
                continue;
            };
            let Some(action) = tool_action(tool_entity, &queries, at, &input) else {
                continue;
            };
            let Ok(mut buildable) = q_buildables.get_mut(structure) else {
                continue;
            };

            if apply_build_action(buildable.bypass_change_detection(), action) {
                buildable.set_changed();
                debug!("{:?} {:?} to height {}", action, structure, buildable.height());
            }
        }
    }
}

/// Box collider standing on the entity's origin, `width` wide and as tall as the structure.
pub fn structure_collider(buildable: &Buildable) -> Collider {
    let size = structure_size(buildable);

    Collider::compound(vec![(
        Vec2::new(0.0, size.y / 2.0),
        0.0,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
    )])
}

// A structure shrunk to nothing keeps a sliver so the shapes stay valid.
fn structure_size(buildable: &Buildable) -> Vec2 {
    Vec2::new(
        buildable.width.max(BUILDABLE_MIN_THICKNESS),
        buildable.height().max(BUILDABLE_MIN_THICKNESS),
    )
}

pub fn apply_buildable_extent(
    mut q_buildables: Query<(&Buildable, Option<&mut Collider>, Option<&mut Sprite>), Changed<Buildable>>,
) {
    for (buildable, collider, sprite) in q_buildables.iter_mut() {
        if let Some(mut collider) = collider {
            *collider = structure_collider(buildable);
        }

        if let Some(mut sprite) = sprite {
            sprite.custom_size = Some(structure_size(buildable));
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::prelude::{App, Update, IntoSystemConfigs};
    use bevy_rapier2d::parry::{math::Point, query::PointQuery};
    use rstest::rstest;

    use super::*;
    use crate::{input::Key, test_support::placed};

    // Away from the origin so the tool's pose has to come from its transform.
    const TOOL_AT: Vec2 = Vec2::new(-300.0, 100.0);

    #[rstest]
    #[case(&[Key::Build, Key::Up], Some(BuildAction::Grow))]
    #[case(&[Key::Build, Key::Down], Some(BuildAction::Shrink))]
    #[case(&[Key::Build, Key::Up, Key::Down], Some(BuildAction::Grow))]
    #[case(&[Key::Up], None)]
    #[case(&[Key::Build], None)]
    fn build_key_combinations(#[case] keys: &[Key], #[case] expected: Option<BuildAction>) {
        assert_eq!(requested_build_action(&ControlInput::holding(keys)), expected);
    }

    #[test]
    fn an_empty_structure_keeps_a_minimal_thickness() {
        let buildable = Buildable::new(40.0, 0.0, 200.0, 0.0, 10.0);

        assert_relative_eq!(structure_size(&buildable).y, BUILDABLE_MIN_THICKNESS);
    }

    struct Scene {
        app: App,
        structure: Entity,
    }

    impl Scene {
        /// `player_offset` is measured from the tool's centre.
        fn new(buildable: Buildable, bound: bool, player_offset: Vec2) -> Scene {
            let mut app = App::new();
            app
                .init_resource::<Input<KeyCode>>()
                .init_resource::<KeyBindings>()
                .init_resource::<MovementSettings>()
                .add_systems(Update, (tool_controls, apply_buildable_extent).chain());

            let structure = app.world.spawn((
                structure_collider(&buildable),
                Sprite::default(),
                buildable,
                placed(200.0, 0.0),
            )).id();

            let tool = if bound { Tool::bound_to(structure) } else { Tool::default() };
            app.world.spawn((
                tool,
                Collider::cuboid(30.0, 30.0),
                placed(TOOL_AT.x, TOOL_AT.y),
            ));

            app.world.spawn((
                Player::default(),
                Collider::cuboid(16.0, 32.0),
                placed(TOOL_AT.x + player_offset.x, TOOL_AT.y + player_offset.y),
            ));

            Scene { app, structure }
        }

        fn press(mut self, keys: &[KeyCode]) -> Scene {
            let mut keyboard_input = self.app.world.resource_mut::<Input<KeyCode>>();
            for key in keys {
                keyboard_input.press(*key);
            }
            self
        }

        fn height_after_update(&mut self) -> Option<f32> {
            self.app.update();
            self.app.world.get::<Buildable>(self.structure).map(Buildable::height)
        }
    }

    #[test]
    fn growing_at_the_top_leaves_the_height_alone() {
        let mut scene = Scene::new(Buildable::new(40.0, 0.0, 5.0, 5.0, 1.0), true, Vec2::ZERO)
            .press(&[KeyCode::E, KeyCode::Up]);

        assert_eq!(scene.height_after_update(), Some(5.0));
    }

    #[test]
    fn build_and_up_grows_the_bound_structure() {
        let mut scene = Scene::new(Buildable::new(40.0, 0.0, 100.0, 50.0, 10.0), true, Vec2::new(5.0, 5.0))
            .press(&[KeyCode::E, KeyCode::W]);

        assert_eq!(scene.height_after_update(), Some(60.0));
        assert_eq!(scene.height_after_update(), Some(70.0));
    }

    #[test]
    fn build_and_down_shrinks_the_bound_structure() {
        let mut scene = Scene::new(Buildable::new(40.0, 0.0, 100.0, 50.0, 10.0), true, Vec2::ZERO)
            .press(&[KeyCode::E, KeyCode::Down]);

        assert_eq!(scene.height_after_update(), Some(40.0));
    }

    #[test]
    fn standing_outside_the_tool_does_nothing() {
        let mut scene = Scene::new(Buildable::new(40.0, 0.0, 100.0, 50.0, 10.0), true, Vec2::new(120.0, 0.0))
            .press(&[KeyCode::E, KeyCode::Up]);

        assert_eq!(scene.height_after_update(), Some(50.0));
    }

    #[test]
    fn an_unbound_tool_is_inert() {
        let mut scene = Scene::new(Buildable::new(40.0, 0.0, 100.0, 50.0, 10.0), false, Vec2::ZERO)
            .press(&[KeyCode::E, KeyCode::Up]);

        assert_eq!(scene.height_after_update(), Some(50.0));
    }

    #[test]
    fn growing_reshapes_collider_and_sprite() {
        let mut scene = Scene::new(Buildable::new(40.0, 0.0, 100.0, 50.0, 10.0), true, Vec2::ZERO)
            .press(&[KeyCode::E, KeyCode::Up]);
        scene.height_after_update();

        let world = &scene.app.world;
        let sprite_size = world.get::<Sprite>(scene.structure).and_then(|sprite| sprite.custom_size);
        assert_eq!(sprite_size, Some(Vec2::new(40.0, 60.0)));

        let collider = world.get::<Collider>(scene.structure);
        assert!(collider.is_some_and(|collider| collider.raw.contains_local_point(&Point::new(0.0, 59.0))));
        assert!(collider.is_some_and(|collider| !collider.raw.contains_local_point(&Point::new(0.0, -1.0))));
    }
}
