//! Render stage: culling and back-to-front draw dispatch
//!
//! The core owns no pixels. Each frame it calls the sink's draw function
//! exactly once per visible entity, back to front: pickups, roamers, player,
//! projectiles, effects on top. Positions and sizes arrive pre-transformed to
//! screen space; the sink treats the rest of its drawing context as opaque.

use glam::Vec2;

use crate::sim::{EffectKind, Faction, PickupKind, World};

/// What to draw for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    /// `flashing` is set during the invulnerability window
    Player { flashing: bool },
    /// `edible` marks roamers the player currently outsizes
    Roamer { edible: bool },
    Projectile { faction: Faction },
    Pickup(PickupKind),
    Effect(EffectKind),
}

/// One draw call's worth of entity state, already in screen space
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub screen_pos: Vec2,
    pub screen_size: f32,
    /// Facing angle in radians (movement direction)
    pub heading: f32,
    /// 0.0 transparent .. 1.0 opaque
    pub alpha: f32,
}

/// Opaque drawing target supplied by the host
pub trait RenderSink {
    fn draw(&mut self, sprite: &Sprite);
}

/// Emit the frame's draw calls for every entity whose bounding box meets the
/// expanded viewport.
pub fn draw_world(world: &World, sink: &mut dyn RenderSink) {
    let camera = &world.camera;
    let config = &world.config;

    for pickup in &world.pickups {
        if !camera.in_view(pickup.pos, pickup.size, config) {
            continue;
        }
        sink.draw(&Sprite {
            kind: SpriteKind::Pickup(pickup.kind),
            screen_pos: camera.world_to_screen(pickup.pos),
            screen_size: pickup.size * camera.scale,
            heading: 0.0,
            alpha: 1.0,
        });
    }

    for roamer in &world.roamers {
        if !camera.in_view(roamer.pos, roamer.size, config) {
            continue;
        }
        sink.draw(&Sprite {
            kind: SpriteKind::Roamer { edible: roamer.size < world.player.size },
            screen_pos: camera.world_to_screen(roamer.pos),
            screen_size: roamer.size * camera.scale,
            heading: roamer.heading,
            alpha: 1.0,
        });
    }

    let player = &world.player;
    if camera.in_view(player.pos, player.size, config) {
        // Blink at 12 Hz while invulnerable
        let flashing = player.invuln_ticks > 0 && (player.invuln_ticks / 5) % 2 == 1;
        sink.draw(&Sprite {
            kind: SpriteKind::Player { flashing },
            screen_pos: camera.world_to_screen(player.pos),
            screen_size: player.size * camera.scale,
            heading: player.vel.y.atan2(player.vel.x),
            alpha: if flashing { 0.5 } else { 1.0 },
        });
    }

    for projectile in &world.projectiles {
        if !camera.in_view(projectile.pos, projectile.size, config) {
            continue;
        }
        sink.draw(&Sprite {
            kind: SpriteKind::Projectile { faction: projectile.faction },
            screen_pos: camera.world_to_screen(projectile.pos),
            screen_size: projectile.size * camera.scale,
            heading: projectile.vel.y.atan2(projectile.vel.x),
            alpha: 1.0,
        });
    }

    for effect in &world.effects {
        // Effects have no meaningful extent; cull on a nominal size
        if !camera.in_view(effect.pos, 32.0, config) {
            continue;
        }
        sink.draw(&Sprite {
            kind: SpriteKind::Effect(effect.kind),
            screen_pos: camera.world_to_screen(effect.pos),
            screen_size: 32.0 * camera.scale,
            heading: 0.0,
            alpha: effect.alpha(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{World, WorldConfig};

    #[derive(Default)]
    struct RecordingSink {
        sprites: Vec<Sprite>,
    }

    impl RenderSink for RecordingSink {
        fn draw(&mut self, sprite: &Sprite) {
            self.sprites.push(*sprite);
        }
    }

    fn playing_world() -> World {
        let mut config = WorldConfig::default();
        config.hostile_fire = None;
        let mut world = World::new(config).expect("config");
        world.reset(33);
        world
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let mut world = playing_world();
        // Park everything far outside the viewport
        let far = world.bounds() - Vec2::splat(10.0);
        for roamer in &mut world.roamers {
            roamer.pos = far;
            roamer.size = 10.0;
        }
        world.pickups.clear();
        world.camera.offset = Vec2::ZERO;
        world.camera.scale = 1.0;
        world.player.pos = Vec2::new(400.0, 300.0);

        let mut sink = RecordingSink::default();
        draw_world(&world, &mut sink);

        // Only the player survives culling
        assert_eq!(sink.sprites.len(), 1);
        assert!(matches!(sink.sprites[0].kind, SpriteKind::Player { .. }));
    }

    #[test]
    fn test_draw_order_is_back_to_front() {
        let mut world = playing_world();
        world.camera.offset = Vec2::ZERO;
        world.camera.scale = 1.0;
        let center = Vec2::new(400.0, 300.0);
        world.player.pos = center;
        for roamer in &mut world.roamers {
            roamer.pos = center;
        }
        for pickup in &mut world.pickups {
            pickup.pos = center;
        }
        world.push_score_text(center, 12);

        let mut sink = RecordingSink::default();
        draw_world(&world, &mut sink);

        let order: Vec<u8> = sink
            .sprites
            .iter()
            .map(|s| match s.kind {
                SpriteKind::Pickup(_) => 0,
                SpriteKind::Roamer { .. } => 1,
                SpriteKind::Player { .. } => 2,
                SpriteKind::Projectile { .. } => 3,
                SpriteKind::Effect(_) => 4,
            })
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted, "layers emitted in z order");
        assert!(order.contains(&0) && order.contains(&2) && order.contains(&4));
    }

    #[test]
    fn test_edible_flag_tracks_player_size() {
        let mut world = playing_world();
        world.camera.offset = Vec2::ZERO;
        world.camera.scale = 1.0;
        world.player.pos = Vec2::new(400.0, 300.0);
        world.player.size = 100.0;
        world.pickups.clear();
        world.roamers.truncate(1);
        world.roamers[0].pos = Vec2::new(200.0, 200.0);
        world.roamers[0].size = 50.0;

        let mut sink = RecordingSink::default();
        draw_world(&world, &mut sink);
        let roamer = sink
            .sprites
            .iter()
            .find(|s| matches!(s.kind, SpriteKind::Roamer { .. }))
            .expect("roamer drawn");
        assert!(matches!(roamer.kind, SpriteKind::Roamer { edible: true }));
    }
}
