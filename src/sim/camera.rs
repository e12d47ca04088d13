//! Camera: world-to-screen transform with smoothed zoom and follow
//!
//! Scale shrinks as the player grows so the view widens with size. Offset and
//! scale each ease toward their targets with their own smoothing factors; the
//! decorative backdrop zoom eases far slower. Nothing jumps except on reset.

use glam::Vec2;

use super::config::WorldConfig;

#[derive(Debug, Clone)]
pub struct Camera {
    /// World coordinates of the viewport's top-left corner
    pub offset: Vec2,
    /// World-to-screen scale factor
    pub scale: f32,
    /// Scale applied to the decorative backdrop only
    pub backdrop_scale: f32,
}

impl Camera {
    /// Camera already settled on the player - used at reset, the one
    /// permitted discontinuity.
    pub fn snapped_to(player_pos: Vec2, player_size: f32, config: &WorldConfig) -> Self {
        let scale = Self::target_scale(player_size, config);
        let mut camera = Self {
            offset: Vec2::ZERO,
            scale,
            backdrop_scale: Self::target_backdrop_scale(player_size, config),
        };
        camera.offset = camera.clamp_offset(Self::centered_offset(player_pos, scale, config), config);
        camera
    }

    /// One tick of smoothing toward the player's frame
    pub fn follow(&mut self, player_pos: Vec2, player_size: f32, config: &WorldConfig) {
        let cam = &config.camera;

        let target_scale = Self::target_scale(player_size, config);
        self.scale += (target_scale - self.scale) * cam.scale_smoothing;

        let target_offset = Self::centered_offset(player_pos, self.scale, config);
        self.offset += (target_offset - self.offset) * cam.offset_smoothing;
        self.offset = self.clamp_offset(self.offset, config);

        let target_backdrop = Self::target_backdrop_scale(player_size, config);
        self.backdrop_scale += (target_backdrop - self.backdrop_scale) * cam.backdrop_smoothing;
    }

    /// Zoom target: 1.0 at baseline size, easing down to the floor as the
    /// player outgrows it
    pub fn target_scale(player_size: f32, config: &WorldConfig) -> f32 {
        let cam = &config.camera;
        (1.0 - (player_size - cam.size_baseline) / cam.zoom_falloff).clamp(cam.min_scale, 1.0)
    }

    fn target_backdrop_scale(player_size: f32, config: &WorldConfig) -> f32 {
        let cam = &config.camera;
        (cam.backdrop_base_scale / (player_size / cam.size_baseline)).max(cam.backdrop_min_scale)
    }

    /// Offset that puts `pos` at the viewport center for a given scale
    fn centered_offset(pos: Vec2, scale: f32, config: &WorldConfig) -> Vec2 {
        pos - config.viewport / (2.0 * scale)
    }

    /// Keep the viewport inside world bounds (a viewport wider than the world
    /// pins to the origin)
    fn clamp_offset(&self, offset: Vec2, config: &WorldConfig) -> Vec2 {
        let max = (config.world_size - config.viewport / self.scale).max(Vec2::ZERO);
        offset.clamp(Vec2::ZERO, max)
    }

    /// Size of the viewport in world units at the current zoom
    pub fn view_size(&self, config: &WorldConfig) -> Vec2 {
        config.viewport / self.scale
    }

    /// Screen pixel to world coordinates
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.scale + self.offset
    }

    /// World coordinates to screen pixel
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.offset) * self.scale
    }

    /// Render eligibility: bounding box intersects the viewport expanded by
    /// the cull margin
    pub fn in_view(&self, pos: Vec2, size: f32, config: &WorldConfig) -> bool {
        let margin = config.camera.cull_margin;
        let half = size / 2.0;
        let view = self.view_size(config);
        pos.x + half > self.offset.x - margin
            && pos.x - half < self.offset.x + view.x + margin
            && pos.y + half > self.offset.y - margin
            && pos.y - half < self.offset.y + view.y + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    #[test]
    fn test_target_scale_formula() {
        let config = config();
        // Baseline size: no zoom
        assert_relative_eq!(Camera::target_scale(20.0, &config), 1.0);
        // Grown to 120: max(0.3, 1 - 100/200) = 0.5
        assert_relative_eq!(Camera::target_scale(120.0, &config), 0.5);
        // Enormous: clamps to the floor
        assert_relative_eq!(Camera::target_scale(1000.0, &config), 0.3);
    }

    #[test]
    fn test_scale_smoothing_single_step() {
        let config = config();
        let mut camera = Camera::snapped_to(Vec2::splat(1000.0), 20.0, &config);
        camera.scale = 1.0;
        camera.follow(Vec2::splat(1000.0), 120.0, &config);
        // 1.0 + (0.5 - 1.0) * 0.05 = 0.975
        assert_relative_eq!(camera.scale, 0.975, epsilon = 1e-5);
    }

    #[test]
    fn test_offset_never_shows_past_world_edge() {
        let config = config();
        let mut camera = Camera::snapped_to(Vec2::splat(1000.0), 20.0, &config);
        // Chase a corner for a while
        for _ in 0..600 {
            camera.follow(Vec2::splat(10.0), 20.0, &config);
        }
        assert!(camera.offset.x >= 0.0 && camera.offset.y >= 0.0);
        for _ in 0..600 {
            camera.follow(config.world_size - 10.0, 20.0, &config);
        }
        let max = config.world_size - camera.view_size(&config);
        assert!(camera.offset.x <= max.x + 0.001);
        assert!(camera.offset.y <= max.y + 0.001);
    }

    #[test]
    fn test_screen_world_round_trip() {
        let config = config();
        let mut camera = Camera::snapped_to(Vec2::splat(700.0), 60.0, &config);
        camera.follow(Vec2::splat(710.0), 60.0, &config);
        let world = Vec2::new(612.5, 480.25);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert_relative_eq!(back.x, world.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-3);
    }

    #[test]
    fn test_culling_respects_margin() {
        let config = config();
        let camera = Camera {
            offset: Vec2::ZERO,
            scale: 1.0,
            backdrop_scale: 1.0,
        };
        // Viewport is 800x600, margin 50
        assert!(camera.in_view(Vec2::new(400.0, 300.0), 20.0, &config));
        assert!(camera.in_view(Vec2::new(845.0, 300.0), 20.0, &config));
        assert!(!camera.in_view(Vec2::new(900.0, 300.0), 20.0, &config));
        // Big entity pokes its box into view from further out
        assert!(camera.in_view(Vec2::new(940.0, 300.0), 200.0, &config));
    }

    #[test]
    fn test_backdrop_scale_eases_slowly() {
        let config = config();
        let mut camera = Camera::snapped_to(Vec2::splat(1000.0), 20.0, &config);
        let before = camera.backdrop_scale;
        camera.follow(Vec2::splat(1000.0), 200.0, &config);
        let after = camera.backdrop_scale;
        // Moves toward the new target, but only by the slow factor
        assert!(after < before);
        assert!((before - after) / before < 0.02);
    }
}
