pub mod anatomy;
pub mod config;

pub use anatomy::*;
pub use config::*;

use crate::chain::Chain;
use crate::math::Vec2;

/// A fish: a spine chain plus the body widths hung on it.
///
/// Geometry is never cached; see [`Creature::draw_commands`].
#[derive(Debug, Clone)]
pub struct Creature {
    spine: Chain,
    body_width: Vec<f32>,
    config: CreatureConfig,
}

impl Creature {
    /// Build a creature with its whole spine collapsed at `origin`.
    ///
    /// Panics unless the config passes [`CreatureConfig::validate`]; anatomy
    /// indexes the spine and width table at fixed joints. Configs from
    /// [`CreatureConfig::from_json`] and [`CreatureConfig::preset`] always pass.
    pub fn new(origin: Vec2, config: CreatureConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid creature config: {}", e);
        }

        let scale = config.scale;
        let spine = Chain::new(origin, config.joint_count, config.segment_length * scale);
        let body_width = config.body_widths.iter().map(|w| w * scale).collect();

        log::debug!(
            "Creature spawned at ({:.1}, {:.1}) with {} joints",
            origin.x,
            origin.y,
            config.joint_count
        );

        Self {
            spine,
            body_width,
            config,
        }
    }

    /// Point the head should be pulled to this frame.
    ///
    /// A fixed look-ahead distance from the head towards `target`; the head
    /// itself when `target` sits exactly on it.
    pub fn look_ahead_target(&self, target: Vec2) -> Vec2 {
        let head = self.spine.head();
        let direction = (target - head).normalize_or_zero();
        head + direction * (self.config.look_ahead * self.config.scale)
    }

    /// Steer towards `target` and drag the spine after the head
    pub fn resolve(&mut self, target: Vec2) {
        let look_ahead = self.look_ahead_target(target);
        self.spine.resolve(look_ahead);

        if self.config.head_orientation == HeadOrientation::FollowSpine && self.spine.len() > 1 {
            let neck = self.spine.angle(1);
            self.spine.set_head_angle(neck);
        }
    }

    pub fn spine(&self) -> &Chain {
        &self.spine
    }

    /// Mutable spine access, e.g. to set the head heading directly
    pub fn spine_mut(&mut self) -> &mut Chain {
        &mut self.spine
    }

    /// Scaled half-widths of the body joints
    pub fn body_width(&self) -> &[f32] {
        &self.body_width
    }

    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    pub fn scale(&self) -> f32 {
        self.config.scale
    }
}
