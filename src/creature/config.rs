//! Creature morphology configuration
//!
//! `CreatureConfig::default()` is the reference fish from `fish_constants`.
//! Presets in `presets/*.json` are validated by build.rs and embedded here.

use crate::draw::Rgba;
use crate::fish_constants::*;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use std::f32::consts::PI;

const_assert!(REFERENCE_BODY_WIDTHS.len() <= SPINE_JOINTS);
const_assert!(SPINE_JOINTS >= MIN_SPINE_JOINTS);
const_assert!(PECTORAL_ANCHOR < REFERENCE_BODY_WIDTHS.len());
const_assert!(PELVIC_ANCHOR < REFERENCE_BODY_WIDTHS.len());

#[allow(dead_code)]
mod presets {
    include!(concat!(env!("OUT_DIR"), "/presets.rs"));
}

/// What happens to the head joint's stored heading each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadOrientation {
    /// Never rewritten; stays at whatever the owner last set (0 at creation)
    #[default]
    Retained,
    /// Copied from the neck segment after every resolve.
    ///
    /// Every joint heading points tailwards, so the head then shares the
    /// convention: curvature is measured relative to the neck and the snout
    /// and eyes are laid out along the neck direction, back into the body.
    /// Eye offsets and the snout are therefore mirrored against `Retained`
    /// for a fish swimming towards +X.
    FollowSpine,
}

/// A pair of mirrored rectangular fins. All fields are required in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinConfig {
    /// Joint the fin hangs from (must have a body width)
    pub anchor: usize,
    /// Joint whose heading orients the fin
    pub rotation_joint: usize,
    /// Angle from the anchor joint's heading to the fin centre (mirrored for the other side)
    pub angle_offset: f32,
    /// Unscaled width and height
    pub size: [f32; 2],
}

impl FinConfig {
    pub const PECTORAL: FinConfig = FinConfig {
        anchor: PECTORAL_ANCHOR,
        rotation_joint: PECTORAL_ROTATION_JOINT,
        angle_offset: PECTORAL_ANGLE,
        size: PECTORAL_SIZE,
    };

    pub const PELVIC: FinConfig = FinConfig {
        anchor: PELVIC_ANCHOR,
        rotation_joint: PELVIC_ROTATION_JOINT,
        angle_offset: PELVIC_ANGLE,
        size: PELVIC_SIZE,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeConfig {
    pub radius: f32,
    /// Reach from the head joint before `length_offset` is applied
    pub distance: f32,
    pub length_offset: f32,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            radius: EYE_RADIUS,
            distance: EYE_DISTANCE,
            length_offset: EYE_LENGTH_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba,
    pub body: Rgba,
    pub fin: Rgba,
    pub outline: Rgba,
    pub eye: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::from(BACKGROUND_RGB),
            body: Rgba::from(BODY_RGB),
            fin: Rgba::from(FIN_RGB),
            outline: Rgba::from(OUTLINE_RGB),
            eye: Rgba::from(EYE_RGB),
        }
    }
}

/// Immutable description of one creature's anatomy and timing.
///
/// All lengths are unscaled; `scale` is applied once when the creature is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub joint_count: usize,
    pub segment_length: f32,
    pub body_widths: Vec<f32>,
    pub scale: f32,
    pub look_ahead: f32,
    pub dorsal_reach: f32,
    pub pectoral_fin: FinConfig,
    pub pelvic_fin: FinConfig,
    pub eye: EyeConfig,
    pub outline_thickness: f32,
    pub palette: Palette,
    pub head_orientation: HeadOrientation,
    pub frame_delay_ms: u32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            joint_count: SPINE_JOINTS,
            segment_length: SEGMENT_LENGTH,
            body_widths: REFERENCE_BODY_WIDTHS.to_vec(),
            scale: FISH_SCALE,
            look_ahead: LOOK_AHEAD,
            dorsal_reach: DORSAL_REACH,
            pectoral_fin: FinConfig::PECTORAL,
            pelvic_fin: FinConfig::PELVIC,
            eye: EyeConfig::default(),
            outline_thickness: OUTLINE_THICKNESS,
            palette: Palette::default(),
            head_orientation: HeadOrientation::Retained,
            frame_delay_ms: FRAME_DELAY_MS,
        }
    }
}

impl CreatureConfig {
    /// Reference fish at a different overall size
    pub fn with_scale(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    /// Check that every anatomical index stays inside the spine and width table
    pub fn validate(&self) -> Result<(), String> {
        let fin_joints = [
            self.pectoral_fin.anchor,
            self.pectoral_fin.rotation_joint,
            self.pelvic_fin.anchor,
            self.pelvic_fin.rotation_joint,
        ];
        let mut errors = morphology_errors(
            self.joint_count,
            &self.body_widths,
            self.scale,
            self.segment_length,
            &fin_joints,
        );

        let positive = [
            ("look_ahead", self.look_ahead),
            ("eye.radius", self.eye.radius),
            ("pectoral_fin.size", self.pectoral_fin.size[0].min(self.pectoral_fin.size[1])),
            ("pelvic_fin.size", self.pelvic_fin.size[0].min(self.pelvic_fin.size[1])),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                errors.push(format!("{} must be positive, got {}", name, value));
            }
        }

        if !(self.outline_thickness.is_finite() && self.outline_thickness >= 0.0) {
            errors.push(format!(
                "outline_thickness must be zero or positive, got {}",
                self.outline_thickness
            ));
        }

        // Signed values only need to stay finite, before and after scaling.
        // The dorsal reach is multiplied by a curvature of up to pi per frame.
        let scale = self.scale;
        let finite = [
            ("dorsal_reach", self.dorsal_reach, self.dorsal_reach * scale * PI),
            ("eye.distance", self.eye.distance, self.eye.distance * scale),
            ("eye.length_offset", self.eye.length_offset, self.eye.length_offset * scale),
            (
                "eye reach",
                self.eye.distance + self.eye.length_offset,
                (self.eye.distance + self.eye.length_offset) * scale,
            ),
            ("eye.radius", self.eye.radius, self.eye.radius * scale),
            ("look_ahead", self.look_ahead, self.look_ahead * scale),
            ("pectoral_fin.angle_offset", self.pectoral_fin.angle_offset, 0.0),
            ("pelvic_fin.angle_offset", self.pelvic_fin.angle_offset, 0.0),
            (
                "pectoral_fin.size",
                0.0,
                self.pectoral_fin.size[0].max(self.pectoral_fin.size[1]) * scale,
            ),
            (
                "pelvic_fin.size",
                0.0,
                self.pelvic_fin.size[0].max(self.pelvic_fin.size[1]) * scale,
            ),
        ];
        for (name, value, scaled) in finite {
            if !value.is_finite() {
                errors.push(format!("{} must be finite, got {}", name, value));
            } else if !scaled.is_finite() {
                errors.push(format!("{} overflows once scaled, got {}", name, value));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    /// Parse a (possibly partial) JSON config on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: CreatureConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up an embedded preset by its kebab-case name
    pub fn preset(name: &str) -> Option<Self> {
        let (_, json) = presets::PRESETS.iter().find(|(n, _)| *n == name)?;
        match Self::from_json(json) {
            Ok(config) => Some(config),
            Err(e) => {
                log::error!("Embedded preset {} failed to load: {}", name, e);
                None
            }
        }
    }

    /// Names of all embedded presets
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        presets::PRESETS.iter().map(|(name, _)| *name)
    }
}
