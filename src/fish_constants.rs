//! Reference fish morphology shared by build.rs and runtime code.
//!
//! This module is included by both the build script and the creature config
//! so that presets validated at compile time obey the same rules as configs
//! loaded at runtime.

// Some constants are only used by build.rs for validation
#![allow(dead_code)]

/// Spine joints in the reference fish (index 0 = head, last = tail tip).
pub const SPINE_JOINTS: usize = 12;

/// Anatomy is built from fixed joint indices up to the tail tip at 11.
pub const MIN_SPINE_JOINTS: usize = 12;

/// Distance between neighbouring spine joints before scaling.
pub const SEGMENT_LENGTH: f32 = 64.0;

/// Half-widths of the body at each of the first ten joints, before scaling.
pub const REFERENCE_BODY_WIDTHS: [f32; 10] = [34.0, 41.0, 42.0, 41.0, 38.0, 32.0, 26.0, 19.0, 16.0, 9.0];

/// Uniform scale applied to every length, width and radius.
pub const FISH_SCALE: f32 = 0.3;

/// How far ahead of the head the steering target is projected.
pub const LOOK_AHEAD: f32 = 16.0;

/// Lateral reach of the dorsal fin per radian of body curvature.
pub const DORSAL_REACH: f32 = 16.0;

// Pectoral fins: anchored at joint 3, rotated from joint 2's heading
pub const PECTORAL_ANCHOR: usize = 3;
pub const PECTORAL_ROTATION_JOINT: usize = 2;
pub const PECTORAL_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
pub const PECTORAL_SIZE: [f32; 2] = [160.0, 64.0];

// Pelvic fins: anchored at joint 7, rotated from joint 6's heading
pub const PELVIC_ANCHOR: usize = 7;
pub const PELVIC_ROTATION_JOINT: usize = 6;
pub const PELVIC_ANGLE: f32 = std::f32::consts::FRAC_PI_2;
pub const PELVIC_SIZE: [f32; 2] = [96.0, 32.0];

pub const EYE_RADIUS: f32 = 12.0;
pub const EYE_DISTANCE: f32 = 24.0;
pub const EYE_LENGTH_OFFSET: f32 = -18.0;

pub const OUTLINE_THICKNESS: f32 = 2.0;

/// Fixed delay between frames (~60 FPS).
pub const FRAME_DELAY_MS: u32 = 16;

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

// RGB palette
pub const BACKGROUND_RGB: [u8; 3] = [0, 0, 0];
pub const BODY_RGB: [u8; 3] = [58, 124, 165];
pub const FIN_RGB: [u8; 3] = [129, 195, 215];
pub const OUTLINE_RGB: [u8; 3] = [255, 255, 255];
pub const EYE_RGB: [u8; 3] = [255, 255, 255];

/// Check a morphology against the fixed anatomical joint indices.
///
/// Returns one message per violated rule; an empty list means the morphology
/// can be built without any index leaving the spine or the width table.
pub fn morphology_errors(
    joint_count: usize,
    body_widths: &[f32],
    scale: f32,
    segment_length: f32,
    fin_joints: &[usize],
) -> Vec<String> {
    let mut errors = Vec::new();

    if joint_count < MIN_SPINE_JOINTS {
        errors.push(format!(
            "joint_count must be at least {}, got {}",
            MIN_SPINE_JOINTS, joint_count
        ));
    }
    if body_widths.len() < 2 || body_widths.len() > joint_count {
        errors.push(format!(
            "body_widths must have between 2 and {} entries, got {}",
            joint_count,
            body_widths.len()
        ));
    }
    if let Some((i, w)) = body_widths
        .iter()
        .enumerate()
        .find(|(_, w)| !(w.is_finite() && **w > 0.0))
    {
        errors.push(format!("body_widths[{}] must be positive, got {}", i, w));
    }
    if !(scale.is_finite() && scale > 0.0) {
        errors.push(format!("scale must be positive, got {}", scale));
    }
    if !(segment_length.is_finite() && segment_length > 0.0) {
        errors.push(format!(
            "segment_length must be positive, got {}",
            segment_length
        ));
    }
    // Each value is finite on its own but may still overflow once scaled
    if !(segment_length * scale).is_finite() {
        errors.push(format!(
            "segment_length * scale overflows ({} * {})",
            segment_length, scale
        ));
    }
    if let Some((i, w)) = body_widths
        .iter()
        .enumerate()
        .find(|(_, w)| !(**w * scale).is_finite())
    {
        errors.push(format!(
            "body_widths[{}] * scale overflows ({} * {})",
            i, w, scale
        ));
    }
    for &joint in fin_joints {
        if joint >= body_widths.len() {
            errors.push(format!(
                "fin joint {} is outside the {} body joints",
                joint,
                body_widths.len()
            ));
        }
    }

    errors
}
