//! Build script for fish preset validation
//!
//! This script runs at compile time, validates every morphology preset in
//! `presets/` against the fixed anatomical joint indices, and embeds the
//! validated presets into the crate as string constants.

// Include the shared fish constants
#[path = "src/fish_constants.rs"]
mod fish_constants;

use fish_constants::*;
use glam::Vec2;
use heck::{ToKebabCase, ToShoutySnakeCase};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Fin placement from JSON (only the joint indices matter here)
#[derive(Debug, Deserialize)]
struct FinPreset {
    anchor: usize,
    rotation_joint: usize,
}

/// Fish morphology from JSON. Missing fields fall back to the reference fish.
#[derive(Debug, Deserialize)]
struct Preset {
    joint_count: Option<usize>,
    segment_length: Option<f32>,
    body_widths: Option<Vec<f32>>,
    scale: Option<f32>,
    pectoral_fin: Option<FinPreset>,
    pelvic_fin: Option<FinPreset>,
}

/// Validate a single preset file, returning its rest-pose length on success
fn validate_preset_file(path: &Path) -> Result<f32, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let preset: Preset = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let joint_count = preset.joint_count.unwrap_or(SPINE_JOINTS);
    let segment_length = preset.segment_length.unwrap_or(SEGMENT_LENGTH);
    let body_widths = preset
        .body_widths
        .unwrap_or_else(|| REFERENCE_BODY_WIDTHS.to_vec());
    let scale = preset.scale.unwrap_or(FISH_SCALE);

    let (pectoral_anchor, pectoral_rotation) = preset
        .pectoral_fin
        .map_or((PECTORAL_ANCHOR, PECTORAL_ROTATION_JOINT), |f| {
            (f.anchor, f.rotation_joint)
        });
    let (pelvic_anchor, pelvic_rotation) = preset
        .pelvic_fin
        .map_or((PELVIC_ANCHOR, PELVIC_ROTATION_JOINT), |f| {
            (f.anchor, f.rotation_joint)
        });
    let fin_joints = [
        pectoral_anchor,
        pectoral_rotation,
        pelvic_anchor,
        pelvic_rotation,
    ];

    let errors = morphology_errors(joint_count, &body_widths, scale, segment_length, &fin_joints);
    if !errors.is_empty() {
        return Err(format!(
            "Preset {} is invalid:\n  {}",
            path.display(),
            errors.join("\n  ")
        ));
    }

    // Straight rest pose along -X: snout tip to tail tip
    let head = Vec2::ZERO;
    let tail = Vec2::new(-((joint_count - 1) as f32) * segment_length * scale, 0.0);
    Ok(head.distance(tail) + body_widths[0] * scale)
}

fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let preset_dir = manifest_dir.join("presets");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set by cargo"));

    // Rerun if shared constants change
    println!("cargo:rerun-if-changed=src/fish_constants.rs");
    println!("cargo:rerun-if-changed=presets");

    let mut files: Vec<PathBuf> = Vec::new();
    if let Ok(entries) = fs::read_dir(&preset_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                // Tell cargo to rerun if this file changes
                println!("cargo:rerun-if-changed={}", path.display());
                files.push(path);
            }
        }
    } else {
        println!("cargo:warning=Preset directory not found, no presets embedded");
    }
    files.sort();

    let mut has_errors = false;
    let mut consts = String::new();
    let mut table = String::from("pub const PRESETS: &[(&str, &str)] = &[\n");

    for path in &files {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        match validate_preset_file(path) {
            Ok(rest_length) => {
                println!(
                    "cargo:warning=✓ preset {} validated (rest length {:.1})",
                    stem, rest_length
                );
                let const_name = stem.to_shouty_snake_case();
                consts.push_str(&format!(
                    "pub const {}: &str = include_str!({:?});\n",
                    const_name,
                    path.display().to_string()
                ));
                table.push_str(&format!(
                    "    ({:?}, {}),\n",
                    stem.to_kebab_case(),
                    const_name
                ));
            }
            Err(e) => {
                println!("cargo:warning=VALIDATION ERROR: {}", e);
                has_errors = true;
            }
        }
    }
    table.push_str("];\n");

    if has_errors {
        panic!("Preset validation failed! Fix the morphology in the preset files.");
    }

    let generated = format!("{}\n{}", consts, table);
    fs::write(out_dir.join("presets.rs"), generated).expect("Failed to write presets.rs");
}
