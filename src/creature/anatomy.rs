//! Anatomy derived from the spine every frame
//!
//! Every polygon and circle is a pure function of the current joint positions
//! and headings; nothing here keeps state between frames.

use super::{Creature, FinConfig};
use crate::draw::DrawCommand;
use crate::math::{relative_angle_diff, vertex_at, Vec2};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

/// Joints the dorsal fin is stretched between, and the two it billows from
const DORSAL_FRONT: usize = 4;
const DORSAL_BACK: usize = 7;
const DORSAL_RAY_FRONT: usize = 5;
const DORSAL_RAY_BACK: usize = 6;

/// Joints whose heading (relative to the head) measures body curvature
const CURVE_MID1: usize = 6;
const CURVE_MID2: usize = 7;

/// The caudal fin spans the last joints of the spine
const CAUDAL_JOINTS: usize = 4;
const CAUDAL_FLARE: f32 = 1.5;
const CAUDAL_LOBE: f32 = 6.0;
const CAUDAL_LOBE_LIMIT: f32 = 13.0;

/// How sharply the body is bent, as signed wrapped angles from the head
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Curvature {
    pub head_to_mid1: f32,
    pub head_to_mid2: f32,
    pub head_to_tail: f32,
}

impl Curvature {
    /// Measure from a spine's headings (needs at least 8 joints)
    pub fn from_angles(angles: &[f32]) -> Self {
        let head = angles[0];
        let tail = angles[angles.len() - 1];
        let head_to_mid1 = relative_angle_diff(head, angles[CURVE_MID1]);
        let head_to_mid2 = relative_angle_diff(head, angles[CURVE_MID2]);

        Self {
            head_to_mid1,
            head_to_mid2,
            head_to_tail: head_to_mid1 + relative_angle_diff(angles[CURVE_MID1], tail),
        }
    }
}

impl Creature {
    pub fn curvature(&self) -> Curvature {
        Curvature::from_angles(self.spine.angles())
    }

    /// Joint `i` displaced sideways by its own body width
    fn body_vertex(&self, i: usize, angle_offset: f32) -> Vec2 {
        vertex_at(
            self.spine.joint(i),
            self.spine.angle(i),
            self.body_width[i],
            angle_offset,
            0.0,
        )
    }

    /// Closed body silhouette: left flank, tail cap, right flank, rounded snout
    pub fn body_outline(&self) -> Vec<Vec2> {
        let n = self.body_width.len();
        let mut points = Vec::with_capacity(2 * n + 4);

        points.extend((0..n).map(|i| self.body_vertex(i, FRAC_PI_2)));
        points.push(self.body_vertex(n - 1, PI));
        points.extend((0..n).rev().map(|i| self.body_vertex(i, -FRAC_PI_2)));

        for offset in [-FRAC_PI_6, 0.0, FRAC_PI_6] {
            points.push(self.body_vertex(0, offset));
        }
        points
    }

    /// Tail fin that flares with how far the tail is bent from the head
    pub fn caudal_fin(&self, curvature: &Curvature) -> Vec<Vec2> {
        let joints = self.spine.joints();
        let angles = self.spine.angles();
        let start = joints.len() - CAUDAL_JOINTS;
        let scale = self.scale();
        let bend = curvature.head_to_tail;

        let mut points = Vec::with_capacity(2 * CAUDAL_JOINTS);
        for i in start..joints.len() {
            let step = (i - start) as f32;
            let width = CAUDAL_FLARE * bend * step * step * scale;
            points.push(vertex_at(joints[i], angles[i], width, -FRAC_PI_2, 0.0));
        }

        let lobe = (bend * CAUDAL_LOBE).clamp(-CAUDAL_LOBE_LIMIT, CAUDAL_LOBE_LIMIT) * scale;
        for i in (start..joints.len()).rev() {
            points.push(vertex_at(joints[i], angles[i], lobe, FRAC_PI_2, 0.0));
        }
        points
    }

    /// Dorsal fin between joints 4 and 7, pushed sideways by the curvature
    pub fn dorsal_fin(&self, curvature: &Curvature) -> Vec<Vec2> {
        let j = self.spine.joints();
        let a = self.spine.angles();
        let reach = self.config.dorsal_reach * self.scale();

        vec![
            j[DORSAL_FRONT],
            j[DORSAL_BACK],
            vertex_at(
                j[DORSAL_RAY_BACK],
                a[DORSAL_RAY_BACK],
                curvature.head_to_mid2 * reach,
                FRAC_PI_2,
                0.0,
            ),
            vertex_at(
                j[DORSAL_RAY_FRONT],
                a[DORSAL_RAY_FRONT],
                curvature.head_to_mid1 * reach,
                FRAC_PI_2,
                0.0,
            ),
            j[DORSAL_FRONT],
        ]
    }

    /// One fin of a mirrored pair; `side` is +1 or -1
    fn side_fin(&self, fin: &FinConfig, side: f32) -> DrawCommand {
        DrawCommand::Rect {
            center: self.body_vertex(fin.anchor, side * fin.angle_offset),
            size: Vec2::from(fin.size) * self.scale(),
            rotation: self.spine.angle(fin.rotation_joint) - side * FRAC_PI_4,
            fill: self.config.palette.fin,
        }
    }

    /// Pectoral pair then pelvic pair
    pub fn side_fins(&self) -> [DrawCommand; 4] {
        let pectoral = &self.config.pectoral_fin;
        let pelvic = &self.config.pelvic_fin;
        [
            self.side_fin(pectoral, 1.0),
            self.side_fin(pectoral, -1.0),
            self.side_fin(pelvic, 1.0),
            self.side_fin(pelvic, -1.0),
        ]
    }

    /// Eye centres, left then right
    pub fn eyes(&self) -> [Vec2; 2] {
        let eye = &self.config.eye;
        let scale = self.scale();
        let head = self.spine.head();
        let angle = self.spine.head_angle();

        [FRAC_PI_2, -FRAC_PI_2].map(|side| {
            vertex_at(
                head,
                angle,
                eye.distance * scale,
                side,
                eye.length_offset * scale,
            )
        })
    }

    /// The whole frame, back to front
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let palette = &self.config.palette;
        let thickness = self.config.outline_thickness;
        let curvature = self.curvature();
        let polygon = |points: Vec<Vec2>, fill| DrawCommand::Polygon {
            points,
            fill,
            outline: palette.outline,
            thickness,
        };

        let mut commands = Vec::with_capacity(10);
        commands.push(DrawCommand::Clear {
            color: palette.background,
        });
        commands.extend(self.side_fins());
        commands.push(polygon(self.caudal_fin(&curvature), palette.body));
        commands.push(polygon(self.body_outline(), palette.body));
        commands.push(polygon(self.dorsal_fin(&curvature), palette.fin));

        let radius = self.config.eye.radius * self.scale();
        commands.extend(self.eyes().map(|center| DrawCommand::Circle {
            center,
            radius,
            fill: palette.eye,
        }));
        commands
    }
}
