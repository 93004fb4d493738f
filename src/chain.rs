use crate::math::{heading, Vec2};

/// Open chain of rigidly spaced joints solved "follow the leader" style.
///
/// Joint 0 is the lead (head). `angles[i]` is the heading of the segment
/// arriving at joint `i`, i.e. the direction from `joints[i - 1]` to `joints[i]`.
/// `angles[0]` is only ever written by the owner via [`Chain::set_head_angle`].
#[derive(Debug, Clone)]
pub struct Chain {
    joints: Vec<Vec2>,
    angles: Vec<f32>,
    segment_length: f32,
}

impl Chain {
    /// Create a chain with every joint collapsed at `origin` and every angle at zero
    pub fn new(origin: Vec2, joint_count: usize, segment_length: f32) -> Self {
        Self {
            joints: vec![origin; joint_count],
            angles: vec![0.0; joint_count],
            segment_length,
        }
    }

    /// Pin the head to `target` and drag the rest of the chain after it
    ///
    /// Single forward sweep: each joint is pulled to exactly `segment_length`
    /// from its already updated predecessor. A joint lying exactly on its
    /// predecessor keeps a zero-length segment for this step.
    pub fn resolve(&mut self, target: Vec2) {
        let Some(head) = self.joints.first_mut() else {
            return;
        };
        *head = target;

        for i in 1..self.joints.len() {
            let direction =
                (self.joints[i] - self.joints[i - 1]).normalize_or_zero() * self.segment_length;
            self.joints[i] = self.joints[i - 1] + direction;
            self.angles[i] = heading(direction);
        }
    }

    /// Override the stored heading of the head joint
    pub fn set_head_angle(&mut self, angle: f32) {
        if let Some(a) = self.angles.first_mut() {
            *a = angle;
        }
    }

    pub fn joints(&self) -> &[Vec2] {
        &self.joints
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Number of joints
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Position of the lead joint (origin for an empty chain)
    pub fn head(&self) -> Vec2 {
        self.joints.first().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn head_angle(&self) -> f32 {
        self.angles.first().copied().unwrap_or(0.0)
    }

    /// Joint at `index`. Panics if out of range, like slice indexing.
    #[inline]
    pub fn joint(&self, index: usize) -> Vec2 {
        self.joints[index]
    }

    /// Heading at `index`. Panics if out of range, like slice indexing.
    #[inline]
    pub fn angle(&self, index: usize) -> f32 {
        self.angles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-3;

    fn assert_segment_lengths(chain: &Chain) {
        for i in 1..chain.len() {
            let d = chain.joint(i).distance(chain.joint(i - 1));
            assert!(
                (d - chain.segment_length()).abs() < EPSILON,
                "segment {} length {} != {}",
                i,
                d,
                chain.segment_length()
            );
        }
    }

    #[test]
    fn test_new_chain_is_collapsed() {
        let chain = Chain::new(Vec2::new(400.0, 300.0), 12, 19.2);
        assert_eq!(chain.len(), 12);
        assert!(chain.joints().iter().all(|j| *j == Vec2::new(400.0, 300.0)));
        assert!(chain.angles().iter().all(|a| *a == 0.0));
    }

    #[test]
    fn test_straight_pull() {
        let mut chain = Chain::new(Vec2::ZERO, 3, 10.0);
        chain.resolve(Vec2::new(100.0, 0.0));

        assert_eq!(chain.joint(0), Vec2::new(100.0, 0.0));
        assert!(chain.joint(1).distance(Vec2::new(90.0, 0.0)) < EPSILON);
        assert!(chain.joint(2).distance(Vec2::new(80.0, 0.0)) < EPSILON);

        // Segments point from head towards tail (negative X)
        assert!((chain.angle(1).abs() - PI).abs() < EPSILON);
        assert!((chain.angle(2).abs() - PI).abs() < EPSILON);
    }

    #[test]
    fn test_second_pull_follows_previous_position() {
        let mut chain = Chain::new(Vec2::ZERO, 3, 10.0);
        chain.resolve(Vec2::new(100.0, 0.0));
        let old_neck = chain.joint(1);

        let target = Vec2::new(100.0, 100.0);
        chain.resolve(target);

        assert_eq!(chain.joint(0), target);
        assert!((chain.joint(1).distance(target) - 10.0).abs() < EPSILON);

        let expected_dir = (old_neck - target).normalize();
        let actual_dir = (chain.joint(1) - target).normalize();
        assert!(expected_dir.distance(actual_dir) < EPSILON);
        assert_segment_lengths(&chain);
    }

    #[test]
    fn test_head_is_pinned_exactly() {
        let mut chain = Chain::new(Vec2::ZERO, 12, 19.2);
        let target = Vec2::new(-123.456, 78.9);
        chain.resolve(target);
        assert_eq!(chain.head(), target);
    }

    #[test]
    fn test_degenerate_target_produces_no_nan() {
        let mut chain = Chain::new(Vec2::ZERO, 12, 19.2);
        chain.resolve(Vec2::ZERO);

        for (j, a) in chain.joints().iter().zip(chain.angles()) {
            assert!(j.is_finite(), "joint became {:?}", j);
            assert!(a.is_finite(), "angle became {}", a);
        }
        // Zero-length segments survive the step
        assert_eq!(chain.joint(1), Vec2::ZERO);
    }

    #[test]
    fn test_repeated_target_is_stable() {
        let mut chain = Chain::new(Vec2::ZERO, 12, 19.2);
        let target = Vec2::new(250.0, -40.0);
        chain.resolve(target);
        let settled = chain.joints().to_vec();

        for _ in 0..10 {
            chain.resolve(target);
        }
        for (a, b) in settled.iter().zip(chain.joints()) {
            assert!(a.distance(*b) < 1e-4, "{:?} drifted to {:?}", a, b);
        }
    }

    #[test]
    fn test_segment_lengths_hold_for_random_targets() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut chain = Chain::new(Vec2::new(400.0, 300.0), 12, 19.2);

        for _ in 0..500 {
            let target = Vec2::new(
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
            );
            chain.resolve(target);
            assert_eq!(chain.head(), target);
            assert_segment_lengths(&chain);
        }
    }

    #[test]
    fn test_sharp_reversal_keeps_lengths() {
        let mut chain = Chain::new(Vec2::ZERO, 12, 19.2);
        chain.resolve(Vec2::new(300.0, 0.0));
        // Drag the head straight back through the body
        chain.resolve(Vec2::new(-300.0, 0.0));
        assert_segment_lengths(&chain);
    }

    #[test]
    fn test_head_angle_is_owner_controlled() {
        let mut chain = Chain::new(Vec2::ZERO, 4, 5.0);
        chain.set_head_angle(1.25);
        chain.resolve(Vec2::new(0.0, 40.0));
        assert_eq!(chain.head_angle(), 1.25);
    }

    #[test]
    fn test_empty_chain() {
        let mut chain = Chain::new(Vec2::ZERO, 0, 5.0);
        chain.resolve(Vec2::ONE);
        assert!(chain.is_empty());
        assert_eq!(chain.head(), Vec2::ZERO);
    }
}
