//! Drawer slide animation: an exponential approach toward one of two
//! fixed offsets, stepped once per frame by the frame loop.

/// Drawer group Z offset when closed.
pub const CLOSED_OFFSET: f32 = 0.2;
/// Drawer group Z offset when fully pulled out.
pub const OPEN_OFFSET: f32 = 1.0;
/// Within this distance the offset snaps to the target.
pub const SETTLE_EPSILON: f32 = 0.01;
/// Fraction of the remaining distance covered per step.
pub const APPROACH_GAIN: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerMotion {
    Idle,
    Animating,
}

#[derive(Debug, Clone, Copy)]
pub struct DrawerAnimation {
    current: f32,
    target: f32,
}

impl DrawerAnimation {
    pub fn new() -> Self {
        Self {
            current: CLOSED_OFFSET,
            target: CLOSED_OFFSET,
        }
    }

    pub fn offset(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn motion(&self) -> DrawerMotion {
        if (self.target - self.current).abs() <= SETTLE_EPSILON {
            DrawerMotion::Idle
        } else {
            DrawerMotion::Animating
        }
    }

    /// Point the animation at a new offset. Retargeting mid-flight keeps
    /// the current offset and simply changes where it converges.
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    /// One exponential-approach step. Settled drawers snap to the target
    /// and stay there, so stepping at a fixed point is a no-op.
    pub fn step(&mut self) {
        if (self.target - self.current).abs() <= SETTLE_EPSILON {
            self.current = self.target;
            return;
        }
        self.current += (self.target - self.current) * APPROACH_GAIN;
        if (self.target - self.current).abs() <= SETTLE_EPSILON {
            self.current = self.target;
        }
    }
}

impl Default for DrawerAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// All drawer animations, stepped together once per frame.
pub struct DrawerAnimator {
    drawers: Vec<DrawerAnimation>,
}

impl DrawerAnimator {
    pub fn new(count: usize) -> Self {
        Self {
            drawers: vec![DrawerAnimation::new(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.drawers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawers.is_empty()
    }

    /// Unknown slots are ignored.
    pub fn retarget(&mut self, slot: usize, target: f32) {
        if let Some(drawer) = self.drawers.get_mut(slot) {
            drawer.retarget(target);
        }
    }

    pub fn step_all(&mut self) {
        for drawer in &mut self.drawers {
            drawer.step();
        }
    }

    pub fn offset(&self, slot: usize) -> Option<f32> {
        self.drawers.get(slot).map(|d| d.offset())
    }

    pub fn get(&self, slot: usize) -> Option<&DrawerAnimation> {
        self.drawers.get(slot)
    }

    pub fn any_animating(&self) -> bool {
        self.drawers.iter().any(|d| d.motion() == DrawerMotion::Animating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_and_snaps() {
        let mut anim = DrawerAnimation::new();
        anim.retarget(OPEN_OFFSET);
        assert_eq!(anim.motion(), DrawerMotion::Animating);

        let mut steps = 0;
        while anim.motion() == DrawerMotion::Animating {
            anim.step();
            steps += 1;
            assert!(steps < 100, "must converge in a bounded number of steps");
        }
        assert_eq!(anim.offset(), OPEN_OFFSET, "snaps exactly to the target");
        // 0.8 units shrinking by 10% per step crosses 0.01 after ~42 steps
        assert!(steps > 30 && steps < 60, "unexpected step count {steps}");
    }

    #[test]
    fn test_fixed_point_is_idempotent() {
        let mut anim = DrawerAnimation::new();
        anim.retarget(OPEN_OFFSET);
        for _ in 0..200 {
            anim.step();
        }
        assert_eq!(anim.offset(), OPEN_OFFSET);
        anim.step();
        assert_eq!(anim.offset(), OPEN_OFFSET, "stays at the target until retargeted");
        assert_eq!(anim.motion(), DrawerMotion::Idle);
    }

    #[test]
    fn test_step_count_is_deterministic() {
        let count = |mut anim: DrawerAnimation| {
            anim.retarget(OPEN_OFFSET);
            let mut n = 0;
            while anim.motion() == DrawerMotion::Animating {
                anim.step();
                n += 1;
            }
            n
        };
        assert_eq!(count(DrawerAnimation::new()), count(DrawerAnimation::new()));
    }

    #[test]
    fn test_retarget_mid_flight_keeps_current_offset() {
        let mut anim = DrawerAnimation::new();
        anim.retarget(OPEN_OFFSET);
        for _ in 0..5 {
            anim.step();
        }
        let mid = anim.offset();
        assert!(mid > CLOSED_OFFSET && mid < OPEN_OFFSET);

        anim.retarget(CLOSED_OFFSET);
        assert_eq!(anim.offset(), mid, "retarget must not reset the offset");
        for _ in 0..100 {
            anim.step();
        }
        assert_eq!(anim.offset(), CLOSED_OFFSET);
    }

    #[test]
    fn test_animator_ignores_unknown_slot() {
        let mut animator = DrawerAnimator::new(2);
        animator.retarget(7, OPEN_OFFSET);
        animator.step_all();
        assert_eq!(animator.offset(0), Some(CLOSED_OFFSET));
        assert_eq!(animator.offset(1), Some(CLOSED_OFFSET));
        assert_eq!(animator.offset(7), None);
    }

    #[test]
    fn test_any_animating() {
        let mut animator = DrawerAnimator::new(3);
        assert!(!animator.any_animating());
        animator.retarget(1, OPEN_OFFSET);
        assert!(animator.any_animating());
        for _ in 0..100 {
            animator.step_all();
        }
        assert!(!animator.any_animating());
    }
}
