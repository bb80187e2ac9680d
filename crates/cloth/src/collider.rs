//! Static sphere collider.

use glam::Vec3;

/// A fixed sphere the cloth collides with.
#[derive(Clone, Copy, Debug)]
pub struct SphereCollider {
    /// Sphere center in world space.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether a point is on or inside the sphere.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length() <= self.radius
    }

    /// Resolve a contact for one point.
    ///
    /// Removes (and with restitution, reverses) the inward normal velocity
    /// component, damps the remainder by the friction coefficient, and
    /// projects the position onto the sphere surface. The friction term
    /// uses the normal speed sampled before restitution, matching the
    /// restitution-then-friction update order.
    ///
    /// Points outside the sphere are untouched. A point exactly at the
    /// center has no defined normal and is also left untouched.
    pub fn resolve(
        &self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        restitution: f32,
        friction: f32,
    ) {
        let offset = *position - self.center;
        if offset.length() > self.radius {
            return;
        }
        let Some(normal) = offset.try_normalize() else {
            return;
        };

        let v_n = velocity.dot(normal);
        *velocity -= (1.0 + restitution) * v_n.min(0.0) * normal;
        *velocity -= friction * (*velocity - v_n * normal);
        *position = self.center + self.radius * normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball() -> SphereCollider {
        SphereCollider::new(Vec3::ZERO, 0.3)
    }

    #[test]
    fn test_point_outside_is_untouched() {
        let ball = ball();
        let mut p = Vec3::new(0.0, 0.5, 0.0);
        let mut v = Vec3::new(0.0, -1.0, 0.0);
        ball.resolve(&mut p, &mut v, 0.0, 0.01);
        assert_eq!(p, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(v, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_penetrating_point_projects_onto_surface() {
        let ball = ball();
        let mut p = Vec3::new(0.0, 0.1, 0.0);
        let mut v = Vec3::ZERO;
        ball.resolve(&mut p, &mut v, 0.0, 0.0);
        assert!((p.length() - ball.radius).abs() < 1e-6, "p = {:?}", p);
    }

    #[test]
    fn test_zero_restitution_kills_inward_velocity() {
        let ball = ball();
        let mut p = Vec3::new(0.0, 0.29, 0.0);
        let mut v = Vec3::new(0.0, -2.0, 0.0);
        ball.resolve(&mut p, &mut v, 0.0, 0.0);
        let normal = Vec3::Y;
        assert!(v.dot(normal) >= -1e-6, "residual inward velocity: {:?}", v);
    }

    #[test]
    fn test_full_restitution_reflects_normal_approach() {
        let ball = ball();
        let mut p = Vec3::new(0.0, 0.29, 0.0);
        let mut v = Vec3::new(0.0, -2.0, 0.0);
        ball.resolve(&mut p, &mut v, 1.0, 0.0);
        assert!((v.y - 2.0).abs() < 1e-5, "expected elastic bounce, got {:?}", v);
        assert!(v.x.abs() < 1e-6 && v.z.abs() < 1e-6);
    }

    #[test]
    fn test_outward_velocity_is_preserved() {
        let ball = ball();
        let mut p = Vec3::new(0.0, 0.2, 0.0);
        let mut v = Vec3::new(0.0, 3.0, 0.0);
        ball.resolve(&mut p, &mut v, 1.0, 0.0);
        // min(v_n, 0) leaves separating contacts alone.
        assert!((v.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_friction_damps_tangential_velocity() {
        let ball = ball();
        let friction = 0.25;
        let mut p = Vec3::new(0.0, 0.29, 0.0);
        let mut v = Vec3::new(4.0, 0.0, 0.0);
        ball.resolve(&mut p, &mut v, 0.0, friction);
        assert!((v.x - 4.0 * (1.0 - friction)).abs() < 1e-5, "v = {:?}", v);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_point_at_center_is_a_noop() {
        let ball = ball();
        let mut p = Vec3::ZERO;
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        ball.resolve(&mut p, &mut v, 0.5, 0.5);
        assert_eq!(p, Vec3::ZERO);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }
}
