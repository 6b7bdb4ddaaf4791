use crate::transform::HomogeneousTransform;

/// One row of a standard DH table. `theta` is the link's resting angle; it is
/// replaced by the joint value when the chain is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhLink {
    pub d: f64,
    pub theta: f64,
    pub a: f64,
    pub alpha: f64,
}

impl DhLink {
    pub const fn new(d: f64, theta: f64, a: f64, alpha: f64) -> Self {
        Self { d, theta, a, alpha }
    }

    pub fn transform(&self, theta: f64) -> HomogeneousTransform {
        HomogeneousTransform::dh(self.d, theta, self.a, self.alpha)
    }
}

/// Serial chain of `N` revolute links, evaluated base to flange.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicChain<const N: usize> {
    links: [DhLink; N],
}

impl<const N: usize> KinematicChain<N> {
    pub const fn new(links: [DhLink; N]) -> Self {
        Self { links }
    }

    /// `T0(q0) * T1(q1) * ... * T(N-1)(q(N-1))` with joint values in radians.
    /// An empty chain is the identity.
    pub fn forward(&self, joints: &[f64; N]) -> HomogeneousTransform {
        self.links
            .iter()
            .zip(joints.iter())
            .fold(HomogeneousTransform::identity(), |pose, (link, &q)| {
                pose * link.transform(q)
            })
    }
}
