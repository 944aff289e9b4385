//! The M1 moment closure: Eddington factor, radiation pressure, hyperbolic
//! fluxes, and the interface Riemann solver for the radiation subsystem
//! `(E, F1, F2, F3)` along the x axis.

use super::conserved::Conserved;

/// Number of radiation variables evolved by the transport stage.
pub const NUM_RAD_FIELDS: usize = 4;

/// Levermore's Eddington factor `chi(f)` for the flux factor
/// `f = |F| / (c_hat E)`; `chi(0) = 1/3` (diffusion) and `chi(1) = 1`
/// (free streaming).
pub fn eddington_factor(f: f64) -> f64 {
    let f = f.max(0.0).min(1.0);
    (3.0 + 4.0 * f * f) / (5.0 + 2.0 * (4.0 - 3.0 * f * f).sqrt())
}

pub fn minmod(a: f64, b: f64) -> f64 {
    if a * b <= 0.0 {
        0.0
    } else if a.abs() < b.abs() {
        a
    } else {
        b
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]

/**
 * Radiation state in terms of energy density and reduced flux
 * `f = F / (c_hat E)`. Any state built here satisfies `|f| <= 1`, which is
 * the causality bound `|F| <= c_hat E`.
 */
pub struct RadPrimitive {
    energy: f64,
    reduced_flux: [f64; 3],
}

// ============================================================================
impl RadPrimitive {
    pub fn new(energy: f64, reduced_flux: [f64; 3]) -> Self {
        let energy = energy.max(0.0);
        let norm = norm3(reduced_flux);
        let reduced_flux = if norm > 1.0 {
            reduced_flux.map(|x| x / norm)
        } else {
            reduced_flux
        };
        Self { energy, reduced_flux }
    }

    pub fn from_conserved(u: &Conserved, c_hat: f64) -> Self {
        let e = u.rad_energy();
        if e > 0.0 {
            Self::new(e, u.rad_flux().map(|x| x / (c_hat * e)))
        } else {
            Self::new(0.0, [0.0; 3])
        }
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn reduced_flux(&self) -> [f64; 3] {
        self.reduced_flux
    }

    pub fn flux_factor(&self) -> f64 {
        norm3(self.reduced_flux)
    }

    pub fn eddington_factor(&self) -> f64 {
        eddington_factor(self.flux_factor())
    }

    pub fn flux(&self, c_hat: f64) -> [f64; 3] {
        self.reduced_flux.map(|f| c_hat * self.energy * f)
    }

    /// Return the x row of the radiation pressure tensor,
    /// `P = E [(1 - chi)/2 I + (3 chi - 1)/2 n n]`.
    pub fn pressure_x(&self) -> [f64; 3] {
        let f = self.flux_factor();
        let chi = eddington_factor(f);
        let iso = 0.5 * (1.0 - chi);
        let dir = 0.5 * (3.0 * chi - 1.0);
        let n = if f > 0.0 {
            self.reduced_flux.map(|x| x / f)
        } else {
            [1.0, 0.0, 0.0]
        };
        let e = self.energy;
        [
            e * (iso + dir * n[0] * n[0]),
            e * dir * n[0] * n[1],
            e * dir * n[0] * n[2],
        ]
    }

    pub fn to_conserved_rad(&self, c_hat: f64) -> [f64; NUM_RAD_FIELDS] {
        let [f1, f2, f3] = self.flux(c_hat);
        [self.energy, f1, f2, f3]
    }

    /// Hyperbolic flux of `(E, F)` through a face normal to x.
    pub fn flux_vector(&self, c_hat: f64) -> [f64; NUM_RAD_FIELDS] {
        let [p1, p2, p3] = self.pressure_x();
        let c2 = c_hat * c_hat;
        [self.flux(c_hat)[0], c2 * p1, c2 * p2, c2 * p3]
    }
}

fn norm3(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Piecewise-linear reconstruction of a cell from its two neighbors, in
/// the variables `E` and `f`. Returns the states at the lower and upper faces
/// of the cell. Minmod slopes keep the face values within the range of the
/// neighbors, so energies stay non-negative.
pub fn reconstruct(left: &RadPrimitive, center: &RadPrimitive, right: &RadPrimitive) -> (RadPrimitive, RadPrimitive) {
    let de = 0.5 * minmod(center.energy - left.energy, right.energy - center.energy);
    let mut df = [0.0; 3];

    for (n, d) in df.iter_mut().enumerate() {
        let fc = center.reduced_flux[n];
        *d = 0.5 * minmod(fc - left.reduced_flux[n], right.reduced_flux[n] - fc);
    }
    let lower = RadPrimitive::new(
        center.energy - de,
        [0, 1, 2].map(|n| center.reduced_flux[n] - df[n]),
    );
    let upper = RadPrimitive::new(
        center.energy + de,
        [0, 1, 2].map(|n| center.reduced_flux[n] + df[n]),
    );
    (lower, upper)
}

/// HLL flux with signal speeds `-c_hat` and `+c_hat`. The dissipation on the
/// energy component is scaled by `epsilon` in `[0, 1]`, which keeps the
/// scheme asymptotic-preserving in optically thick cells.
pub fn riemann_hll(pl: &RadPrimitive, pr: &RadPrimitive, c_hat: f64, epsilon: f64) -> [f64; NUM_RAD_FIELDS] {
    let ul = pl.to_conserved_rad(c_hat);
    let ur = pr.to_conserved_rad(c_hat);
    let fl = pl.flux_vector(c_hat);
    let fr = pr.flux_vector(c_hat);
    let mut result = [0.0; NUM_RAD_FIELDS];

    for n in 0..NUM_RAD_FIELDS {
        let eps = if n == 0 { epsilon } else { 1.0 };
        result[n] = 0.5 * (fl[n] + fr[n]) - 0.5 * eps * c_hat * (ur[n] - ul[n]);
    }
    result
}

/// Asymptotic-preserving factor `min(1, 1 / tau)` for a face with optical
/// depth `tau` across one cell.
pub fn asymptotic_factor(tau: f64) -> f64 {
    if tau > 1.0 {
        1.0 / tau
    } else {
        1.0
    }
}

// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn eddington_factor_spans_diffusion_to_streaming() {
        assert!((eddington_factor(0.0) - 1.0 / 3.0).abs() < 1e-15);
        assert!((eddington_factor(1.0) - 1.0).abs() < 1e-15);
        let mut previous = eddington_factor(0.0);
        for k in 1..=100 {
            let chi = eddington_factor(k as f64 / 100.0);
            assert!(chi >= previous);
            previous = chi;
        }
    }

    #[test]
    fn primitive_state_enforces_causality() {
        let u = Conserved::new(1.0, [3.0, 4.0, 0.0], 0.0, 1.0, [0.0; 3]);
        let p = RadPrimitive::from_conserved(&u, 1.0);
        assert!((p.flux_factor() - 1.0).abs() < 1e-14);
        assert!((p.flux(1.0)[0] - 0.6).abs() < 1e-14);
    }

    #[test]
    fn isotropic_pressure_is_one_third_energy() {
        let p = RadPrimitive::new(3.0, [0.0; 3]);
        let [pxx, pxy, pxz] = p.pressure_x();
        assert!((pxx - 1.0).abs() < 1e-14);
        assert_eq!(pxy, 0.0);
        assert_eq!(pxz, 0.0);
    }

    #[test]
    fn free_streaming_pressure_equals_energy() {
        let p = RadPrimitive::new(2.0, [1.0, 0.0, 0.0]);
        assert!((p.pressure_x()[0] - 2.0).abs() < 1e-14);
        assert_eq!(p.flux_vector(1.0), [2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn hll_flux_is_consistent() {
        let p = RadPrimitive::new(1.5, [0.3, 0.1, 0.0]);
        let f = riemann_hll(&p, &p, 2.0, 1.0);
        let exact = p.flux_vector(2.0);
        for n in 0..NUM_RAD_FIELDS {
            assert!((f[n] - exact[n]).abs() < 1e-14);
        }
    }

    #[test]
    fn free_streaming_beam_is_upwinded() {
        let l = RadPrimitive::new(1.0, [1.0, 0.0, 0.0]);
        let r = RadPrimitive::new(0.0, [0.0; 3]);
        let f = riemann_hll(&l, &r, 1.0, 1.0);
        assert!((f[0] - 1.0).abs() < 1e-14);
        assert!((f[1] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn reconstruction_stays_within_neighbors() {
        let a = RadPrimitive::new(1.0, [0.0; 3]);
        let b = RadPrimitive::new(2.0, [0.5, 0.0, 0.0]);
        let c = RadPrimitive::new(2.5, [0.9, 0.0, 0.0]);
        let (lower, upper) = reconstruct(&a, &b, &c);
        assert!(lower.energy() >= 1.0 && upper.energy() <= 2.5);
        assert!(upper.flux_factor() <= 0.9);

        let (lower, upper) = reconstruct(&a, &c, &b);
        assert_eq!(lower.energy(), 2.5);
        assert_eq!(upper.energy(), 2.5);
    }

    #[test]
    fn asymptotic_factor_limits_thick_faces() {
        assert_eq!(asymptotic_factor(0.1), 1.0);
        assert_eq!(asymptotic_factor(4.0), 0.25);
    }
}
