use crate::mesh::Mesh;

/// A prescribed volumetric source of radiation energy (energy per unit
/// volume per unit time), evaluated per interior cell at the time of each
/// transport stage.
///
pub trait EnergySource: Send + Sync {
    fn energy_source(&self, mesh: &Mesh, cell: usize, time: f64) -> f64;
}

#[derive(Clone, Debug, Default)]
pub struct NoSource;

impl EnergySource for NoSource {
    fn energy_source(&self, _mesh: &Mesh, _cell: usize, _time: f64) -> f64 {
        0.0
    }
}

/**
 * A uniform source of strength `strength` over the slab `[x_min, x_max)`,
 * active while `time < cutoff_time`. Cells straddling a slab edge receive
 * the fraction of the source proportional to their overlap with the slab.
 */
#[derive(Clone, Debug)]
pub struct SlabSource {
    pub strength: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub cutoff_time: f64,
}

impl SlabSource {
    /// Fraction of a cell `[xl, xr)` covered by the slab.
    pub fn overlap_fraction(&self, xl: f64, xr: f64) -> f64 {
        let overlap = xr.min(self.x_max) - xl.max(self.x_min);
        (overlap / (xr - xl)).max(0.0).min(1.0)
    }
}

impl EnergySource for SlabSource {
    fn energy_source(&self, mesh: &Mesh, cell: usize, time: f64) -> f64 {
        if time < self.cutoff_time {
            let (xl, xr) = mesh.cell_faces(cell);
            self.strength * self.overlap_fraction(xl, xr)
        } else {
            0.0
        }
    }
}
