use serde::{Deserialize, Serialize};

/// A uniform, cell-centered 1D mesh covering `[0, length)`.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub length: f64,
    pub size: usize,
}

impl Mesh {
    pub fn new(length: f64, size: usize) -> Self {
        Self { length, size }
    }

    pub fn cell_spacing(&self) -> f64 {
        self.length / self.size as f64
    }

    /// Return the position of the center of interior cell `index`.
    pub fn cell_center(&self, index: usize) -> f64 {
        self.cell_spacing() * (index as f64 + 0.5)
    }

    /// Return the left and right face positions of interior cell `index`.
    pub fn cell_faces(&self, index: usize) -> (f64, f64) {
        let dx = self.cell_spacing();
        (dx * index as f64, dx * (index as f64 + 1.0))
    }

    pub fn cell_centers(&self) -> Vec<f64> {
        (0..self.size).map(|i| self.cell_center(i)).collect()
    }
}
