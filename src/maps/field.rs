//! Dense row-major 2D grids shared by every map generator.

use glam::DVec2;
use rayon::prelude::*;

/// Dense grid over `[0,width) x [0,height)`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

/// Per-pixel displacement vectors, already normalized to `[-1, 1]`.
pub type VectorField = Field2D<DVec2>;

/// Per-pixel scalar; `None` marks pixels outside the shape.
pub type ScalarField2D = Field2D<Option<f64>>;

impl<T: Send> Field2D<T> {
    /// Evaluates `f(x, y)` for every pixel, one rayon task per row.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> T + Sync,
    {
        let f = &f;
        let data = (0..height)
            .into_par_iter()
            .flat_map_iter(|y| (0..width).map(move |x| f(x, y)))
            .collect();
        Self { width, height, data }
    }
}

impl<T> Field2D<T> {
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width as usize * height as usize, "field data length mismatch");
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(self.index(x, y))
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1) as usize)
    }

    /// Iterates `(x, y, value)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        let w = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i as u32) % w, (i as u32) / w, v))
    }
}

impl<T: Clone> Field2D<T> {
    /// Window of `width x height` centered in `self`; the origin is
    /// `((self.width - width) / 2, (self.height - height) / 2)` with integer division.
    /// Returns `None` when the window does not fit.
    pub fn crop_center(&self, width: u32, height: u32) -> Option<Self> {
        if width > self.width || height > self.height {
            return None;
        }
        let x0 = (self.width - width) / 2;
        let y0 = (self.height - height) / 2;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in y0..y0 + height {
            let start = self.index(x0, y);
            data.extend_from_slice(&self.data[start..start + width as usize]);
        }
        Some(Self { width, height, data })
    }
}

impl<T: Sync> Field2D<T> {
    /// Pure per-pixel map into a new field of the same size.
    pub fn map<U, F>(&self, f: F) -> Field2D<U>
    where
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        Field2D {
            width: self.width,
            height: self.height,
            data: self.data.par_iter().map(f).collect(),
        }
    }
}
