//! Compressed sparse column storage for comparison counts.
//!
//! Backed by `faer::sparse::SparseColMat`, which sorts row indices inside each
//! column and sums duplicate entries. Every builder drops stored zeros before
//! handing triplets to faer, so iteration is column-major over true nonzeros.

use faer::sparse::{SparseColMat, Triplet};
use ndarray::Array1;

use crate::error::{BtError, Result, invalid};

#[derive(Debug, Clone)]
pub struct CscMatrix {
    inner: SparseColMat<usize, f64>,
}

impl PartialEq for CscMatrix {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.inner.symbolic(), other.inner.symbolic());
        self.nrows() == other.nrows()
            && self.ncols() == other.ncols()
            && a.col_ptr() == b.col_ptr()
            && a.row_idx() == b.row_idx()
            && self.inner.val() == other.inner.val()
    }
}

impl CscMatrix {
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        Self::from_triplets(nrows, ncols, &[])
    }

    /// Build from the standard compressed-sparse-column arrays.
    ///
    /// Values must be finite and non-negative. Row indices inside a column
    /// need not be sorted; duplicates are summed.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row_indices: &[usize],
        col_pointers: &[usize],
        values: &[f64],
    ) -> Result<Self> {
        if col_pointers.len() != ncols + 1 {
            invalid!(
                "column pointer length {} does not match ncols+1 = {}",
                col_pointers.len(),
                ncols + 1
            );
        }
        if col_pointers[0] != 0 {
            invalid!("first column pointer must be 0, got {}", col_pointers[0]);
        }
        if row_indices.len() != values.len() {
            invalid!(
                "row index length {} does not match value length {}",
                row_indices.len(),
                values.len()
            );
        }
        if col_pointers[ncols] != values.len() {
            invalid!(
                "last column pointer {} does not match value length {}",
                col_pointers[ncols],
                values.len()
            );
        }
        // With the first pointer at 0 and the last at nnz, monotone pointers
        // keep every column span inside the value array.
        if let Some(col) = col_pointers.windows(2).position(|w| w[1] < w[0]) {
            invalid!("column pointers decrease at column {col}");
        }

        let mut triplets = Vec::with_capacity(values.len());
        for col in 0..ncols {
            for p in col_pointers[col]..col_pointers[col + 1] {
                triplets.push((row_indices[p], col, values[p]));
            }
        }
        Self::from_triplets(nrows, ncols, &triplets)
    }

    /// Build from `(row, col, value)` triples in any order.
    pub fn from_triplets(nrows: usize, ncols: usize, triplets: &[(usize, usize, f64)]) -> Result<Self> {
        for &(r, c, v) in triplets {
            if r >= nrows || c >= ncols {
                invalid!("entry ({r}, {c}) outside a {nrows}x{ncols} matrix");
            }
            if !v.is_finite() || v < 0.0 {
                invalid!("entry ({r}, {c}) must be finite and non-negative, got {v}");
            }
        }
        let entries: Vec<Triplet<usize, usize, f64>> = triplets
            .iter()
            .filter(|&&(_, _, v)| v != 0.0)
            .map(|&(r, c, v)| Triplet::new(r, c, v))
            .collect();
        let inner = SparseColMat::try_new_from_triplets(nrows, ncols, &entries)
            .map_err(|e| BtError::InvalidArgument(format!("{e:?}")))?;
        Ok(Self { inner })
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    pub fn nnz(&self) -> usize {
        self.inner.val().len()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn values(&self) -> &[f64] {
        self.inner.val()
    }

    fn col_span(&self, col: usize) -> std::ops::Range<usize> {
        let col_ptr = self.inner.symbolic().col_ptr();
        col_ptr[col]..col_ptr[col + 1]
    }

    /// Nonzeros as `(row, col, value)` in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let row_idx = self.inner.symbolic().row_idx();
        let val = self.inner.val();
        (0..self.ncols()).flat_map(move |c| self.col_span(c).map(move |p| (row_idx[p], c, val[p])))
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if col >= self.ncols() {
            return 0.0;
        }
        let span = self.col_span(col);
        match self.inner.symbolic().row_idx()[span.clone()].binary_search(&row) {
            Ok(offset) => self.inner.val()[span.start + offset],
            Err(_) => 0.0,
        }
    }

    pub fn transpose(&self) -> Result<Self> {
        let inner = self
            .inner
            .as_ref()
            .transpose()
            .to_col_major()
            .map_err(|e| BtError::InvalidArgument(format!("transpose failed: {e:?}")))?;
        Ok(Self { inner })
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.nrows() != other.nrows() || self.ncols() != other.ncols() {
            invalid!(
                "cannot add {}x{} and {}x{} matrices",
                self.nrows(),
                self.ncols(),
                other.nrows(),
                other.ncols()
            );
        }
        let triplets: Vec<_> = self.iter().chain(other.iter()).collect();
        Self::from_triplets(self.nrows(), self.ncols(), &triplets)
    }

    pub fn row_sums(&self) -> Array1<f64> {
        let mut sums = Array1::zeros(self.nrows());
        for (r, _, v) in self.iter() {
            sums[r] += v;
        }
        sums
    }

    pub fn col_sums(&self) -> Array1<f64> {
        let val = self.inner.val();
        Array1::from_iter((0..self.ncols()).map(|c| val[self.col_span(c)].iter().sum::<f64>()))
    }

    /// `y = A x`
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) {
        debug_assert_eq!(x.len(), self.ncols());
        debug_assert_eq!(y.len(), self.nrows());
        y.fill(0.0);
        for (r, c, v) in self.iter() {
            y[r] += v * x[c];
        }
    }

    /// Drop every stored value whose position matches `mask`, rebuilding the
    /// structure once from the surviving entries.
    pub fn zero_masked<F>(&mut self, mask: F)
    where
        F: Fn(usize, usize) -> bool,
    {
        if !self.iter().any(|(r, c, _)| mask(r, c)) {
            return;
        }
        let kept: Vec<_> = self.iter().filter(|&(r, c, _)| !mask(r, c)).collect();
        if let Ok(m) = Self::from_triplets(self.nrows(), self.ncols(), &kept) {
            *self = m;
        }
    }

    pub fn zero_diagonal(&mut self) {
        self.zero_masked(|r, c| r == c);
    }
}

/// Fixed positions of a matrix's nonzeros together with their original values.
///
/// Extracted once; callers then keep a parallel values buffer and only ever
/// overwrite values, never structure.
#[derive(Debug, Clone)]
pub struct SparsityPattern {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    counts: Vec<f64>,
}

impl SparsityPattern {
    pub fn from_matrix(m: &CscMatrix) -> Self {
        let n = m.nnz();
        let mut rows = Vec::with_capacity(n);
        let mut cols = Vec::with_capacity(n);
        let mut counts = Vec::with_capacity(n);
        for (r, c, v) in m.iter() {
            rows.push(r);
            cols.push(c);
            counts.push(v);
        }
        Self {
            nrows: m.nrows(),
            ncols: m.ncols(),
            rows,
            cols,
            counts,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Values at extraction time.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Same structure, new values. `values` is parallel to the pattern and
    /// must be finite and positive.
    pub fn with_values(&self, values: &[f64]) -> Result<CscMatrix> {
        if values.len() != self.len() {
            invalid!(
                "{} values for a pattern of {} positions",
                values.len(),
                self.len()
            );
        }
        let triplets: Vec<_> = (0..self.len())
            .map(|p| (self.rows[p], self.cols[p], values[p]))
            .collect();
        CscMatrix::from_triplets(self.nrows, self.ncols, &triplets)
    }
}
