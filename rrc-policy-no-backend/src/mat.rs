use serde::{Deserialize, Serialize};

fn n_elements(shape: [usize; 2]) -> Option<usize> {
    shape[0].checked_mul(shape[1])
}

/// A dense row-major matrix.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    pub(crate) data: Vec<f32>,
    pub(crate) shape: [usize; 2],
}

impl Mat {
    /// Constructs a matrix, returns `None` if `data` does not fill `shape`.
    pub fn new(data: Vec<f32>, shape: [usize; 2]) -> Option<Self> {
        match n_elements(shape) == Some(data.len()) {
            true => Some(Self { data, shape }),
            false => None,
        }
    }

    /// A matrix filled with zeros, `None` if the number of elements overflows.
    pub fn zeros(shape: [usize; 2]) -> Option<Self> {
        Some(Self {
            data: vec![0f32; n_elements(shape)?],
            shape,
        })
    }

    /// Returns `true` if the elements fill the shape.
    ///
    /// Matrices deserialized from untrusted input must be checked with this.
    pub(crate) fn is_consistent(&self) -> bool {
        n_elements(self.shape) == Some(self.data.len())
    }

    /// Shape of the matrix, `[rows, cols]`.
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Elements in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the matrix and returns its elements.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (self.shape[0], self.shape[1], x.shape[1]);
        assert_eq!(
            l, x.shape[0],
            "Trying to multiply matrices of incompatible sizes: {:?}",
            (&self.shape, &x.shape)
        );
        let mut data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let kk = i * n + j;
                for k in 0..l {
                    data[kk] += self.data[i * l + k] * x.data[k * n + j];
                }
            }
        }

        Self {
            shape: [m, n],
            data,
        }
    }

    pub fn add(&self, x: &Mat) -> Self {
        assert_eq!(
            self.shape, x.shape,
            "Trying to add matrices of different sizes: {:?}",
            (&self.shape, &x.shape)
        );

        let data = self
            .data
            .iter()
            .zip(x.data.iter())
            .map(|(a, b)| *a + *b)
            .collect();

        Mat {
            data,
            shape: self.shape,
        }
    }

    pub fn relu(&self) -> Self {
        self.map(|a| a.max(0.))
    }

    pub fn tanh(&self) -> Self {
        self.map(f32::tanh)
    }

    pub fn scale(&self, s: f32) -> Self {
        self.map(|a| a * s)
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|a| f(*a)).collect(),
            shape: self.shape,
        }
    }
}

/// Column vector.
impl From<Vec<f32>> for Mat {
    fn from(x: Vec<f32>) -> Self {
        let shape = [x.len(), 1];
        Self { shape, data: x }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_matmul() {
        let x = Mat::new(vec![1.0f32, 2., 3., 4., 5., 6.], [2, 3]).unwrap();
        let y: Mat = vec![7.0f32, 8., 9.].into();
        let z = x.matmul(&y);
        assert_eq!(z, Mat::new(vec![50., 122.], [2, 1]).unwrap());
    }

    #[test]
    fn test_elementwise() {
        let x: Mat = vec![-1.0f32, 0.5, 2.0].into();
        assert_eq!(x.relu().into_vec(), vec![0.0, 0.5, 2.0]);
        assert_eq!(x.add(&x).scale(0.5), x);
        assert!(x.tanh().data().iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_new_checks_size() {
        assert!(Mat::new(vec![0.0; 5], [2, 3]).is_none());
        assert_eq!(Mat::zeros([2, 3]).unwrap().data().len(), 6);
        assert!(Mat::zeros([usize::MAX, 2]).is_none());
        assert!(Mat::new(vec![], [usize::MAX, 2]).is_none());
    }
}
