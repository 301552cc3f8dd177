use rand::Rng;

use crate::dtype::DType;
use crate::error::{Result, ValidationError};
use crate::math::buffer::{dispatch_mut, Element};
use crate::math::matrix::Array;

fn fill_value<T: Element>(data: &mut [T], value: f64) {
    data.fill(T::from_f64(value));
}

fn fill_uniform<T: Element, R: Rng + ?Sized>(data: &mut [T], rng: &mut R, low: i64, high: i64) {
    for x in data.iter_mut() {
        *x = T::from_i64(rng.gen_range(low..high));
    }
}

fn representable(dtype: DType, low: i64, high: i64) -> bool {
    match dtype {
        DType::Int32 => i32::holds_range(low, high),
        DType::Int64 => i64::holds_range(low, high),
        DType::Float => f32::holds_range(low, high),
        DType::Double => f64::holds_range(low, high),
    }
}

impl Array {
    /// Overwrite every element with 1.
    pub fn ones(&mut self) -> &mut Self {
        self.fill(1.0)
    }

    /// Overwrite every element with `value` cast to the element type.
    pub fn fill(&mut self, value: f64) -> &mut Self {
        log::trace!("fill {:?} {} with {}", self.dims(), self.dtype(), value);
        dispatch_mut!(&mut self.buffer, data => fill_value(data, value));
        self
    }

    /// Overwrite every element with a uniform draw from `[low, high)`.
    ///
    /// Fractional arrays receive the drawn integers converted to floats.
    pub fn randint(&mut self, low: i64, high: i64) -> Result<&mut Self> {
        self.randint_with(&mut rand::thread_rng(), low, high)
    }

    /// [`Array::randint`] with a caller-supplied generator, e.g. a seeded `StdRng`.
    pub fn randint_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        low: i64,
        high: i64,
    ) -> Result<&mut Self> {
        if low >= high {
            return Err(ValidationError::InvalidRange { low, high }.into());
        }
        let dtype = self.dtype();
        if !representable(dtype, low, high) {
            return Err(ValidationError::RangeOutOfBounds { low, high, dtype }.into());
        }
        log::trace!("randint {:?} {} in [{}, {})", self.dims(), dtype, low, high);
        dispatch_mut!(&mut self.buffer, data => fill_uniform(data, rng, low, high));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::ArrayError;

    #[test]
    fn test_ones_every_dtype() {
        for dtype in DType::ALL {
            let mut a = Array::zeros(&[3, 2], dtype).unwrap();
            a.ones();
            assert_eq!(a.to_f64_vec(), vec![1.0; 6]);
            assert_eq!(a.dtype(), dtype);
        }
    }

    #[test]
    fn test_fill_casts_to_dtype() {
        let mut a = Array::zeros(&[2], DType::Int32).unwrap();
        a.fill(2.9);
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![2, 2]);
    }

    #[test]
    fn test_randint_single_value_range() {
        for dtype in DType::ALL {
            let mut a = Array::zeros(&[4, 5], dtype).unwrap();
            a.fill(7.0);
            a.randint(0, 1).unwrap();
            assert!(a.to_f64_vec().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_randint_seeded_is_reproducible() {
        let mut a = Array::zeros(&[6, 3], DType::Int64).unwrap();
        let mut b = Array::zeros(&[6, 3], DType::Int64).unwrap();
        a.randint_with(&mut StdRng::seed_from_u64(7), -5, 5).unwrap();
        b.randint_with(&mut StdRng::seed_from_u64(7), -5, 5).unwrap();
        let values = a.to_vec::<i64>().unwrap();
        assert_eq!(values, b.to_vec::<i64>().unwrap());
        assert!(values.iter().all(|v| (-5..5).contains(v)));
    }

    #[test]
    fn test_randint_invalid_range_leaves_array_untouched() {
        let mut a = Array::zeros(&[2, 2], DType::Int32).unwrap();
        a.ones();
        let err = a.randint(2, 1).unwrap_err();
        assert_eq!(
            err,
            ArrayError::Validation(ValidationError::InvalidRange { low: 2, high: 1 })
        );
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![1; 4]);

        let err = a.randint(0, i64::from(i32::MAX) + 2).unwrap_err();
        assert!(matches!(
            err,
            ArrayError::Validation(ValidationError::RangeOutOfBounds { .. })
        ));
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![1; 4]);
    }
}
