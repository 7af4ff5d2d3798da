pub trait RandomSource {
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        ((self.unit() * bound as f64) as usize).min(bound.saturating_sub(1))
    }

    fn between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.unit()
    }
}

impl RandomSource for fastrand::Rng {
    fn unit(&mut self) -> f64 {
        self.f64()
    }

    fn below(&mut self, bound: usize) -> usize {
        self.usize(..bound)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct Scripted {
        values: Vec<f64>,
        next: usize,
    }

    impl Scripted {
        pub(crate) fn new(values: Vec<f64>) -> Self {
            Self { values, next: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn unit(&mut self) -> f64 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }
    }

    #[test]
    fn default_below_stays_in_range() {
        let mut source = Scripted::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(source.below(24), 0);
        assert_eq!(source.below(24), 12);
        assert_eq!(source.below(24), 23);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);
        for _ in 0..8 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn between_maps_unit_range() {
        let mut source = Scripted::new(vec![0.5]);
        assert_eq!(source.between(3.0, 5.0), 4.0);
    }
}
