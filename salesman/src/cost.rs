use std::{
    fmt,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Div, Sub},
};

use rand::{
    distributions::uniform::{SampleBorrow, SampleUniform, UniformInt, UniformSampler},
    Rng,
};

use serde::Serialize;

/// The cost of an edge or of a (partial) tour.
///
/// Arithmetic saturates at [`Cost::max`], which is also the cost reported for a
/// tour that does not exist.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cost(usize);

impl Cost {
    pub fn new(cost: usize) -> Self {
        Cost(cost)
    }

    pub fn max() -> Self {
        Cost(usize::MAX)
    }

    pub fn is_max(&self) -> bool {
        self.0 == usize::MAX
    }

    pub fn value(&self) -> usize {
        self.0
    }

    pub fn as_float(&self) -> f64 {
        self.0 as f64
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Cost) -> Self::Output {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Sum<Cost> for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::new(0), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Self {
        iter.fold(Cost::new(0), |a, b| a + *b)
    }
}

impl Sub for Cost {
    type Output = Self;
    fn sub(self, rhs: Cost) -> Self::Output {
        Cost(self.0.saturating_sub(rhs.0))
    }
}

impl Div<usize> for Cost {
    type Output = Self;
    fn div(self, rhs: usize) -> Self::Output {
        Cost(self.0 / rhs)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = *self + rhs
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_max() {
            write!(f, "inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<usize> for Cost {
    fn from(cost: usize) -> Self {
        Cost::new(cost)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct UniformCost(UniformInt<usize>);

impl UniformSampler for UniformCost {
    type X = Cost;
    fn new<B1, B2>(low: B1, high: B2) -> Self
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        UniformCost(UniformInt::<usize>::new(low.borrow().0, high.borrow().0))
    }
    fn new_inclusive<B1, B2>(low: B1, high: B2) -> Self
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        UniformCost(UniformInt::<usize>::new_inclusive(
            low.borrow().0,
            high.borrow().0,
        ))
    }
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::X {
        Cost::new(self.0.sample(rng))
    }
}

impl SampleUniform for Cost {
    type Sampler = UniformCost;
}

#[cfg(test)]
mod test_cost {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_saturating_add() {
        assert_eq!(Cost::max() + 5.into(), Cost::max());
        assert_eq!(Cost::new(3) + Cost::new(4), Cost::new(7));
        let mut cost = Cost::new(usize::MAX - 1);
        cost += 10.into();
        assert!(cost.is_max());
    }

    #[test]
    fn test_halving_rounds_down() {
        assert_eq!(Cost::new(7) / 2, Cost::new(3));
        assert_eq!(Cost::new(0) / 2, Cost::new(0));
    }

    #[test]
    fn test_sum() {
        let costs = vec![Cost::new(1), Cost::new(2), Cost::new(3)];
        assert_eq!(costs.iter().sum::<Cost>(), Cost::new(6));
        assert_eq!(costs.into_iter().sum::<Cost>(), Cost::new(6));
    }

    #[test]
    fn test_sample_inclusive_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let c: Cost = rng.gen_range(Cost::new(1)..=Cost::new(3));
            assert!(c >= 1.into() && c <= 3.into());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost::new(80).to_string(), "80");
        assert_eq!(Cost::max().to_string(), "inf");
    }
}
