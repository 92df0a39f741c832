use num_traits::{NumCast, One, Zero};
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub trait Element:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Sum<Self>
    + Display
    + Debug
{
}

impl<T> Element for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Neg<Output = T>
        + Sum<T>
        + Display
        + Debug
{
}

// The fixed-size variant stores elements in arrays and compares pivots
// against a float tolerance, so it needs Copy and f64 conversions on top.
pub trait Scalar: Element + Copy + PartialOrd + NumCast {}

impl<T> Scalar for T where T: Element + Copy + PartialOrd + NumCast {}
