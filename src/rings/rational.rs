use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::iter::Sum;
use std::ops;
use std::str::FromStr;

/// Exact rational number, always kept reduced with a positive denominator.
#[derive(Debug, Clone)]
pub struct Rational {
    pub num: BigInt,
    pub den: BigInt,
}

impl Rational {
    pub fn new(num: BigInt, den: BigInt) -> Self {
        if den.is_zero() {
            panic!("Denominator cannot be zero");
        }

        let g = num.gcd(&den);
        let num = num / &g;
        let den = den / &g;

        if den < BigInt::zero() {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }
}

impl ops::Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        if self.den == rhs.den {
            return Rational::new(self.num + rhs.num, self.den);
        }

        Rational::new(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self + -rhs
    }
}

impl ops::Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl ops::Div for Rational {
    type Output = Rational;

    // Division by zero trips the zero-denominator check in `new`.
    fn div(self, rhs: Rational) -> Rational {
        Rational::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        // The denominator stays positive, so only the numerator flips.
        Rational {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Zero for Rational {
    fn zero() -> Rational {
        Rational {
            num: BigInt::zero(),
            den: BigInt::one(),
        }
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl One for Rational {
    fn one() -> Rational {
        Rational {
            num: BigInt::one(),
            den: BigInt::one(),
        }
    }
}

impl Sum<Rational> for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::zero(), |acc, x| acc + x)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Rational {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        let (num, den) = match s.split_once('/') {
            Some((num, den)) => (num, den),
            None => (s, "1"),
        };

        let num = BigInt::parse_bytes(num.trim().as_bytes(), 10).ok_or("Invalid numerator")?;
        let den = BigInt::parse_bytes(den.trim().as_bytes(), 10).ok_or("Invalid denominator")?;
        if den.is_zero() {
            return Err("Denominator cannot be zero".into());
        }

        Ok(Rational::new(num, den))
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Rational {
        Rational {
            num: BigInt::from(value),
            den: BigInt::one(),
        }
    }
}

impl PartialEq<Rational> for Rational {
    fn eq(&self, rhs: &Rational) -> bool {
        &self.num * &rhs.den == &rhs.num * &self.den
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, rhs: &i64) -> bool {
        self.num == &self.den * rhs
    }
}

impl Eq for Rational {}

impl PartialOrd<Rational> for Rational {
    fn partial_cmp(&self, rhs: &Rational) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for Rational {
    fn cmp(&self, rhs: &Rational) -> Ordering {
        // Both denominators are positive, so cross-multiplying keeps the order.
        let a = &self.num * &rhs.den;
        let b = &rhs.num * &self.den;
        a.cmp(&b)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
