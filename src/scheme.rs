//! The 14 predefined experiment schemes.
//!
//! Every scheme runs over a 120-slot table; they differ in hash method,
//! modulus, bucket grouping, and collision strategy. Schemes 10 and 11 pick
//! `modulus * bucket_size` close to the table size, but probing is still
//! flat over all 120 slots.

use crate::table::Config;
use crate::table::HashMethod;
use crate::table::Strategy;

/// Slot count shared by every predefined scheme.
pub const TABLE_SIZE: usize = 120;

/// One predefined experiment configuration.
#[derive(Debug, Clone, Copy)]
pub struct Scheme {
    /// Scheme id, 1 through 14.
    pub number: u8,
    /// Hash method, with the modulus for division schemes.
    pub method: HashMethod,
    /// Presentation grouping: 1 or 3.
    pub bucket_size: u8,
    /// Collision resolution strategy.
    pub strategy: Strategy,
}

/// All predefined schemes, in order.
pub const SCHEMES: [Scheme; 14] = [
    scheme(1, HashMethod::Division { modulus: 120 }, 1, Strategy::Linear),
    scheme(2, HashMethod::Division { modulus: 120 }, 1, Strategy::Quadratic),
    scheme(3, HashMethod::Division { modulus: 120 }, 1, Strategy::Chaining),
    scheme(4, HashMethod::Division { modulus: 127 }, 1, Strategy::Linear),
    scheme(5, HashMethod::Division { modulus: 127 }, 1, Strategy::Quadratic),
    scheme(6, HashMethod::Division { modulus: 127 }, 1, Strategy::Chaining),
    scheme(7, HashMethod::Division { modulus: 113 }, 1, Strategy::Linear),
    scheme(8, HashMethod::Division { modulus: 113 }, 1, Strategy::Quadratic),
    scheme(9, HashMethod::Division { modulus: 113 }, 1, Strategy::Chaining),
    scheme(10, HashMethod::Division { modulus: 41 }, 3, Strategy::Linear),
    scheme(11, HashMethod::Division { modulus: 41 }, 3, Strategy::Quadratic),
    scheme(12, HashMethod::Fibonacci, 1, Strategy::Linear),
    scheme(13, HashMethod::Fibonacci, 1, Strategy::Quadratic),
    scheme(14, HashMethod::Fibonacci, 1, Strategy::Chaining),
];

const fn scheme(number: u8, method: HashMethod, bucket_size: u8, strategy: Strategy) -> Scheme {
    Scheme {
        number,
        method,
        bucket_size,
        strategy,
    }
}

impl Scheme {
    /// Looks up a scheme by its 1-based number.
    pub fn from_number(number: u8) -> Option<&'static Scheme> {
        SCHEMES.get(number.checked_sub(1)? as usize)
    }

    /// The table configuration this scheme describes. Quadratic schemes use
    /// the standard constants c1 = c2 = 0.5.
    pub fn config(&self) -> Config {
        Config {
            table_size: TABLE_SIZE,
            bucket_size: self.bucket_size,
            method: self.method,
            strategy: self.strategy,
            c1: 0.5,
            c2: 0.5,
        }
    }

    /// The modulus for division schemes, if any.
    pub fn modulus(&self) -> Option<u32> {
        match self.method {
            HashMethod::Division { modulus } => Some(modulus),
            HashMethod::Fibonacci => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::HashTable;

    #[test]
    fn numbers_are_dense_and_ordered() {
        assert_eq!(SCHEMES.len(), 14);
        for (i, scheme) in SCHEMES.iter().enumerate() {
            assert_eq!(scheme.number as usize, i + 1);
            assert_eq!(
                Scheme::from_number(scheme.number).unwrap().number,
                scheme.number
            );
        }
        assert!(Scheme::from_number(0).is_none());
        assert!(Scheme::from_number(15).is_none());
    }

    #[test]
    fn division_schemes_carry_their_moduli() {
        let moduli: Vec<Option<u32>> = SCHEMES.iter().map(Scheme::modulus).collect();
        assert_eq!(
            moduli,
            vec![
                Some(120),
                Some(120),
                Some(120),
                Some(127),
                Some(127),
                Some(127),
                Some(113),
                Some(113),
                Some(113),
                Some(41),
                Some(41),
                None,
                None,
                None,
            ]
        );
    }

    #[test]
    fn only_schemes_ten_and_eleven_use_bucket_three() {
        for scheme in &SCHEMES {
            let expected = if scheme.number == 10 || scheme.number == 11 {
                3
            } else {
                1
            };
            assert_eq!(scheme.bucket_size, expected, "scheme {}", scheme.number);
        }
    }

    #[test]
    fn every_scheme_builds_a_valid_table() {
        for scheme in &SCHEMES {
            let table = HashTable::new(scheme.config())
                .unwrap_or_else(|e| panic!("scheme {} invalid: {e}", scheme.number));
            assert_eq!(table.config().table_size, TABLE_SIZE);
        }
    }
}
