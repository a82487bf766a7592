use lazy_static::*;
use num::bigint::RandomBits;
use num::traits::{Num, One, Zero};
use num::BigUint;
use rand::Rng;
use std::ops::{Add, Mul};

/// An element of the multiplicative group of integers modulo the prime `p`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Element {
    element: BigUint,
}

/// An exponent in the additive group of integers modulo the subgroup
/// order `q`, where `p = 2q + 1`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Exponent {
    exponent: BigUint,
}

impl Element {
    /// Return the generator element `g` of the group.
    pub fn gen() -> Element {
        Element::unchecked(GENERATOR.clone())
    }

    /// Inject an integer into the group, wrapping modulo `p` if the number
    /// is greater than or equal to the modulus.
    pub fn new(element: BigUint) -> Element {
        Element::unchecked(element % &*PRIME_MODULUS)
    }

    /// Accept an integer as a group element only if it already is one:
    /// nonzero and strictly less than `p`.  This is the constructor used at
    /// the wire boundary, where an out-of-range value must be rejected
    /// rather than silently reduced.
    pub fn checked(element: BigUint) -> Option<Element> {
        if !element.is_zero() && element < *PRIME_MODULUS {
            Some(Element::unchecked(element))
        } else {
            None
        }
    }

    fn unchecked(element: BigUint) -> Element {
        Element { element }
    }

    pub fn as_uint(&self) -> &BigUint {
        &self.element
    }

    /// Raise this element to an exponent of the subgroup, modulo `p`.
    pub fn pow(&self, other: &Exponent) -> Element {
        Element::unchecked(self.element.modpow(&other.exponent, &*PRIME_MODULUS))
    }

    /// Raise this element to an arbitrary integer exponent, modulo `p`.
    pub fn pow_uint(&self, other: &BigUint) -> Element {
        Element::unchecked(self.element.modpow(other, &*PRIME_MODULUS))
    }
}

impl Exponent {
    /// Inject an integer into the exponent field, wrapping modulo `q` if
    /// the number is greater than or equal to the modulus.
    pub fn new(exponent: BigUint) -> Exponent {
        Exponent::unchecked(exponent % &*PRIME_SUBGROUP_MODULUS)
    }

    /// Accept an integer as a field element only if it is strictly less
    /// than `q`.  Zero is a valid exponent.
    pub fn checked(exponent: BigUint) -> Option<Exponent> {
        if exponent < *PRIME_SUBGROUP_MODULUS {
            Some(Exponent::unchecked(exponent))
        } else {
            None
        }
    }

    fn unchecked(exponent: BigUint) -> Exponent {
        Exponent { exponent }
    }

    pub fn zero() -> Exponent {
        Exponent::unchecked(BigUint::zero())
    }

    pub fn as_uint(&self) -> &BigUint {
        &self.exponent
    }
}

impl Mul for &Element {
    type Output = Element;
    /// Multiply group elements, modulo `p`.
    fn mul(self, other: &Element) -> Element {
        Element::unchecked(&self.element * &other.element % &*PRIME_MODULUS)
    }
}

impl Add for &Exponent {
    type Output = Exponent;
    /// Add exponents, modulo `q`.
    fn add(self, other: &Exponent) -> Exponent {
        Exponent::unchecked((&self.exponent + &other.exponent) % &*PRIME_SUBGROUP_MODULUS)
    }
}

impl Mul for &Exponent {
    type Output = Exponent;
    /// Multiply exponents, modulo `q`.
    fn mul(self, other: &Exponent) -> Exponent {
        Exponent::unchecked(&self.exponent * &other.exponent % &*PRIME_SUBGROUP_MODULUS)
    }
}

lazy_static! {
    static ref GENERATOR_ELEMENT: Element = Element::gen();
}

pub fn generator() -> &'static Element {
    &GENERATOR_ELEMENT
}

pub fn prime() -> &'static BigUint {
    &PRIME_MODULUS
}

pub fn subgroup_prime() -> &'static BigUint {
    &PRIME_SUBGROUP_MODULUS
}

/// `g^exp mod p`.
pub fn gen_pow(exp: &Exponent) -> Element {
    generator().pow(exp)
}

/// Sample a uniform exponent in `[0, q)` by rejection.
pub fn random_exponent(rng: &mut impl Rng) -> Exponent {
    let q = subgroup_prime();
    loop {
        let x: BigUint = rng.sample(RandomBits::new(q.bits()));
        if &x < q {
            return Exponent::unchecked(x);
        }
    }
}

// The production group is the 4096-bit MODP group from
// [IETF RFC 3526](https://tools.ietf.org/html/rfc3526), a safe prime
// `p = 2q + 1`.  The generator 4 is a quadratic residue, so it generates
// the order-`q` subgroup.  Tests swap in a small safe prime so that the
// modular exponentiations stay cheap.

#[cfg(not(test))]
lazy_static! {
    pub static ref PRIME_MODULUS: BigUint = parse_biguint_hex_or_panic(PRIME_HEX_4096);
    pub static ref GENERATOR: BigUint = BigUint::from(4_u32);
}

#[cfg(test)]
lazy_static! {
    pub static ref PRIME_MODULUS: BigUint = BigUint::from(200087_u32);
    pub static ref GENERATOR: BigUint = BigUint::from(25_u32);
}

lazy_static! {
    pub static ref PRIME_SUBGROUP_MODULUS: BigUint =
        (&*PRIME_MODULUS - BigUint::one()) / BigUint::from(2_u8);
}

/// Parse a hex string (which might contain spaces, tabs, or newlines) into a
/// BigUint or panic if it can't be done (this is meant to be used for
/// hard-coded constants)
fn parse_biguint_hex_or_panic(hex: &str) -> BigUint {
    BigUint::from_str_radix(
        &hex.replace(' ', "").replace('\n', "").replace('\t', ""),
        16,
    )
    .expect("Invalid hex input for parse_biguint_hex_or_panic")
}

/// The prime modulus for the 4096-bit group
#[allow(dead_code)]
const PRIME_HEX_4096: &str = "FFFFFFFF FFFFFFFF C90FDAA2 2168C234 C4C6628B 80DC1CD1
     29024E08 8A67CC74 020BBEA6 3B139B22 514A0879 8E3404DD
     EF9519B3 CD3A431B 302B0A6D F25F1437 4FE1356D 6D51C245
     E485B576 625E7EC6 F44C42E9 A637ED6B 0BFF5CB6 F406B7ED
     EE386BFB 5A899FA5 AE9F2411 7C4B1FE6 49286651 ECE45B3D
     C2007CB8 A163BF05 98DA4836 1C55D39A 69163FA8 FD24CF5F
     83655D23 DCA3AD96 1C62F356 208552BB 9ED52907 7096966D
     670C354E 4ABC9804 F1746C08 CA18217C 32905E46 2E36CE3B
     E39E772C 180E8603 9B2783A2 EC07A28F B5C55DF0 6F4C52C9
     DE2BCBF6 95581718 3995497C EA956AE5 15D22618 98FA0510
     15728E5A 8AAAC42D AD33170D 04507A33 A85521AB DF1CBA64
     ECFB8504 58DBEF0A 8AEA7157 5D060C7D B3970F85 A6E1E4C7
     ABF5AE8C DB0933D7 1E8C94E0 4A25619D CEE3D226 1AD2EE6B
     F12FFA06 D98A0864 D8760273 3EC86A64 521F2B18 177B200C
     BBE11757 7A615D6C 770988C0 BAD946E2 08E24FA0 74E5AB31
     43DB5BFC E0FD108E 4B82D120 A9210801 1A723C12 A787E6D7
     88719A10 BDBA5B26 99C32718 6AF4E23C 1A946834 B6150BDA
     2583E9CA 2AD44CE8 DBBBC2DB 04DE8EF9 2E8EFC14 1FBECAA6
     287C5947 4E6BC05D 99B2964F A090C3A2 233BA186 515BE7ED
     1F612970 CEE2D7AF B81BDD76 2170481C D0069127 D5B05AA9
     93B4EA98 8D8FDDC1 86FFB7DC 90A6C08F 4DF435C9 34063199
     FFFFFFFF FFFFFFFF";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn subgroup_modulus_is_half_of_p_minus_one() {
        assert_eq!(
            &*PRIME_MODULUS - BigUint::one(),
            &*PRIME_SUBGROUP_MODULUS * BigUint::from(2_u8)
        );
    }

    #[test]
    fn checked_element_rejects_zero_and_overflow() {
        assert!(Element::checked(BigUint::zero()).is_none());
        assert!(Element::checked(PRIME_MODULUS.clone()).is_none());
        assert!(Element::checked(&*PRIME_MODULUS + BigUint::one()).is_none());
        assert!(Element::checked(BigUint::one()).is_some());
        assert!(Element::checked(&*PRIME_MODULUS - BigUint::one()).is_some());
    }

    #[test]
    fn checked_exponent_accepts_zero_rejects_overflow() {
        assert!(Exponent::checked(BigUint::zero()).is_some());
        assert!(Exponent::checked(PRIME_SUBGROUP_MODULUS.clone()).is_none());
        assert!(Exponent::checked(&*PRIME_SUBGROUP_MODULUS - BigUint::one()).is_some());
    }

    #[test]
    fn random_exponent_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let x = random_exponent(&mut rng);
            assert!(x.as_uint() < subgroup_prime());
        }
    }
}
