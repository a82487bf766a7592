use num::traits::Num;
use num::BigUint;

use crate::crypto::group::{Element, Exponent};
use crate::errors::{Error, Result};

/// Conversions between the canonical base-10 wire encoding of group values
/// and the in-memory element types.  Decoding is strict: a value that does
/// not parse, or parses outside the group or field, is rejected rather
/// than reduced.  `field` names the wire field for diagnostics.
pub fn decode_mod_p(field: &str, value: &str) -> Result<Element> {
    let n = parse_uint(field, value)?;
    Element::checked(n).ok_or_else(|| malformed(field, value))
}

pub fn decode_mod_q(field: &str, value: &str) -> Result<Exponent> {
    let n = parse_uint(field, value)?;
    Exponent::checked(n).ok_or_else(|| malformed(field, value))
}

pub fn encode_mod_p(element: &Element) -> String {
    element.as_uint().to_str_radix(10)
}

pub fn encode_mod_q(exponent: &Exponent) -> String {
    exponent.as_uint().to_str_radix(10)
}

fn parse_uint(field: &str, value: &str) -> Result<BigUint> {
    BigUint::from_str_radix(value, 10).map_err(|_| malformed(field, value))
}

fn malformed(field: &str, value: &str) -> Error {
    Error::MalformedElement {
        field: field.to_owned(),
        value: value.to_owned(),
    }
}
