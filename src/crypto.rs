pub mod chaum_pedersen;
pub mod elgamal;
pub mod group;
pub mod hash;
