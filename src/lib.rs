#[macro_use]
extern crate custom_derive;
#[macro_use]
extern crate enum_derive;

pub mod eos;
pub mod solver;
pub mod units;
