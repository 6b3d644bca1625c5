#![doc = include_str!("RUSTDOC.md")]

pub mod rum;

#[cfg(test)]
pub mod test_support;
