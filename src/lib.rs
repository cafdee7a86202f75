//! fruitbell library exports for testing

pub mod core;
pub mod game;
pub mod term;

#[cfg(test)]
pub mod test_support;
