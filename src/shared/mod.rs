pub mod constants;
pub mod geometry;
pub mod search;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
