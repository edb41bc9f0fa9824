#[cfg(test)]
mod handler;
#[cfg(any(test, feature = "mock"))]
pub mod mocks;
