pub mod anthropic;
pub mod base;
pub mod configs;
pub mod request;
pub mod response;

#[cfg(test)]
pub mod mock;
