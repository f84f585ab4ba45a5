pub mod metrics;
pub mod resource;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod test;
