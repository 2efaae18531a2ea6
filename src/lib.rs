pub mod safety;
pub mod sched;
pub mod sim;

#[cfg(test)]
mod test;
