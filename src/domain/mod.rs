pub mod granularity;
pub mod throughput;
pub mod ticket;
