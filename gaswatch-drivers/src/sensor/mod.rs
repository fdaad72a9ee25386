//! Gas sensor implementations

pub mod mq2;

pub use mq2::Mq2Sensor;
