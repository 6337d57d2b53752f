pub mod client;

pub use client::{format_temperature, WeatherClient};
