//! Weathercall — a single tool-calling round trip.
//!
//! Asks a chat model a weather question while declaring `get_weather`,
//! runs the requested lookup against Open-Meteo, and hands the temperature
//! back to the model for the final answer.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod tools;
pub mod types;
pub mod weather;
