pub mod envelope;
pub mod filter;
pub mod noise;
pub mod oscillator;
pub mod vca;
