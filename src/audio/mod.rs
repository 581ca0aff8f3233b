pub mod mixer;
pub mod stream;
