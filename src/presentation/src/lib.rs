pub mod banner;
pub mod markdown;
pub mod output;
pub mod spinner;
