pub mod composite;
pub mod fit;
pub mod output;
pub mod plan;
pub mod source;
