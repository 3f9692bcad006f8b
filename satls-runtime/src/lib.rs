pub mod experiment;
pub mod instances;
pub mod settings;
