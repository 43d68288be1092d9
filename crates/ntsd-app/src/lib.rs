pub mod cli;
pub mod error;
pub mod ldif;
pub mod render;
pub mod run;
pub mod source;
