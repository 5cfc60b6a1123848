pub mod config;
pub mod frame;
pub mod info;
pub mod options;
pub mod run;
