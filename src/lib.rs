// Library for tests to access modules

pub mod config;
pub mod history;
pub mod models;
pub mod rate;
pub mod render;
pub mod sampler;
pub mod source;
pub mod sysinfo_repo;
pub mod worker;
