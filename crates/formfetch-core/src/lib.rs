pub mod config;
pub mod logging;

pub mod fetcher;
pub mod report;
pub mod storage;
pub mod summary;
pub mod transport;
pub mod url_list;
pub mod url_model;
