pub mod config;
pub mod logging;

pub mod downloader;
pub mod inventory;
pub mod planner;
pub mod retry;
pub mod scheduler;
pub mod storage;
pub mod sync;
pub mod timeline;
pub mod url_model;
