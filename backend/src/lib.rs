pub mod types;
pub mod logger;
pub mod mesh;
pub mod db;

use std::fs::create_dir_all;
use std::path::PathBuf;
use std::error::Error;

use app_dirs::{get_app_root, AppDataType, AppInfo};

pub const APP_INFO: AppInfo = AppInfo { name: "modelstore", author: "modelstore" };

pub static MODEL_DB_NAME: &str = "model.sqlite3";

/// Returns the store directory, creating it if needed.
///
/// Precedence:
/// - set with env var MODELSTORE_DIR (a .env file loaded by the caller counts)
/// - the platform user-data directory
pub fn get_create_modelstore_dir() -> Result<PathBuf, Box<dyn Error>> {
    let p = match std::env::var("MODELSTORE_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => get_app_root(AppDataType::UserData, &APP_INFO)?,
    };
    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}

pub fn get_create_model_db_path() -> Result<PathBuf, Box<dyn Error>> {
    Ok(get_create_modelstore_dir()?.join(MODEL_DB_NAME))
}

pub fn model_db_exists() -> bool {
    match get_create_model_db_path() {
        Ok(p) => p.exists(),
        Err(_) => false,
    }
}
