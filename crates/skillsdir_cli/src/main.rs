//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `skillsdir_core` linkage.
//! - With `<data_dir> <database_name>`, bootstrap the store configuration,
//!   logging store events under `<data_dir>/logs`.
//!
//! The session key is never printed.

use skillsdir_core::{default_log_level, init_logging, DataAccess, SqliteDataAccess, StoreConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_SUBDIR: &str = "logs";

fn main() -> ExitCode {
    println!("skillsdir_core version={}", skillsdir_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [data_dir, database_name] = args.as_slice() else {
        if !args.is_empty() {
            eprintln!("usage: skillsdir_cli [<data_dir> <database_name>]");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let access = match SqliteDataAccess::new(StoreConfig::new(data_dir, database_name)) {
        Ok(access) => access,
        Err(err) => {
            eprintln!("invalid store settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging failures never block the bootstrap itself.
    match log_dir_for(Path::new(data_dir)) {
        Ok(log_dir) => {
            if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
                eprintln!("logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("logging disabled: cannot resolve `{data_dir}`: {err}"),
    }

    match access.get_or_create_configuration() {
        Ok(configuration) => {
            println!(
                "configuration ready created_at={}",
                configuration.created_at.to_rfc3339()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("configuration bootstrap failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Absolute log directory inside an existing data directory.
fn log_dir_for(data_dir: &Path) -> std::io::Result<PathBuf> {
    Ok(std::fs::canonicalize(data_dir)?.join(LOG_SUBDIR))
}

#[cfg(test)]
mod tests {
    use super::log_dir_for;
    use std::path::Path;

    #[test]
    fn log_dir_is_absolute_and_inside_data_dir() {
        let data_dir = std::env::temp_dir();
        let log_dir = log_dir_for(&data_dir).unwrap();

        assert!(log_dir.is_absolute());
        assert!(log_dir.ends_with("logs"));
        assert_eq!(
            log_dir.parent().unwrap(),
            std::fs::canonicalize(&data_dir).unwrap()
        );
    }

    #[test]
    fn log_dir_requires_existing_data_dir() {
        assert!(log_dir_for(Path::new("/definitely/not/here/skillsdir")).is_err());
    }
}
