use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{db_path_in, get_data_dir, load_settings, save_settings, shellexpand_path};

/// An explicit `--data-dir` wins and is persisted; otherwise the directory
/// resolves the same way every other command resolves it, `TAGBOOK_DATA_DIR`
/// included.
pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    let resolved = match data_dir {
        Some(dir) => {
            settings.data_dir = shellexpand_path(&dir);
            PathBuf::from(&settings.data_dir)
        }
        None => get_data_dir(),
    };
    save_settings(&settings)?;

    std::fs::create_dir_all(&resolved)?;
    let conn = get_connection(&db_path_in(&resolved))?;
    init_db(&conn)?;

    println!("Initialized tagbook at {}", resolved.display());
    Ok(())
}
