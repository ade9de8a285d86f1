use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the server home directory into an absolute path.
///
/// `None` (or a blank string) selects `<user home>/<default_subdir>`. A leading
/// `~` is expanded to the user home; other relative paths are taken relative to
/// the current directory. With `create`, the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("could not determine user home"));

    let path = match configured.as_deref().map(str::trim) {
        None | Some("") => user_home()?.join(default_subdir),
        Some("~") => user_home()?,
        Some(p) if p.starts_with("~/") || p.starts_with("~\\") => user_home()?.join(&p[2..]),
        Some(p) => {
            let p = PathBuf::from(p);
            if p.is_absolute() {
                p
            } else {
                std::env::current_dir()
                    .context("could not read current directory")?
                    .join(p)
            }
        }
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }
    Ok(path)
}
