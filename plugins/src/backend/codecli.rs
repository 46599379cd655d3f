//! Locating the external creative CLI on disk.

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Resolves the executable to spawn.
///
/// Priority:
/// 1. An explicit path (absolute, or containing a separator) is used as-is if it is a file
/// 2. Lookup in the system PATH
/// 3. The npm global bin directory (the gemini CLI ships as an npm package; supports nvm)
/// 4. Otherwise an error naming the command
pub fn resolve_executable_path(program: &str) -> Result<String> {
    let program_path = Path::new(program);

    if program_path.is_absolute() || program.contains(['/', '\\']) {
        if program_path.is_file() {
            tracing::debug!("Using explicit path: {}", program);
            return Ok(program.to_string());
        }
        return Err(anyhow::anyhow!("'{}' does not exist or is not a file", program));
    }

    let cmd_name = program_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(program);

    if let Some(path) = find_in_system_path(cmd_name) {
        tracing::debug!("Found in system PATH: {} -> {}", cmd_name, path);
        return Ok(path);
    }

    match find_in_npm_global(cmd_name) {
        Ok(path) => {
            tracing::info!("Found in npm global: {} -> {}", cmd_name, path);
            return Ok(path);
        }
        Err(e) => {
            tracing::debug!("npm global search failed: {}", e);
        }
    }

    Err(anyhow::anyhow!(
        "'{}' is not on PATH or in the npm global bin directory. \
        Install it (e.g. npm install -g @google/gemini-cli) or configure the full path.",
        cmd_name
    ))
}

/// Searches PATH for a binary executable.
fn find_in_system_path(cmd: &str) -> Option<String> {
    let path_env = std::env::var_os("PATH")?;
    std::env::split_paths(&path_env).find_map(|dir| executable_in(&dir, cmd))
}

fn find_in_npm_global(cmd: &str) -> Result<String> {
    let npm_bin = get_npm_global_bin()?;
    executable_in(&npm_bin, cmd).ok_or_else(|| {
        anyhow::anyhow!(
            "'{}' not found in npm global bin {}",
            cmd,
            npm_bin.display()
        )
    })
}

#[cfg(target_os = "windows")]
fn executable_in(dir: &Path, cmd: &str) -> Option<String> {
    ["exe", "cmd"].iter().find_map(|ext| {
        let candidate = dir.join(format!("{}.{}", cmd, ext));
        candidate
            .is_file()
            .then(|| candidate.to_string_lossy().to_string())
    })
}

#[cfg(not(target_os = "windows"))]
fn executable_in(dir: &Path, cmd: &str) -> Option<String> {
    let candidate = dir.join(cmd);
    (candidate.is_file() && is_executable(&candidate))
        .then(|| candidate.to_string_lossy().to_string())
}

/// Any of the user/group/other execute bits.
#[cfg(not(target_os = "windows"))]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

fn get_npm_global_bin() -> Result<PathBuf> {
    use std::process::Command;

    // NVM_BIN points at the bin directory of the active node version
    if let Ok(nvm_bin) = std::env::var("NVM_BIN") {
        let path = PathBuf::from(&nvm_bin);
        if path.is_dir() {
            return Ok(path);
        }
        tracing::debug!("NVM_BIN exists but not a directory: {}", nvm_bin);
    }

    #[cfg(target_os = "windows")]
    if let Ok(nvm_symlink) = std::env::var("NVM_SYMLINK") {
        let path = PathBuf::from(&nvm_symlink);
        if path.is_dir() {
            return Ok(path);
        }
    }

    // `npm prefix -g` works on every npm version; `npm bin -g` was removed in npm 9.
    let output = Command::new("npm")
        .args(["prefix", "-g"])
        .output()
        .map_err(|e| anyhow::anyhow!("Failed to execute 'npm prefix -g': {}", e))?;

    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "npm prefix -g failed with exit code {:?}: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let prefix = String::from_utf8(output.stdout)
        .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in npm output: {}", e))?
        .trim()
        .to_string();
    if prefix.is_empty() {
        return Err(anyhow::anyhow!("npm prefix -g returned empty output"));
    }

    #[cfg(target_os = "windows")]
    let bin = PathBuf::from(&prefix);
    #[cfg(not(target_os = "windows"))]
    let bin = PathBuf::from(&prefix).join("bin");

    if !bin.is_dir() {
        return Err(anyhow::anyhow!(
            "npm global bin directory does not exist: {}",
            bin.display()
        ));
    }
    Ok(bin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn finds_shell_on_path() {
        let path = resolve_executable_path("sh").unwrap();
        assert!(path.ends_with("/sh"), "{path}");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = resolve_executable_path("/definitely/not/here/gemini").unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }

    #[test]
    fn unknown_command_names_itself() {
        let err = resolve_executable_path("nanogen-no-such-binary-4f1c").unwrap_err();
        assert!(err.to_string().contains("nanogen-no-such-binary-4f1c"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn explicit_executable_file_is_used_as_is() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("gemini");
        std::fs::write(&bin, "#!/bin/sh\necho ok\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let resolved = resolve_executable_path(bin.to_str().unwrap()).unwrap();
        assert_eq!(resolved, bin.to_string_lossy());
    }
}
