// Changes HOME for the whole process, so it lives in its own test binary.
use release_tagger::{GitCli, ReleaseError};
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn test_trust_directory_writes_global_config_under_home() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    std::env::remove_var("GIT_CONFIG_GLOBAL");
    std::env::remove_var("XDG_CONFIG_HOME");

    let home = TempDir::new().unwrap();
    std::env::set_var("HOME", home.path());
    GitCli::trust_directory("/github/workspace").unwrap();

    let gitconfig = std::fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert!(gitconfig.contains("safe"));
    assert!(gitconfig.contains("/github/workspace"));

    std::env::set_var("HOME", home.path().join("missing"));
    assert!(matches!(
        GitCli::trust_directory("/github/workspace"),
        Err(ReleaseError::GitError { .. })
    ));
}
