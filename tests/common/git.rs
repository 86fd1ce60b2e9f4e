//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Runs git in `path`, failing on a non-zero exit
pub fn git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(path).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Sets the identity used by commit and stash
pub fn configure_user(path: &Path) -> Result<()> {
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    // Disable commit signing for tests
    git(path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Sets up a git repository on branch `main` with user config
pub fn setup_git_repo(path: &Path) -> Result<()> {
    git(path, &["init", "-q"])?;
    git(path, &["checkout", "-q", "-b", "main"])?;
    configure_user(path)
}

/// Creates a test commit in the repository
pub fn create_test_commit(
    path: &Path,
    file_name: &str,
    content: &str,
    message: &str,
) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;
    git(path, &["add", file_name])?;
    git(path, &["commit", "-q", "-m", message])?;
    Ok(())
}

/// Creates a bare repository whose `main` branch holds one commit
pub fn create_bare_remote(bare: &Path, seed: &Path) -> Result<()> {
    std::fs::create_dir_all(bare)?;
    git(bare, &["init", "-q", "--bare"])?;
    git(bare, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    std::fs::create_dir_all(seed)?;
    setup_git_repo(seed)?;
    create_test_commit(seed, "README.md", "# Assignment\n", "Initial commit")?;
    git(seed, &["remote", "add", "origin", &bare.to_string_lossy()])?;
    git(seed, &["push", "-q", "origin", "main"])?;
    Ok(())
}

/// Clones `url` into `dest` and configures the clone for committing
pub fn clone_repo(url: &Path, dest: &Path) -> Result<()> {
    let parent = dest.parent().unwrap_or(Path::new("."));
    git(
        parent,
        &["clone", "-q", &url.to_string_lossy(), &dest.to_string_lossy()],
    )?;
    configure_user(dest)
}

/// Commits in `seed` and pushes to its origin, as a student would
pub fn push_student_commit(seed: &Path, file_name: &str, content: &str) -> Result<()> {
    git(seed, &["pull", "-q", "--rebase"]).ok();
    create_test_commit(seed, file_name, content, "Student work")?;
    git(seed, &["push", "-q", "origin", "main"])?;
    Ok(())
}

pub fn commit_count(path: &Path) -> Result<u64> {
    Ok(git(path, &["rev-list", "--all", "--count"])?.parse()?)
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
