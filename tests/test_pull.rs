//! Integration tests for the pull protocol against real repositories

mod common;

use classroom_repos::batch::{BatchKind, BatchOutcome, PullProtocol};
use classroom_repos::core::list_repository_directories;
use classroom_repos::git::OperationResult;
use common::{commit_count, git, is_git_available, run_batch, SubmissionsFixture};
use std::fs;

fn pull_protocols(fixture: &SubmissionsFixture) -> Vec<PullProtocol> {
    list_repository_directories(&fixture.submissions())
        .unwrap()
        .iter()
        .map(PullProtocol::new)
        .collect()
}

#[tokio::test]
async fn test_pull_is_idempotent() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let fixture = SubmissionsFixture::new().unwrap();
    fixture.add_student("alice").unwrap();

    let (first, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;
    let (second, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;

    assert_eq!(first.results, vec![OperationResult::success("alice")]);
    assert_eq!(second.results, vec![OperationResult::success("alice")]);
}

#[tokio::test]
async fn test_pull_reports_new_commits() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let fixture = SubmissionsFixture::new().unwrap();
    let repo = fixture.add_student("alice").unwrap();
    fixture.add_student("bob").unwrap();
    let before = commit_count(&repo).unwrap();
    fixture.student_pushes("alice", "solution.py").unwrap();

    let (report, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;

    assert_eq!(
        report.results,
        vec![
            OperationResult::success_with_note("alice", "new commits"),
            OperationResult::success("bob"),
        ]
    );
    assert!(commit_count(&repo).unwrap() > before);
    assert!(repo.join("solution.py").exists());
}

#[tokio::test]
async fn test_pull_on_plain_directory_is_not_a_repository() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let fixture = SubmissionsFixture::new().unwrap();
    fixture.add_student("alice").unwrap();
    fs::create_dir(fixture.repo("bob")).unwrap();
    fixture.add_student("carol").unwrap();

    let (report, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;

    assert_eq!(report.outcome, BatchOutcome::Completed);
    assert_eq!(report.results[1], OperationResult::failure("bob", "not a repository"));
    assert!(report.results[0].is_success());
    assert!(report.results[2].is_success());
    assert_eq!(report.counters.succeeded, 2);
    assert_eq!(report.counters.failed, 1);
}

#[tokio::test]
async fn test_local_changes_survive_pull() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let fixture = SubmissionsFixture::new().unwrap();
    let repo = fixture.add_student("alice").unwrap();
    fs::write(repo.join("notes.txt"), "instructor notes\n").unwrap();
    fixture.student_pushes("alice", "solution.py").unwrap();

    let (report, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;

    assert!(report.results[0].is_success());
    assert_eq!(
        fs::read_to_string(repo.join("notes.txt")).unwrap(),
        "instructor notes\n"
    );
    assert!(repo.join("solution.py").exists());
}

#[tokio::test]
async fn test_pull_with_unreachable_remote_fails() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let fixture = SubmissionsFixture::new().unwrap();
    fixture.add_student("alice").unwrap();
    fs::remove_dir_all(fixture.remote("alice")).unwrap();

    let (report, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;

    assert_eq!(report.results, vec![OperationResult::failure("alice", "failed to pull")]);
}

#[tokio::test]
async fn test_failed_pull_restores_local_changes() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let fixture = SubmissionsFixture::new().unwrap();
    let repo = fixture.add_student("alice").unwrap();
    fs::write(repo.join("README.md"), "# Assignment\n\nedited locally\n").unwrap();
    fs::write(repo.join("notes.txt"), "instructor notes\n").unwrap();
    fs::remove_dir_all(fixture.remote("alice")).unwrap();

    let (report, _) = run_batch(BatchKind::Pull, pull_protocols(&fixture)).await;

    assert_eq!(report.results, vec![OperationResult::failure("alice", "failed to pull")]);
    assert_eq!(
        fs::read_to_string(repo.join("README.md")).unwrap(),
        "# Assignment\n\nedited locally\n"
    );
    assert_eq!(
        fs::read_to_string(repo.join("notes.txt")).unwrap(),
        "instructor notes\n"
    );
    assert_eq!(git(&repo, &["stash", "list"]).unwrap(), "");
}
