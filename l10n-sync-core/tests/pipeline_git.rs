// Integration tests for l10n-sync-core
// These build throwaway git repositories in temp dirs and run the real
// process-backed pipeline against them: git for sync/push, `sh -c` as lint.

use std::fs;
use std::path::Path;
use std::process::Command;

use l10n_sync_core::config::{LintConfig, PipelineConfig};
use l10n_sync_core::report::recorded_hash;
use l10n_sync_core::{PipelineError, PublishDecision, Stage, SyncLintPublish};
use tempfile::TempDir;

fn git(args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=l10n test",
            "-c",
            "user.email=l10n@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn commit_file(repo: &Path, name: &str, content: &str) -> String {
    fs::write(repo.join(name), content).unwrap();
    let repo_str = repo.to_str().unwrap();
    git(&["-C", repo_str, "add", name]);
    git(&["-C", repo_str, "commit", "-m", name]);
    git(&["-C", repo_str, "rev-parse", "HEAD"])
}

struct Fixture {
    dir: TempDir,
    config: PipelineConfig,
}

impl Fixture {
    fn new(lint_script: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        git(&["init", source.to_str().unwrap()]);
        commit_file(&source, "messages.po", "msgid \"hello\"\n");

        let deploy = dir.path().join("deploy.git");
        git(&["init", "--bare", deploy.to_str().unwrap()]);

        let key = dir.path().join("deploy_key");
        fs::write(&key, "placeholder").unwrap();

        let config = PipelineConfig {
            working_copy_path: dir.path().join("work").join("locale"),
            status_report_path: dir.path().join("media").join("postatus.txt"),
            source_remote_url: source.display().to_string(),
            deployment_remote_url: deploy.display().to_string(),
            ssh_key_path: key.display().to_string(),
            lint: LintConfig {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), lint_script.to_string()],
                dir: dir.path().to_path_buf(),
            },
            list_home_before_push: false,
        };
        Fixture { dir, config }
    }

    fn source(&self) -> std::path::PathBuf {
        self.dir.path().join("source")
    }

    fn status(&self) -> String {
        fs::read_to_string(&self.config.status_report_path).unwrap()
    }
}

#[tokio::test]
async fn clone_then_pull_records_the_same_hash() {
    let fx = Fixture::new("echo 'OK: 0 issues'");
    let expected = git(&["-C", fx.source().to_str().unwrap(), "rev-parse", "HEAD"]);
    let pipeline = SyncLintPublish::from_config(fx.config.clone());

    let first = pipeline.run(false).await.expect("first run should clone");
    assert_eq!(first.commit_hash, expected);
    assert_eq!(first.stage, Stage::Skipped);
    assert_eq!(
        fx.status(),
        format!("l10n git hash: {expected}\n\nOK: 0 issues\n")
    );

    let second = pipeline.run(false).await.expect("second run should pull");
    assert_eq!(second.commit_hash, expected);
    assert_eq!(recorded_hash(&fx.status()), Some(expected.as_str()));
}

#[tokio::test]
async fn pull_picks_up_new_upstream_commits() {
    let fx = Fixture::new("echo 'OK: 0 issues'");
    let pipeline = SyncLintPublish::from_config(fx.config.clone());
    pipeline.run(false).await.expect("clone");

    let new_hash = commit_file(&fx.source(), "more.po", "msgid \"bye\"\n");
    let report = pipeline.run(false).await.expect("pull");

    assert_eq!(report.commit_hash, new_hash);
    assert!(fx.config.working_copy_path.join("more.po").is_file());
    assert!(fx.status().starts_with(&format!("l10n git hash: {new_hash}\n\n")));
}

#[tokio::test]
async fn failing_lint_leaves_output_and_skips_push() {
    let fx = Fixture::new("echo 'ERROR: missing string X'; exit 1");
    let pipeline = SyncLintPublish::from_config(fx.config.clone());

    let err = pipeline.run(true).await.unwrap_err();
    assert!(matches!(err, PipelineError::Lint(_)));
    assert_eq!(err.exit_code(), 1);

    let hash = git(&["-C", fx.source().to_str().unwrap(), "rev-parse", "HEAD"]);
    assert_eq!(
        fx.status(),
        format!("l10n git hash: {hash}\n\nERROR: missing string X\n")
    );

    let deploy = fx.config.deployment_remote_url.clone();
    let pushed = Command::new("git")
        .args([
            "--git-dir",
            deploy.as_str(),
            "cat-file",
            "-e",
            format!("{hash}^{{commit}}").as_str(),
        ])
        .status()
        .unwrap();
    assert!(!pushed.success(), "nothing should reach the deployment remote");
}

#[tokio::test]
async fn publish_pushes_the_linted_commit() {
    let fx = Fixture::new("echo 'OK: 0 issues'");
    let pipeline = SyncLintPublish::from_config(fx.config.clone());

    let report = pipeline.run(true).await.expect("run with push");
    assert_eq!(report.publish, PublishDecision::Publish);
    assert_eq!(report.stage, Stage::Published);

    let deploy = fx.config.deployment_remote_url.clone();
    git(&[
        "--git-dir",
        &deploy,
        "cat-file",
        "-e",
        &format!("{}^{{commit}}", report.commit_hash),
    ]);
}

#[tokio::test]
async fn unreachable_source_fails_and_keeps_previous_report() {
    let mut fx = Fixture::new("echo 'OK: 0 issues'");
    fx.config.source_remote_url = fx.dir.path().join("nope").display().to_string();
    fs::create_dir_all(fx.config.status_report_path.parent().unwrap()).unwrap();
    fs::write(&fx.config.status_report_path, "previous\n").unwrap();

    let err = SyncLintPublish::from_config(fx.config.clone())
        .run(false)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Sync(_)));
    assert_ne!(err.exit_code(), 0);
    assert_eq!(fx.status(), "previous\n");
}
