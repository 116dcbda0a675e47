use crate::action::{ActionRunner, ShellActionRunner, peer_stdin};
use crate::error::PeerFinderError;

fn peers() -> Vec<String> {
    vec![
        "web-0.web.ns1.svc.cluster.local".to_string(),
        "web-1.web.ns1.svc.cluster.local".to_string(),
    ]
}

#[test]
fn test_stdin_is_one_peer_per_line() {
    assert_eq!(
        peer_stdin(&peers()),
        "web-0.web.ns1.svc.cluster.local\nweb-1.web.ns1.svc.cluster.local\n"
    );
}

#[tokio::test]
async fn test_hook_receives_peers_on_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("peers.txt");
    let script = format!("cat > {}", out.display());

    let output = ShellActionRunner::default().run(&peers(), &script).await.unwrap();

    assert_eq!(output, "");
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, peer_stdin(&peers()));
}

#[tokio::test]
async fn test_output_combines_stdout_and_stderr_in_order() {
    let output = ShellActionRunner::default()
        .run(&peers(), "echo out; echo err >&2; echo done")
        .await
        .unwrap();

    assert_eq!(output, "out\nerr\ndone\n");
}

#[tokio::test]
async fn test_hook_may_ignore_stdin() {
    assert!(ShellActionRunner::default().run(&peers(), "true").await.is_ok());
}

#[tokio::test]
async fn test_script_file_with_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let hook = dir.path().join("hook.sh");
    std::fs::write(&hook, "#!/bin/sh\nread first\necho \"$1 $first\"\n").unwrap();

    let script = format!("sh {} joined", hook.display());
    let output = ShellActionRunner::default().run(&peers(), &script).await.unwrap();

    assert_eq!(output, "joined web-0.web.ns1.svc.cluster.local\n");
}

#[tokio::test]
async fn test_non_zero_exit_is_an_error_with_output() {
    let err = ShellActionRunner::default()
        .run(&peers(), "echo boom; exit 3")
        .await
        .unwrap_err();

    match err {
        PeerFinderError::ActionFailed { script, status, output } => {
            assert_eq!(script, "echo boom; exit 3");
            assert_eq!(status.code(), Some(3));
            assert_eq!(output, "boom\n");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_shell_is_a_spawn_error() {
    let err = ShellActionRunner::new("/nonexistent/shell")
        .run(&peers(), "true")
        .await
        .unwrap_err();

    assert!(matches!(err, PeerFinderError::ActionSpawn { .. }));
}
