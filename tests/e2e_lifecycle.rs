mod common;
use common::cli::{BugWorkspace, run_bug, run_bug_with_env};
use std::fs;

#[test]
fn create_list_show_close() {
    let workspace = BugWorkspace::new();

    let created = run_bug(&workspace, ["create", "-n", "Crash", "on", "start"]);
    assert!(created.status.success(), "create failed: {}", created.stderr);
    assert_eq!(created.stdout.trim(), "Created issue: Crash on start");
    assert!(workspace.issue_dir("Crash-on-start").join("Description").is_file());

    run_bug(&workspace, ["create", "-n", "Another bug"]);

    let list = run_bug(&workspace, ["list"]);
    assert!(list.status.success(), "list failed: {}", list.stderr);
    assert_eq!(list.stdout, "Issue 1: Another bug\nIssue 2: Crash on start\n");

    let show = run_bug(&workspace, ["view", "2"]);
    assert!(show.status.success());
    assert!(show.stdout.starts_with("Title: Crash on start\n"), "{}", show.stdout);

    let close = run_bug(&workspace, ["rm", "1"]);
    assert!(close.status.success(), "close failed: {}", close.stderr);
    assert!(close.stdout.contains("Closed issue: Another bug"));
    assert!(!workspace.issue_dir("Another-bug").exists());

    let list = run_bug(&workspace, ["list"]);
    assert_eq!(list.stdout, "Issue 1: Crash on start\n");
}

#[test]
fn create_with_fields_and_generated_id() {
    let workspace = BugWorkspace::new();
    let created = run_bug(
        &workspace,
        [
            "create", "-n", "--tag", "ui", "--status", "open", "--priority", "high",
            "--milestone", "v1", "--generate-id", "Layout", "breaks",
        ],
    );
    assert!(created.status.success(), "create failed: {}", created.stderr);

    let dir = workspace.issue_dir("Layout-breaks");
    assert_eq!(fs::read_to_string(dir.join("Status")).unwrap(), "open\n");
    assert_eq!(fs::read_to_string(dir.join("Priority")).unwrap(), "high\n");
    assert_eq!(fs::read_to_string(dir.join("Milestone")).unwrap(), "v1\n");
    assert!(dir.join("tags").join("ui").is_file());

    let id = fs::read_to_string(dir.join("Identifier")).unwrap();
    assert_eq!(id.trim().len(), 7);

    let list = run_bug(&workspace, ["list"]);
    assert_eq!(list.stdout, format!("Issue {}: Layout breaks\n", id.trim()));
}

#[test]
fn create_uses_description_template() {
    let workspace = BugWorkspace::new();
    workspace.write("template.md", "## Steps\n");
    workspace.write(".bug.yml", "default_description_file: template.md\n");

    let created = run_bug(&workspace, ["create", "-n", "Templated"]);
    assert!(created.status.success(), "create failed: {}", created.stderr);
    let body = fs::read_to_string(workspace.issue_dir("Templated").join("Description")).unwrap();
    assert_eq!(body, "## Steps\n");
}

#[test]
fn create_runs_editor() {
    let workspace = BugWorkspace::new();
    let created = run_bug(&workspace, ["create", "Edited"]);
    assert!(created.status.success(), "create failed: {}", created.stderr);

    let failed = run_bug_with_env(&workspace, ["create", "Broken editor"], [("EDITOR", "false")]);
    assert!(!failed.status.success());
    assert!(failed.stderr.contains("exited with"), "{}", failed.stderr);
}

#[test]
fn duplicate_title_is_rejected() {
    let workspace = BugWorkspace::new();
    run_bug(&workspace, ["create", "-n", "Same"]);
    let again = run_bug(&workspace, ["create", "-n", "Same"]);
    assert_eq!(again.code(), Some(1));
    assert!(again.stderr.contains("Error:"), "{}", again.stderr);
}

#[test]
fn field_commands() {
    let workspace = BugWorkspace::new();
    run_bug(&workspace, ["create", "-n", "Field test"]);

    let unset = run_bug(&workspace, ["status", "1"]);
    assert_eq!(unset.stdout.trim(), "No status set");

    let set = run_bug(&workspace, ["status", "1", "in", "progress"]);
    assert_eq!(set.stdout.trim(), "in progress");

    let id = run_bug(&workspace, ["id", "1", "GH-12"]);
    assert_eq!(id.stdout.trim(), "GH-12");

    // Resolvable by identifier now
    let priority = run_bug(&workspace, ["priority", "GH-12", "low"]);
    assert_eq!(priority.stdout.trim(), "low");

    let cleared = run_bug(&workspace, ["status", "--clear", "GH"]);
    assert_eq!(cleared.stdout.trim(), "No status set");
    assert!(!workspace.issue_dir("Field-test").join("Status").exists());

    let json = run_bug(&workspace, ["--json", "priority", "1"]).json();
    assert_eq!(json["value"], "low");
    assert_eq!(json["field"], "priority");
}

#[test]
fn relabel_renames_directory() {
    let workspace = BugWorkspace::new();
    run_bug(&workspace, ["create", "-n", "Old name"]);
    let moved = run_bug(&workspace, ["mv", "1", "New", "name"]);
    assert!(moved.status.success(), "relabel failed: {}", moved.stderr);
    assert!(workspace.issue_dir("New-name").is_dir());
    assert!(!workspace.issue_dir("Old-name").exists());
}

#[test]
fn find_and_roadmap() {
    let workspace = BugWorkspace::new();
    run_bug(&workspace, ["create", "-n", "--milestone", "v2", "--status", "open", "Alpha"]);
    run_bug(&workspace, ["create", "-n", "--milestone", "v1", "Beta"]);
    run_bug(&workspace, ["create", "-n", "--status", "closed", "Gamma"]);

    let found = run_bug(&workspace, ["find", "status", "OPEN"]);
    assert_eq!(found.stdout, "Issue 1: Alpha\n");

    let roadmap = run_bug(&workspace, ["roadmap"]);
    assert_eq!(
        roadmap.stdout,
        "# v1\n- Issue 2: Beta\n\n# v2\n- Issue 1: Alpha [open]\n\n# No milestone\n- Issue 3: Gamma [closed]\n"
    );
}

#[test]
fn unresolvable_token_exits_3() {
    let workspace = BugWorkspace::new();
    run_bug(&workspace, ["create", "-n", "Only"]);

    let miss = run_bug(&workspace, ["list", "nope"]);
    assert_eq!(miss.code(), Some(3));
    assert!(miss.stderr.contains("Not found nope"), "{}", miss.stderr);

    let out_of_range = run_bug(&workspace, ["close", "5"]);
    assert_eq!(out_of_range.code(), Some(3));
    assert!(workspace.issue_dir("Only").exists());
}

#[test]
fn missing_issues_directory_exits_2() {
    let workspace = BugWorkspace::bare();
    let run = run_bug(&workspace, ["list"]);
    assert_eq!(run.code(), Some(2));
    assert!(run.stderr.contains("Could not find issues directory"));
}

#[test]
fn pmit_points_at_issues_root() {
    let project = BugWorkspace::new();
    run_bug(&project, ["create", "-n", "Remote"]);
    let elsewhere = BugWorkspace::bare();

    let run = run_bug_with_env(&elsewhere, ["list"], [("PMIT", project.root.as_os_str())]);
    assert!(run.status.success(), "list failed: {}", run.stderr);
    assert_eq!(run.stdout, "Issue 1: Remote\n");

    let dir = run_bug_with_env(&elsewhere, ["pwd"], [("PMIT", project.root.as_os_str())]);
    assert_eq!(dir.stdout.trim(), project.issues().display().to_string());
}

#[test]
fn json_list_and_show() {
    let workspace = BugWorkspace::new();
    run_bug(&workspace, ["create", "-n", "--tag", "ui", "Json one"]);

    let list = run_bug(&workspace, ["list", "--json"]).json();
    assert_eq!(list[0]["position"], 1);
    assert_eq!(list[0]["title"], "Json one");
    assert_eq!(list[0]["directory"], "Json-one");
    assert_eq!(list[0]["tags"][0], "ui");

    let show = run_bug(&workspace, ["list", "--json", "1"]).json();
    assert_eq!(show[0]["description"], "");
}

#[test]
fn version_and_env() {
    let workspace = BugWorkspace::new();
    let version = run_bug(&workspace, ["version"]);
    assert!(version.stdout.starts_with("bug version "));

    let env = run_bug(&workspace, ["env"]);
    assert!(env.status.success(), "env failed: {}", env.stderr);
    assert!(env.stdout.contains("Editor: true"));
}
