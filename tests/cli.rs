#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const ASSETS: [&str; 3] = ["texture.jpg", "viking_room.png", "viking_room.obj"];

fn setup() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let data = root.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::create_dir_all(root.join("script")).unwrap();
    fs::write(data.join("basic.vert"), "#version 450\n").unwrap();
    fs::write(data.join("basic.frag"), "#version 450\n").unwrap();
    for name in ASSETS {
        fs::write(data.join(name), format!("contents of {}", name)).unwrap();
    }
    (dir, root)
}

fn stand_in_compiler(root: &Path, body: &str) {
    let bin = root.join("sdk").join("bin");
    fs::create_dir_all(&bin).unwrap();
    let path = bin.join("glslc");
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn run(root: &Path, sdk: Option<&Path>, extra: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_data_builder"));
    cmd.arg("--anchor").arg(root.join("script")).args(extra);
    match sdk {
        Some(sdk) => cmd.env("VULKAN_SDK", sdk),
        None => cmd.env_remove("VULKAN_SDK"),
    };
    cmd.output().unwrap()
}

#[test]
fn missing_sdk_exits_without_touching_disk() {
    let (_dir, root) = setup();
    let log_dir = root.join("logs");

    let output = run(&root, None, &["--log-dir", log_dir.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please set the environment variable VULKAN_SDK"), "{}", stderr);
    assert!(!root.join("build").exists());
    assert!(!log_dir.exists());
}

#[test]
fn builds_shaders_and_copies_assets() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "echo \"compiled $1\"\ncp \"$1\" \"$3\"\n");

    let output = run(&root, Some(&root.join("sdk")), &[]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "compiled basic.vert\ncompiled basic.frag\n");
    let build = root.join("build");
    assert!(build.join("basic.vert").is_file());
    assert!(build.join("basic.frag").is_file());
    for name in ASSETS {
        assert_eq!(
            fs::read(build.join(name)).unwrap(),
            fs::read(root.join("data").join(name)).unwrap()
        );
    }
}

#[test]
fn rerun_over_populated_build_dir() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "cp \"$1\" \"$3\"\n");
    let sdk = root.join("sdk");

    assert!(run(&root, Some(&sdk), &[]).status.success());
    fs::write(root.join("build").join("texture.jpg"), b"edited").unwrap();
    assert!(run(&root, Some(&sdk), &[]).status.success());

    assert_eq!(fs::read(root.join("build").join("texture.jpg")).unwrap(), b"contents of texture.jpg");
}

#[test]
fn silent_compiler_failure_passes_with_compat_flag() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "exit 1\n");

    let output = run(&root, Some(&root.join("sdk")), &["--ignore-exit-status"]);

    assert!(output.status.success(), "{:?}", output);
    assert!(output.stdout.is_empty());
    assert!(root.join("build").join("viking_room.obj").is_file());
}

#[test]
fn compiler_failure_is_fatal_by_default() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "echo 'syntax error' >&2\nexit 1\n");

    let output = run(&root, Some(&root.join("sdk")), &[]);

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "syntax error\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Shader tool failed on basic.vert"), "{}", stderr);
    assert!(!stderr.contains("syntax error"), "{}", stderr);
    assert!(!root.join("build").join("texture.jpg").exists());
}

#[test]
fn manifest_replaces_task_lists() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "cp \"$1\" \"$3\"\n");
    let manifest = root.join("tasks.json");
    fs::write(
        &manifest,
        r#"{ "shaders": [{ "source": "basic.frag", "output": "frag.spv" }],
             "assets": [{ "source": "texture.jpg", "destination": "albedo.jpg" }] }"#,
    )
    .unwrap();

    let output = run(&root, Some(&root.join("sdk")), &["--manifest", manifest.to_str().unwrap()]);

    assert!(output.status.success(), "{:?}", output);
    let build = root.join("build");
    assert!(build.join("frag.spv").is_file());
    assert!(!build.join("basic.vert").exists());
    assert!(build.join("albedo.jpg").is_file());
    assert!(!build.join("viking_room.png").exists());
}

#[test]
fn relative_anchor_resolves_against_caller_directory() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "cp \"$1\" \"$3\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_data_builder"))
        .current_dir(&root)
        .args(["--anchor", "script"])
        .env("VULKAN_SDK", "sdk")
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let build = root.join("build");
    assert!(build.join("basic.vert").is_file());
    assert!(build.join("basic.frag").is_file());
    assert!(build.join("viking_room.obj").is_file());
}

#[test]
fn compiler_text_printed_verbatim() {
    let (_dir, root) = setup();
    stand_in_compiler(&root, "printf 'note: %s\\n\\n  \\n' \"$1\"\ncp \"$1\" \"$3\"\n");

    let output = run(&root, Some(&root.join("sdk")), &[]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "note: basic.vert\n\n  \nnote: basic.frag\n\n  \n"
    );
}
