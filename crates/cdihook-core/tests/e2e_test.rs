//! End-to-end tests for hook plan application.
//!
//! These tests drive the full pipeline against scratch root filesystems:
//! 1. Load a plan file from disk
//! 2. Create symlinks (including re-application on hot-plug)
//! 3. Merge linker search paths
//! 4. Rebuild the linker cache through a recording runner

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use cdihook_common::config::HookConfig;
use cdihook_common::error::ErrorKind;
use cdihook_core::exec::{CommandOutput, CommandRunner};
use cdihook_core::{HookApplier, apply_hooks_to_container};

#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<(PathBuf, Vec<OsString>)>>>,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<(PathBuf, Vec<OsString>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        Ok(CommandOutput {
            combined: String::new(),
            exit_code: Some(0),
        })
    }
}

fn applier(runner: &RecordingRunner) -> HookApplier {
    HookApplier::new(HookConfig {
        ldconfig: Some(PathBuf::from("/host/sbin/ldconfig")),
        ..HookConfig::default()
    })
    .with_runner(runner.clone())
}

fn write_plan(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join(HookConfig::default().hooks_file_name("gpu0"));
    std::fs::write(&path, body).expect("write plan");
    path
}

const GPU_PLAN: &str = r#"{
    "container_rootfs": "/var/lib/containers/c1/rootfs",
    "ld_cache_updates": ["/usr/lib/x"],
    "symlinks": [{"target": "/usr/lib/libfoo.so", "link": "/usr/lib/x/libfoo.so"}]
}"#;

#[test]
fn pipeline_applies_plan_to_empty_root() {
    let work = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(work.path(), GPU_PLAN);
    let runner = RecordingRunner::default();

    let report = applier(&runner).apply(&plan, root.path()).expect("apply");

    assert_eq!(report.symlinks_created, 1);
    assert_eq!(report.linker_entries_added, 1);
    assert!(report.cache_regenerated);

    let link = root.path().join("usr/lib/x/libfoo.so");
    let target = std::fs::read_link(&link).expect("readlink");
    assert_eq!(target, PathBuf::from("../libfoo.so"));

    let conf = root.path().join("etc/ld.so.conf.d/00-cdihook.conf");
    assert_eq!(std::fs::read_to_string(conf).expect("read conf"), "/usr/lib/x\n");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PathBuf::from("/host/sbin/ldconfig"));
    assert_eq!(
        calls[0].1,
        vec![OsString::from("-r"), root.path().as_os_str().to_owned()]
    );
}

#[test]
fn pipeline_reapplication_on_hotplug_is_idempotent() {
    let work = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(work.path(), GPU_PLAN);
    let runner = RecordingRunner::default();
    let applier = applier(&runner);

    let _ = applier.apply(&plan, root.path()).expect("first apply");
    std::fs::write(root.path().join("etc/ld.so.cache"), b"rebuilt").expect("fake cache");
    let second = applier.apply(&plan, root.path()).expect("second apply");

    assert_eq!(second.symlinks_created, 0);
    assert_eq!(second.linker_entries_added, 0);
    assert!(second.cache_regenerated);
    assert!(!root.path().join("etc/ld.so.cache").exists());
    assert_eq!(runner.calls().len(), 2);

    let conf = root.path().join("etc/ld.so.conf.d/00-cdihook.conf");
    assert_eq!(std::fs::read_to_string(conf).expect("read conf"), "/usr/lib/x\n");
}

#[test]
fn pipeline_merges_into_existing_fragment() {
    let work = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let conf_dir = root.path().join("etc/ld.so.conf.d");
    std::fs::create_dir_all(&conf_dir).expect("mkdir");
    std::fs::write(conf_dir.join("00-cdihook.conf"), "/opt/a/lib\n/opt/b/lib\n").expect("write");

    let plan = write_plan(
        work.path(),
        r#"{"ld_cache_updates": ["/opt/b/lib", "/opt/c/lib", "/opt/c/lib"], "symlinks": []}"#,
    );
    let runner = RecordingRunner::default();
    let report = applier(&runner).apply(&plan, root.path()).expect("apply");

    assert_eq!(report.linker_entries_added, 1);
    assert_eq!(
        std::fs::read_to_string(conf_dir.join("00-cdihook.conf")).expect("read"),
        "/opt/a/lib\n/opt/b/lib\n/opt/c/lib\n"
    );
}

#[test]
fn pipeline_surfaces_ldconfig_failure() {
    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, _program: &Path, _args: &[OsString]) -> std::io::Result<CommandOutput> {
            Ok(CommandOutput {
                combined: "ldconfig: /usr/lib/x: No such file or directory".into(),
                exit_code: Some(1),
            })
        }
    }

    let work = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(work.path(), GPU_PLAN);
    let applier = HookApplier::new(HookConfig {
        ldconfig: Some(PathBuf::from("/host/sbin/ldconfig")),
        ..HookConfig::default()
    })
    .with_runner(FailingRunner);

    let err = applier.apply(&plan, root.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Subprocess);
    assert!(err.to_string().contains("No such file or directory"));
    // Earlier stages are not rolled back.
    assert!(root.path().join("usr/lib/x/libfoo.so").is_symlink());
}

#[test]
fn pipeline_without_linker_updates_needs_no_ldconfig() {
    let work = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(
        work.path(),
        r#"{"container_rootfs": "", "ld_cache_updates": [], "symlinks": [
            {"target": "/usr/bin/nvidia-smi", "link": "/usr/local/bin/nvidia-smi"},
            {"target": "libcuda.so.1", "link": "/usr/lib/libcuda.so"}
        ]}"#,
    );

    apply_hooks_to_container(&plan, root.path()).expect("apply");
    apply_hooks_to_container(&plan, root.path()).expect("reapply");

    assert_eq!(
        std::fs::read_link(root.path().join("usr/local/bin/nvidia-smi")).expect("readlink"),
        PathBuf::from("../../bin/nvidia-smi")
    );
    assert_eq!(
        std::fs::read_link(root.path().join("usr/lib/libcuda.so")).expect("readlink"),
        PathBuf::from("libcuda.so.1")
    );
    assert!(!root.path().join("etc").exists());
}

#[test]
fn pipeline_rejects_missing_and_malformed_plans() {
    let work = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");

    let err = apply_hooks_to_container(&work.path().join("absent.json"), root.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let plan = write_plan(work.path(), r#"{"symlinks": {"target": "/a"}}"#);
    let err = apply_hooks_to_container(&plan, root.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(std::fs::read_dir(root.path()).expect("read_dir").count(), 0);
}
