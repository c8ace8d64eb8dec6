//! End-to-end runs of the `kiln` binary against fake shader compilers.
//!
//! The fake compilers are shell scripts, so these tests only run on unix.

#![cfg(unix)]

use std::fs::File;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, SystemTime};

use kiln_cache::DependencyManifest;

/// Fake `slangc`: writes whatever follows `-o`, prints an include note for
/// every `// include: <path>` line of the source in listing mode, logs real
/// compiles, and fails on sources containing `FAIL`. Like the real
/// compilers, both fakes chatter on stdout.
const FAKE_SLANGC: &str = r#"#!/bin/sh
src="$1"
out=""
listing=0
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  if [ "$arg" = "-output-includes" ]; then listing=1; fi
  prev="$arg"
done
if [ "$listing" = 1 ]; then
  sed -n "s|^// include: \(.*\)$|(0): note: include '\1'|p" "$src" >&2
else
  echo "$*" >> "@LOG@"
fi
echo "slangc: $src"
echo spirv > "$out"
if grep -q FAIL "$src"; then exit 1; fi
exit 0
"#;

/// Fake `glslangValidator`: the source is the argument before `-o`.
const FAKE_GLSLANG: &str = r#"#!/bin/sh
src=""
out=""
prev=""
for arg in "$@"; do
  if [ "$arg" = "-o" ]; then src="$prev"; fi
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  prev="$arg"
done
echo "$*" >> "@LOG@"
echo "$src"
echo spirv > "$out"
if grep -q FAIL "$src"; then exit 1; fi
exit 0
"#;

struct Project {
    _dir: tempfile::TempDir,
    root: PathBuf,
    input: PathBuf,
    output: PathBuf,
    config: PathBuf,
    slang_log: PathBuf,
    glsl_log: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let input = root.join("shaders");
        let output = root.join("build");
        let tools = root.join("tools");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::create_dir_all(&tools).unwrap();

        let slang_log = root.join("slangc.log");
        let glsl_log = root.join("glslang.log");
        let slangc = tools.join("slangc");
        let glslang = tools.join("glslangValidator");
        write_script(&slangc, &FAKE_SLANGC.replace("@LOG@", &slang_log.to_string_lossy()));
        write_script(&glslang, &FAKE_GLSLANG.replace("@LOG@", &glsl_log.to_string_lossy()));

        let config = root.join("kiln.toml");
        std::fs::write(
            &config,
            format!(
                "[toolkit]\nslangc = \"{}\"\nglslang = \"{}\"\n",
                slangc.display(),
                glslang.display()
            ),
        )
        .unwrap();

        Self {
            _dir: dir,
            root,
            input,
            output,
            config,
            slang_log,
            glsl_log,
        }
    }

    /// Writes a source file with an old, pinned modification time.
    fn source(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.input.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        set_mtime(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000));
        path
    }

    fn kiln(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_kiln"))
            .arg("--config")
            .arg(&self.config)
            .arg("--format")
            .arg("json")
            .args(extra)
            .arg(&self.input)
            .arg(&self.output)
            .env_remove("VULKAN_SDK")
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn build(&self) -> (i32, serde_json::Value) {
        let output = self.kiln(&[]);
        let summary = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "bad summary ({e}); stderr:\n{}",
                String::from_utf8_lossy(&output.stderr)
            )
        });
        (output.status.code().unwrap(), summary)
    }

    fn compile_count(&self) -> usize {
        [&self.slang_log, &self.glsl_log]
            .iter()
            .map(|log| {
                std::fs::read_to_string(log)
                    .map(|s| s.lines().count())
                    .unwrap_or(0)
            })
            .sum()
    }
}

fn write_script(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

#[test]
fn material_expands_into_every_pass() {
    let project = Project::new();
    let lights = project.source("shared/lights.slang", "");
    project.source(
        "materials/brick.slang",
        &format!("// include: {}\n", lights.display()),
    );

    let (code, summary) = project.build();
    assert_eq!(code, 0);
    // 20 material variants plus lights.slang's own artifact.
    assert_eq!(summary["launched"], 21);
    assert_eq!(summary["succeeded"], 21);
    assert_eq!(summary["sources"]["material"], 1);
    assert_eq!(summary["sources"]["generic"], 1);

    let materials = project.output.join("materials");
    for name in [
        "brick_shadow.vert.spv",
        "brick_gbuffer_masked.frag.spv",
        "brick_gi.closesthit.spv",
        "brick_gi_masked.anyhit.spv",
    ] {
        assert!(materials.join(name).is_file(), "missing {name}");
    }

    let manifest = DependencyManifest::load(&materials.join("brick_gbuffer.vert.spv"))
        .unwrap()
        .expect("manifest written");
    assert_eq!(manifest.len(), 1);
    assert!(manifest.contains(&lights));

    let log = std::fs::read_to_string(&project.slang_log).unwrap();
    assert!(log.contains("-D SAH_RT=1 -D SAH_RT_GI=1 -D SAH_MASKED=1"));
    assert!(log.contains(&format!("-I {}", project.input.display())));
    assert!(log.contains(&format!("-I {}", project.root.display())));
}

#[test]
fn second_build_without_changes_compiles_nothing() {
    let project = Project::new();
    project.source("materials/brick.slang", "");
    project.source("post/tonemap.slang", "");
    project.source("fog.vert", "");

    let (code, first) = project.build();
    assert_eq!(code, 0);
    assert_eq!(first["launched"], 22);
    let compiles = project.compile_count();
    assert_eq!(compiles, 22);

    let (code, second) = project.build();
    assert_eq!(code, 0);
    assert_eq!(second["launched"], 0);
    assert_eq!(second["skipped"], 22);
    assert_eq!(project.compile_count(), compiles);
}

#[test]
fn touching_a_dependency_rebuilds_only_its_dependents() {
    let project = Project::new();
    let lights = project.source("shared/lights.slang", "");
    project.source(
        "materials/brick.slang",
        &format!("// include: {}\n", lights.display()),
    );
    project.source("blit.slang", "");

    let (_, first) = project.build();
    // brick (20) + blit (1) + lights itself (1)
    assert_eq!(first["launched"], 22);

    set_mtime(&lights, SystemTime::now());
    let (code, second) = project.build();
    assert_eq!(code, 0);
    // brick's variants and lights.slang's own artifact.
    assert_eq!(second["launched"], 21);
    assert_eq!(second["skipped"], 1);
}

#[test]
fn deleted_dependency_forces_rebuild() {
    let project = Project::new();
    let extra = project.root.join("extra.slang");
    std::fs::write(&extra, "").unwrap();
    set_mtime(&extra, SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000));
    project.source("blit.slang", &format!("// include: {}\n", extra.display()));

    project.build();
    std::fs::remove_file(&extra).unwrap();
    let (_, second) = project.build();
    assert_eq!(second["launched"], 1);
}

#[test]
fn legacy_glsl_uses_its_own_compiler_without_manifest() {
    let project = Project::new();
    project.source("fog.vert", "");

    let (code, summary) = project.build();
    assert_eq!(code, 0);
    assert_eq!(summary["sources"]["legacy_raster"], 1);
    assert_eq!(summary["launched"], 1);

    let artifact = project.output.join("fog.vert.spv");
    assert!(artifact.is_file());
    assert!(DependencyManifest::load(&artifact).unwrap().is_none());

    let log = std::fs::read_to_string(&project.glsl_log).unwrap();
    assert!(log.starts_with("--target-env vulkan1.3 -V -g -Od"));
    assert!(!log.contains("-D"));
    assert!(!project.slang_log.exists());
}

#[test]
fn compiler_stdout_stays_out_of_json_summary() {
    let project = Project::new();
    let fog = project.source("fog.vert", "");
    project.source("blit.slang", "");

    let output = project.kiln(&[]);
    assert_eq!(output.status.code(), Some(0));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not a JSON summary ({e}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    });
    assert_eq!(summary["launched"], 2);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&fog.display().to_string()));
    assert!(stderr.contains("slangc: "));
}

#[test]
fn output_tree_mirrors_input_tree() {
    let project = Project::new();
    project.source("a/b/c.slang", "");
    project.source("a/b/notes.txt", "");

    let (code, summary) = project.build();
    assert_eq!(code, 0);
    assert_eq!(summary["ignored"], 1);
    assert!(project.output.join("a/b/c.spv").is_file());
    assert!(!project.output.join("c.spv").exists());
}

#[test]
fn failed_compile_exits_nonzero_and_leaves_no_artifact() {
    let project = Project::new();
    project.source("broken.slang", "FAIL\n");
    project.source("fine.slang", "");

    let (code, summary) = project.build();
    assert_eq!(code, 1);
    assert_eq!(summary["succeeded"], 1);
    let failed = summary["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 1);
    assert!(failed[0]["artifact"]
        .as_str()
        .unwrap()
        .ends_with("broken.spv"));
    assert!(!project.output.join("broken.spv").exists());
    assert!(project.output.join("fine.spv").is_file());

    // The failed artifact is retried on the next run.
    let (code, second) = project.build();
    assert_eq!(code, 1);
    assert_eq!(second["launched"], 1);
}

#[test]
fn dry_run_lists_without_compiling() {
    let project = Project::new();
    project.source("sky_unified.slang", "");
    project.source("materials/brick.slang", "");

    let output = project.kiln(&["--dry-run"]);
    assert_eq!(output.status.code(), Some(0));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["stale"], 3 + 20);
    assert_eq!(summary["launched"], 0);
    assert_eq!(project.compile_count(), 0);
    assert!(!project.output.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sky_unified.frag.spv"));
}

#[test]
fn missing_toolkit_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shaders");
    std::fs::create_dir_all(&input).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_kiln"))
        .arg(&input)
        .arg(dir.path().join("build"))
        .env_remove("VULKAN_SDK")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: VULKAN_SDK is not set"));
}

#[test]
fn too_few_arguments_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_kiln"))
        .arg("shaders")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}
