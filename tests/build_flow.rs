// tests/build_flow.rs

//! End-to-end pipeline tests against a local upstream repository.

mod common;

use galley::recipe::parse_recipe;
use galley::{Error, Galley, GalleyConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn engine_with_workdir(workdir: &Path) -> Galley {
    Galley::new(GalleyConfig {
        workdir: Some(workdir.to_path_buf()),
        ..Default::default()
    })
}

/// Relative paths of every file under `root`, sorted.
fn layout(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[test]
fn build_stages_package_layout() {
    let upstream = TempDir::new().unwrap();
    common::upstream_repo(upstream.path(), "Fixture_1_2_3");
    let recipe = parse_recipe(&common::recipe_toml(upstream.path())).unwrap();

    let work = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let report = engine_with_workdir(work.path())
        .build(&recipe, out.path())
        .unwrap();

    assert!(out.path().join("include/fixture/fixture.h").is_file());
    assert!(out.path().join("lib/libfixture.a").is_file());
    assert_eq!(report.staged.len(), 2);
    assert!(report.log.contains("=== configure ==="));
    assert!(report.log.contains("=== make ==="));

    // threading defaults to off, so configure saw no-threads and the
    // prefix was bound to the package directory
    let args =
        std::fs::read_to_string(work.path().join("fixture/configure-args.txt")).unwrap();
    assert!(args.contains("--prefix="));
    assert!(args.contains("no-threads"));
}

#[test]
fn threads_option_drops_no_threads_flag() {
    let upstream = TempDir::new().unwrap();
    common::upstream_repo(upstream.path(), "Fixture_1_2_3");
    let mut recipe = parse_recipe(&common::recipe_toml(upstream.path())).unwrap();
    recipe.options.threads = true;

    let work = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    engine_with_workdir(work.path())
        .build(&recipe, out.path())
        .unwrap();

    let args =
        std::fs::read_to_string(work.path().join("fixture/configure-args.txt")).unwrap();
    assert!(!args.contains("no-threads"));
}

#[test]
fn deploy_mirrors_package_layout() {
    let upstream = TempDir::new().unwrap();
    common::upstream_repo(upstream.path(), "Fixture_1_2_3");
    let recipe = parse_recipe(&common::recipe_toml(upstream.path())).unwrap();

    let work = TempDir::new().unwrap();
    let pkg = TempDir::new().unwrap();
    let engine = engine_with_workdir(work.path());
    engine.build(&recipe, pkg.path()).unwrap();

    let dep = TempDir::new().unwrap();
    engine.deploy(&recipe, dep.path()).unwrap();

    assert_eq!(layout(pkg.path()), layout(dep.path()));
}

#[test]
fn rebuild_reuses_checkout_and_branch() {
    let upstream = TempDir::new().unwrap();
    common::upstream_repo(upstream.path(), "Fixture_1_2_3");
    let recipe = parse_recipe(&common::recipe_toml(upstream.path())).unwrap();

    let work = TempDir::new().unwrap();
    let engine = engine_with_workdir(work.path());

    let out1 = TempDir::new().unwrap();
    engine.build(&recipe, out1.path()).unwrap();

    // the second run hits the existing clone and the already-created
    // local branch, and must not fail trying to recreate either
    let out2 = TempDir::new().unwrap();
    engine.build(&recipe, out2.path()).unwrap();

    assert!(out2.path().join("lib/libfixture.a").is_file());
}

#[test]
fn missing_tag_is_fatal() {
    let upstream = TempDir::new().unwrap();
    common::upstream_repo(upstream.path(), "Fixture_1_2_3");
    let mut recipe = parse_recipe(&common::recipe_toml(upstream.path())).unwrap();
    recipe.package.version = "9.9.9".to_string();

    let work = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let result = engine_with_workdir(work.path()).build(&recipe, out.path());

    match result {
        Err(Error::TagNotFound(tag)) => assert_eq!(tag, "Fixture_9_9_9"),
        other => panic!("expected missing-tag failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn failing_build_step_is_fatal() {
    let upstream = TempDir::new().unwrap();
    common::upstream_repo(upstream.path(), "Fixture_1_2_3");
    let mut recipe = parse_recipe(&common::recipe_toml(upstream.path())).unwrap();
    recipe.build.make = "false".to_string();

    let work = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let result = engine_with_workdir(work.path()).build(&recipe, out.path());

    assert!(matches!(result, Err(Error::Phase { .. })));
}
