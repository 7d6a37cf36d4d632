// tests/common/mod.rs

//! Shared fixtures: a local git repository standing in for an upstream
//! source host.

use std::path::Path;
use std::process::Command;

pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git must be available for integration tests");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create an upstream repository with a tagged release.
///
/// The tree mimics a configure/make project: `config` records the
/// arguments it was called with, `mk` produces a static archive, and a
/// header ships in the tree.
pub fn upstream_repo(dir: &Path, tag: &str) {
    std::fs::create_dir_all(dir.join("include/fixture")).unwrap();
    std::fs::write(dir.join("include/fixture/fixture.h"), "#define FIXTURE 1\n").unwrap();
    std::fs::write(
        dir.join("config"),
        "#!/bin/sh\necho \"$@\" > configure-args.txt\n",
    )
    .unwrap();
    std::fs::write(dir.join("mk"), "#!/bin/sh\nprintf 'ar' > libfixture.a\n").unwrap();

    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "galley@example.com"]);
    git(dir, &["config", "user.name", "Galley"]);
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "release"]);
    git(dir, &["tag", tag]);
}

/// Recipe text pointing at a local upstream repository.
pub fn recipe_toml(upstream: &Path) -> String {
    format!(
        r#"
[package]
name = "fixture"
version = "1.2.3"
license = "MIT"
description = "fixture dependency"

[source]
git = "{}"
tag = "Fixture_%(version_)s"

[build]
configure = "sh ./config"
make = "sh ./mk"

[[artifacts]]
pattern = "*.h"
src = "include/fixture"
dst = "include/fixture"

[[artifacts]]
pattern = "*.a"
dst = "lib"
"#,
        upstream.display()
    )
}
