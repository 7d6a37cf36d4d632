// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use std::path::Path;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::Parse(format!("invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Parse(format!("failed to read recipe file {}: {}", path.display(), e)))?;

    parse_recipe(&content)
}

/// Validate a recipe for completeness and correctness
///
/// Hard errors fail the build before anything is fetched; soft issues
/// come back as warnings.
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::Parse("recipe package name cannot be empty".to_string()));
    }
    if recipe.package.version.is_empty() {
        return Err(Error::Parse("recipe package version cannot be empty".to_string()));
    }
    if recipe.source.git.is_empty() {
        return Err(Error::Parse("recipe source git URL cannot be empty".to_string()));
    }
    if recipe.source.tag.is_empty() {
        return Err(Error::Parse("recipe source tag cannot be empty".to_string()));
    }
    if recipe.artifacts.is_empty() {
        return Err(Error::Parse(
            "recipe stages no artifacts: at least one [[artifacts]] rule is required".to_string(),
        ));
    }
    for rule in &recipe.artifacts {
        if rule.pattern.is_empty() || rule.dst.is_empty() {
            return Err(Error::Parse(
                "artifact rule needs a non-empty pattern and dst".to_string(),
            ));
        }
    }
    if recipe.build.jobs == Some(0) {
        return Err(Error::Parse("build jobs must be at least 1".to_string()));
    }

    // The tag is derived from the version; a template without a version
    // variable silently breaks that invariant.
    if !recipe.source.tag.contains("%(version") {
        warnings.push(format!(
            "tag template {} does not depend on the package version",
            recipe.source.tag
        ));
    }
    if recipe.package.license.is_none() {
        warnings.push("missing package license".to_string());
    }
    if recipe.package.description.is_none() && recipe.package.summary.is_none() {
        warnings.push("missing package description".to_string());
    }

    Ok(warnings)
}
