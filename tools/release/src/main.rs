//! Bumps the crate version, records a CHANGELOG entry, tags and publishes.
//!
//! Run from the repository root: `cargo run -p release`.

use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use toml_edit::{DocumentMut, Item};

type BoxError = Box<dyn std::error::Error>;

const MANIFEST: &str = "Cargo.toml";
const CHANGELOG: &str = "CHANGELOG.md";

/// Splits `major.minor.patch` into its numeric parts
fn parse_version(version: &str) -> Result<(u64, u64, u64), BoxError> {
    let parts = version
        .split('.')
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid version '{}': {}", version, e))?;

    match parts.as_slice() {
        [major, minor, patch] => Ok((*major, *minor, *patch)),
        _ => Err(format!("Version '{}' must look like 1.2.3", version).into()),
    }
}

fn read_manifest() -> Result<DocumentMut, BoxError> {
    Ok(fs::read_to_string(MANIFEST)?.parse::<DocumentMut>()?)
}

fn current_version(doc: &DocumentMut) -> Result<String, BoxError> {
    doc.get("package")
        .and_then(|package| package.get("version"))
        .and_then(Item::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("No package.version in {}", MANIFEST).into())
}

fn write_version(mut doc: DocumentMut, version: &str) -> Result<(), BoxError> {
    doc["package"]["version"] = Item::from(version);
    fs::write(MANIFEST, doc.to_string())?;
    Ok(())
}

/// Captures stdout of a git invocation, trimmed
fn git_output(args: &[&str]) -> Result<Option<String>, BoxError> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8(output.stdout)?.trim().to_string()))
}

fn commits_since_last_tag() -> Result<String, BoxError> {
    let range = match git_output(&["describe", "--tags", "--abbrev=0"])? {
        Some(tag) if !tag.is_empty() => format!("{}..HEAD", tag),
        _ => "HEAD".to_string(),
    };
    Ok(git_output(&["log", "--pretty=format:- %s", &range])?.unwrap_or_default())
}

/// Inserts a dated section for `version` at the top of the changelog
fn prepend_changelog(path: &Path, version: &str, notes: &str) -> Result<(), BoxError> {
    let existing = fs::read_to_string(path).unwrap_or_default();
    let body = existing
        .strip_prefix("# Changelog\n")
        .unwrap_or(&existing)
        .trim_start();
    let entry = format!(
        "# Changelog\n\n## v{} - {}\n\n{}\n\n{}",
        version,
        Local::now().format("%Y-%m-%d"),
        if notes.is_empty() { "- No notable changes" } else { notes },
        body
    );
    fs::write(path, entry.trim_end().to_string() + "\n")?;
    Ok(())
}

fn prompt(message: &str) -> Result<String, io::Error> {
    print!("{} ", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn confirm(message: &str) -> Result<bool, io::Error> {
    Ok(prompt(&format!("{} (y/n):", message))?.eq_ignore_ascii_case("y"))
}

fn run(program: &str, args: &[&str]) -> Result<(), BoxError> {
    println!("Executing: {} {}", program, args.join(" "));
    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        return Err(format!("'{} {}' failed", program, args.join(" ")).into());
    }
    Ok(())
}

fn main() -> Result<(), BoxError> {
    let doc = read_manifest()?;
    let current = current_version(&doc)?;
    println!("Current version is: {}", current);

    let next = prompt("Enter new version:")?;
    if parse_version(&next)? <= parse_version(&current)? {
        return Err(format!("New version {} must be greater than {}", next, current).into());
    }

    let notes = commits_since_last_tag()?;
    println!("Release notes:\n{}", if notes.is_empty() { "(none)" } else { &notes });

    if !confirm(&format!("Ready to release version {}?", next))? {
        println!("Release aborted.");
        return Ok(());
    }

    write_version(doc, &next)?;
    prepend_changelog(Path::new(CHANGELOG), &next, &notes)?;
    // Refreshes Cargo.lock with the new version
    run("cargo", &["check", "--workspace"])?;

    let tag = format!("v{}", next);
    run("git", &["add", MANIFEST, "Cargo.lock", CHANGELOG])?;
    run("git", &["commit", "-m", &format!("Release {}", tag)])?;
    run("git", &["tag", "-a", &tag, "-m", &format!("Version {}", next)])?;
    run("git", &["push"])?;
    run("git", &["push", "--tags"])?;

    if confirm("Publish to crates.io?")? {
        run("cargo", &["publish", "-p", "sovran-any"])?;
    }

    if confirm("Create GitHub release?")? {
        run("gh", &["release", "create", &tag, "--title", &tag, "--notes", &notes])?;
    }

    println!("Successfully released version {}", next);
    Ok(())
}
