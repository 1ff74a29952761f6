//! Parser for go.mod manifests.
//!
//! Only the `require` directives matter here: they tell us which
//! dependencies the module declares directly and which ones carry the
//! `// indirect` marker. The resulting classification drives the
//! seed-level link suppression in the graph builder.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::ParseResult;

/// Direct/indirect classification of a module's declared dependencies.
///
/// Keys are full `name@version` identifiers; the flag is `true` when the
/// manifest marks the requirement as `// indirect`.
///
/// # Example
///
/// ```
/// use modtree::parser::ManifestDeps;
///
/// let manifest = "require (\n\tgithub.com/a/b v1.0.0\n\tgolang.org/x/sys v0.5.0 // indirect\n)\n";
/// let deps: ManifestDeps = manifest.parse().unwrap();
///
/// assert!(deps.is_direct("github.com/a/b@v1.0.0"));
/// assert!(!deps.is_direct("golang.org/x/sys@v0.5.0"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManifestDeps {
    flags: HashMap<String, bool>,
}

impl ManifestDeps {
    /// Returns true if the manifest declares `identity` as a direct,
    /// non-indirect dependency.
    ///
    /// Identifiers the manifest does not mention at all are not direct.
    pub fn is_direct(&self, identity: &str) -> bool {
        matches!(self.flags.get(identity), Some(false))
    }

    /// Returns true if the manifest declares `identity` with the
    /// `// indirect` marker.
    pub fn is_indirect(&self, identity: &str) -> bool {
        matches!(self.flags.get(identity), Some(true))
    }

    /// Number of declared requirements.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no requirements were declared.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    fn insert(&mut self, name: &str, version: &str, indirect: bool) {
        self.flags.insert(format!("{name}@{version}"), indirect);
    }
}

impl std::str::FromStr for ManifestDeps {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_manifest(s))
    }
}

/// Parses a go.mod file from a file path.
pub fn parse_file(path: &Path) -> ParseResult<ManifestDeps> {
    let content = fs::read_to_string(path)?;
    Ok(parse_manifest(&content))
}

/// Extracts the require directives from go.mod content.
///
/// Handles both block form (`require ( ... )`) and single-line form
/// (`require name version`). Comment lines and every other directive
/// (module, go, replace, exclude) are ignored.
pub fn parse_manifest(content: &str) -> ManifestDeps {
    let mut deps = ManifestDeps::default();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if in_require_block {
            if line == ")" {
                in_require_block = false;
            } else {
                record_requirement(&mut deps, line);
            }
            continue;
        }

        match line.strip_prefix("require") {
            Some(rest) if rest.trim_start() == "(" => in_require_block = true,
            Some(rest) if rest.starts_with(char::is_whitespace) => {
                record_requirement(&mut deps, rest.trim_start());
            }
            _ => {}
        }
    }

    deps
}

fn record_requirement(deps: &mut ManifestDeps, line: &str) {
    let mut fields = line.split_whitespace();
    if let (Some(name), Some(version)) = (fields.next(), fields.next()) {
        let indirect = line.contains("// indirect");
        deps.insert(name, version, indirect);
    }
}
