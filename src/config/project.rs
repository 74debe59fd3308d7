use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::span::Span;

pub const CONFIG_FILE: &str = "conditionals.toml";

/// Project configuration from conditionals.toml.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub name: String,
    pub root_dir: PathBuf,
    /// Where sources are read from, resolved against `root_dir`.
    pub source_dir: PathBuf,
    /// Where transformed files are written, resolved against `root_dir`.
    pub out_dir: PathBuf,
    /// File extensions, without the dot, that hold markup.
    pub extensions: Vec<String>,
    /// Write a `.map` file next to each output.
    pub source_maps: bool,
}

/// Parse a minimal TOML string array: `["a", "b", "c"]` → `vec!["a", "b", "c"]`.
fn parse_string_array(s: &str) -> Option<Vec<String>> {
    let s = s.trim();
    if !s.starts_with('[') || !s.ends_with(']') {
        return None;
    }
    let inner = &s[1..s.len() - 1];
    Some(
        inner
            .split(',')
            .map(|part| part.trim().trim_matches('"').to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn default_extensions() -> Vec<String> {
    vec!["jsx".to_string(), "tsx".to_string()]
}

impl Project {
    /// Defaults for a project rooted at `root_dir`.
    pub fn with_defaults(name: &str, root_dir: &Path) -> Project {
        Project {
            name: name.to_string(),
            root_dir: root_dir.to_path_buf(),
            source_dir: root_dir.join("src"),
            out_dir: root_dir.join("dist"),
            extensions: default_extensions(),
            source_maps: true,
        }
    }

    /// Load project from a conditionals.toml file.
    pub fn load(toml_path: &Path) -> Result<Project, Diagnostic> {
        let content = std::fs::read_to_string(toml_path).map_err(|e| {
            Diagnostic::error(
                format!("cannot read '{}': {}", toml_path.display(), e),
                Span::dummy(),
            )
        })?;
        let root_dir = toml_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::parse(&content, &root_dir)
    }

    /// Section-aware minimal TOML reading. Unknown keys are ignored, as are
    /// values of the wrong shape.
    pub fn parse(content: &str, root_dir: &Path) -> Result<Project, Diagnostic> {
        let mut name = String::new();
        let mut source_dir = "src".to_string();
        let mut out_dir = "dist".to_string();
        let mut extensions = default_extensions();
        let mut source_maps = true;
        let mut current_section = String::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                current_section = trimmed[1..trimmed.len() - 1].trim().to_string();
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                continue;
            };
            let key = key.trim().trim_matches('"');
            let value = value.trim();

            match (current_section.as_str(), key) {
                ("project", "name") => name = value.trim_matches('"').to_string(),
                ("project", "source_dir") => source_dir = value.trim_matches('"').to_string(),
                ("project", "out_dir") => out_dir = value.trim_matches('"').to_string(),
                ("project", "extensions") => {
                    if let Some(list) = parse_string_array(value) {
                        extensions = list
                            .into_iter()
                            .map(|ext| ext.trim_start_matches('.').to_string())
                            .collect();
                    }
                }
                ("transform", "source_maps") => {
                    if let Some(flag) = parse_bool(value) {
                        source_maps = flag;
                    }
                }
                _ => {}
            }
        }

        if name.is_empty() {
            return Err(Diagnostic::error(
                format!("missing 'name' in {}", CONFIG_FILE),
                Span::dummy(),
            ));
        }

        Ok(Project {
            name,
            root_dir: root_dir.to_path_buf(),
            source_dir: root_dir.join(source_dir),
            out_dir: root_dir.join(out_dir),
            extensions,
            source_maps,
        })
    }

    /// Try to find a conditionals.toml in the given directory or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|want| want == e))
    }

    /// Every source file under `source_dir`, sorted.
    pub fn source_files(&self) -> Vec<PathBuf> {
        let mut result = Vec::new();
        collect_files_recursive(&self.source_dir, &|p| self.accepts(p), &mut result);
        result.sort();
        result
    }

    /// Where the output for `source` goes: the same relative path under
    /// `out_dir`. Files outside `source_dir` land directly in `out_dir`.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        match source.strip_prefix(&self.source_dir) {
            Ok(relative) => self.out_dir.join(relative),
            Err(_) => self
                .out_dir
                .join(source.file_name().unwrap_or(source.as_os_str())),
        }
    }
}

fn collect_files_recursive(dir: &Path, accept: &dyn Fn(&Path) -> bool, result: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if name_str.starts_with('.') || name_str == "node_modules" {
            continue;
        }

        if path.is_dir() {
            collect_files_recursive(&path, accept, result);
        } else if accept(&path) {
            result.push(path);
        }
    }
}

/// The conditionals.toml `init` writes.
pub fn default_config(name: &str) -> String {
    format!(
        "[project]\nname = \"{}\"\nsource_dir = \"src\"\nout_dir = \"dist\"\nextensions = [\"jsx\", \"tsx\"]\n\n[transform]\nsource_maps = true\n",
        name
    )
}

/// A starter component using every pseudo-element.
pub fn sample_component() -> &'static str {
    r#"import { If, ElseIf, Else } from "jsx-conditionals";

export default <main>
  <If condition={user.admin}>
    <AdminPanel />
  </If>
  <ElseIf condition={user.signedIn}>
    <Dashboard />
  </ElseIf>
  <Else>
    <SignIn />
  </Else>
</main>;
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_project() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join(CONFIG_FILE);
        fs::write(
            &toml_path,
            r#"[project]
name = "storefront"
source_dir = "app"
out_dir = "build"
extensions = ["jsx", ".js"]

[transform]
source_maps = false
"#,
        )
        .unwrap();

        let project = Project::load(&toml_path).unwrap();
        assert_eq!(project.name, "storefront");
        assert_eq!(project.source_dir, dir.path().join("app"));
        assert_eq!(project.out_dir, dir.path().join("build"));
        assert_eq!(project.extensions, vec!["jsx", "js"]);
        assert!(!project.source_maps);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let root = Path::new("/work");
        let project = Project::parse("[project]\nname = \"app\"\n", root).unwrap();
        assert_eq!(project, Project::with_defaults("app", root));
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let content = "[project]\nname = \"app\"\nextensions = jsx\n\n[transform]\nsource_maps = yes\n";
        let project = Project::parse(content, Path::new(".")).unwrap();
        assert_eq!(project.extensions, vec!["jsx", "tsx"]);
        assert!(project.source_maps);
    }

    #[test]
    fn test_keys_are_section_scoped() {
        let content = "name = \"stray\"\n[transform]\nname = \"wrong\"\n[project]\nname = \"right\"\n";
        let project = Project::parse(content, Path::new(".")).unwrap();
        assert_eq!(project.name, "right");
    }

    #[test]
    fn test_missing_name() {
        let err = Project::parse("[transform]\nsource_maps = true\n", Path::new(".")).unwrap_err();
        assert_eq!(err.message, "missing 'name' in conditionals.toml");
    }

    #[test]
    fn test_find_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("components");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), default_config("app")).unwrap();
        assert_eq!(Project::find(&nested), Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_source_files_and_output_paths() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::with_defaults("app", dir.path());
        fs::create_dir_all(project.source_dir.join("pages")).unwrap();
        fs::create_dir_all(project.source_dir.join(".cache")).unwrap();
        fs::write(project.source_dir.join("b.tsx"), "").unwrap();
        fs::write(project.source_dir.join("pages").join("a.jsx"), "").unwrap();
        fs::write(project.source_dir.join("notes.md"), "").unwrap();
        fs::write(project.source_dir.join(".cache").join("c.jsx"), "").unwrap();

        let files = project.source_files();
        assert_eq!(
            files,
            vec![
                project.source_dir.join("b.tsx"),
                project.source_dir.join("pages").join("a.jsx"),
            ]
        );
        assert_eq!(
            project.output_path(&files[1]),
            project.out_dir.join("pages").join("a.jsx")
        );
    }

    #[test]
    fn test_default_config_round_trips() {
        let project = Project::parse(&default_config("demo"), Path::new("/p")).unwrap();
        assert_eq!(project, Project::with_defaults("demo", Path::new("/p")));
    }
}
