use std::fmt::{self, Write as _};

use crate::types::{DirectoryEntry, LanguageStats, RepoMetadata};

/// Project family detected from root marker files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    NextJs,
    Vite,
    TypeScript,
    Node,
    Python,
    Maven,
    Gradle,
    Rust,
    Go,
    Generic,
}

impl ProjectType {
    /// Detect the project type; the first matching marker wins
    pub fn detect(names: &RootNames<'_>) -> Self {
        if names.has("package.json") {
            if names.has_any(&["next.config.js", "next.config.ts"]) {
                ProjectType::NextJs
            } else if names.has_any(&["vite.config.js", "vite.config.ts"]) {
                ProjectType::Vite
            } else if names.has("tsconfig.json") {
                ProjectType::TypeScript
            } else {
                ProjectType::Node
            }
        } else if names.has_any(&["requirements.txt", "setup.py"]) {
            ProjectType::Python
        } else if names.has("pom.xml") {
            ProjectType::Maven
        } else if names.has("build.gradle") {
            ProjectType::Gradle
        } else if names.has("Cargo.toml") {
            ProjectType::Rust
        } else if names.has("go.mod") {
            ProjectType::Go
        } else {
            ProjectType::Generic
        }
    }

    fn is_web_application(self) -> bool {
        matches!(self, ProjectType::NextJs | ProjectType::Vite)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectType::NextJs => "Next.js web application",
            ProjectType::Vite => "Vite-powered web application",
            ProjectType::TypeScript => "TypeScript/JavaScript application",
            ProjectType::Node => "Node.js application",
            ProjectType::Python => "Python application",
            ProjectType::Maven => "Java Maven project",
            ProjectType::Gradle => "Java Gradle project",
            ProjectType::Rust => "Rust project",
            ProjectType::Go => "Go application",
            ProjectType::Generic => "software project",
        };
        f.write_str(label)
    }
}

/// Names present in the repository root
pub struct RootNames<'a>(Vec<&'a str>);

impl<'a> RootNames<'a> {
    pub fn new(entries: &'a [DirectoryEntry]) -> Self {
        Self(entries.iter().map(|e| e.name.as_str()).collect())
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains(&name)
    }

    pub fn has_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.has(n))
    }

    fn any(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.0.iter().any(|&n| pred(n))
    }
}

/// Quality signals visible from the root listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualitySignals {
    pub tests: bool,
    pub ci: bool,
    pub docker: bool,
    pub docs: bool,
}

impl QualitySignals {
    pub fn detect(names: &RootNames<'_>) -> Self {
        Self {
            tests: names.any(|n| n.to_lowercase().contains("test")),
            ci: names.has_any(&[".github", ".gitlab-ci.yml", ".circleci"]),
            docker: names.has_any(&["Dockerfile", "docker-compose.yml"]),
            docs: names.has_any(&["docs", "documentation"]),
        }
    }
}

fn star_label(stars: u64) -> &'static str {
    match stars {
        s if s > 100 => "strong",
        s if s > 10 => "moderate",
        _ => "emerging",
    }
}

fn fork_label(forks: u64) -> &'static str {
    match forks {
        f if f > 50 => "active",
        f if f > 10 => "growing",
        _ => "initial",
    }
}

fn issue_label(issues: u64) -> &'static str {
    match issues {
        i if i > 50 => "(actively maintained)",
        i if i > 0 => "(under development)",
        _ => "(stable)",
    }
}

/// Primary language with a count of the others, e.g. `Rust (+ 2 others)`
fn language_line(languages: &LanguageStats) -> String {
    let primary = languages.keys().next().map(String::as_str).unwrap_or("Unknown");
    match languages.len() {
        0 | 1 => primary.to_string(),
        2 => format!("{} (+ 1 other)", primary),
        n => format!("{} (+ {} others)", primary, n - 1),
    }
}

/// Produce the analysis section as Markdown
///
/// Classifies the repository from the names in its root listing and its
/// language statistics. The same inputs always give the same text.
pub fn analyze(
    metadata: &RepoMetadata,
    root_entries: &[DirectoryEntry],
    languages: &LanguageStats,
) -> String {
    let names = RootNames::new(root_entries);
    let project_type = ProjectType::detect(&names);
    let signals = QualitySignals::detect(&names);
    let primary = languages.keys().next().map(String::as_str).unwrap_or("Unknown");

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_analysis(&mut out, metadata, project_type, &signals, languages, primary);
    out
}

fn write_analysis(
    out: &mut String,
    metadata: &RepoMetadata,
    project_type: ProjectType,
    signals: &QualitySignals,
    languages: &LanguageStats,
    primary: &str,
) -> fmt::Result {
    writeln!(out, "### 🤖 AI-Generated Project Analysis\n")?;
    writeln!(out, "**Project Type:** {}\n", project_type)?;
    writeln!(out, "**Primary Language:** {}\n", language_line(languages))?;

    if !metadata.topics.is_empty() {
        let topics: Vec<String> = metadata.topics.iter().map(|t| format!("`{}`", t)).collect();
        writeln!(out, "**Topics:** {}\n", topics.join(", "))?;
    }

    writeln!(out, "**Project Maturity:**")?;
    writeln!(
        out,
        "- {} stars indicate {} community interest",
        metadata.stargazers_count,
        star_label(metadata.stargazers_count)
    )?;
    writeln!(
        out,
        "- {} forks suggest {} community contributions",
        metadata.forks_count,
        fork_label(metadata.forks_count)
    )?;
    writeln!(
        out,
        "- {} open issues {}\n",
        metadata.open_issues_count,
        issue_label(metadata.open_issues_count)
    )?;

    let mut indicators = Vec::new();
    if signals.tests {
        indicators.push("✅ Includes test suite".to_string());
    }
    if signals.ci {
        indicators.push("✅ CI/CD pipeline configured".to_string());
    }
    if signals.docker {
        indicators.push("✅ Docker support".to_string());
    }
    if signals.docs {
        indicators.push("✅ Documentation available".to_string());
    }
    if let Some(license) = metadata.license_name() {
        indicators.push(format!("✅ Licensed under {}", license));
    }

    if !indicators.is_empty() {
        writeln!(out, "**Quality Indicators:**")?;
        for indicator in &indicators {
            writeln!(out, "{}", indicator)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "**Recommended Use Cases:**")?;
    match project_type {
        t if t.is_web_application() => {
            writeln!(out, "- Building modern web applications with {}", primary)?;
            writeln!(out, "- Learning web development best practices")?;
        }
        ProjectType::Python => {
            writeln!(out, "- Data processing and analysis")?;
            writeln!(out, "- Backend API development")?;
        }
        ProjectType::Maven | ProjectType::Gradle => {
            writeln!(out, "- Enterprise application development")?;
            writeln!(out, "- Building scalable backend services")?;
        }
        _ => {}
    }
    if signals.docker {
        writeln!(out, "- Containerized deployment scenarios")?;
    }
    if signals.tests {
        writeln!(out, "- Learning testing methodologies")?;
    }

    Ok(())
}
