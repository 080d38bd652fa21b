use std::fmt::{self, Write as _};
use std::path::Path;

use crate::{
    analyzer::RootNames,
    error::Result,
    types::{DirectoryEntry, LanguageStats, RepoMetadata},
};

/// File name used when saving a generated document
pub const README_FILE_NAME: &str = "README.md";
/// MIME type for serving a generated document
pub const README_MIME_TYPE: &str = "text/markdown";

/// Everything the assembler needs; optional sections are empty strings when disabled
#[derive(Debug, Clone, Copy)]
pub struct ReadmeParts<'a> {
    pub metadata: &'a RepoMetadata,
    pub root_entries: &'a [DirectoryEntry],
    pub languages: &'a LanguageStats,
    pub folder_tree: &'a str,
    pub analysis: &'a str,
    pub replication: &'a str,
}

/// A finished README
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    pub markdown: String,
}

impl ReadmeDocument {
    pub fn as_str(&self) -> &str {
        &self.markdown
    }

    /// Write the document to `path`; a directory gets `README.md` inside it
    pub async fn write_to(&self, path: &Path) -> Result<std::path::PathBuf> {
        let target = if tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            path.join(README_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, self.markdown.as_bytes()).await?;
        Ok(target)
    }
}

enum InstallKind {
    Npm,
    Pip,
    Maven,
    Plain,
}

impl InstallKind {
    fn detect(entries: &[DirectoryEntry]) -> Self {
        let names = RootNames::new(entries);
        if names.has("package.json") {
            InstallKind::Npm
        } else if names.has("requirements.txt") {
            InstallKind::Pip
        } else if names.has("pom.xml") {
            InstallKind::Maven
        } else {
            InstallKind::Plain
        }
    }

    fn steps(&self) -> &'static str {
        match self {
            InstallKind::Npm => "\n\n# Install dependencies\nnpm install\n# or\nyarn install\n# or\npnpm install",
            InstallKind::Pip => "\n\n# Install dependencies\npip install -r requirements.txt",
            InstallKind::Maven => "\n\n# Build the project\nmvn clean install",
            InstallKind::Plain => "",
        }
    }
}

/// Assemble the README Markdown; deterministic given its inputs
///
/// Combines repository metadata, the rendered tree, the analysis and the
/// replication section into one document.
pub fn assemble_readme(parts: &ReadmeParts<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_readme(&mut out, parts);
    out
}

fn write_readme(out: &mut String, p: &ReadmeParts<'_>) -> fmt::Result {
    let meta = p.metadata;

    writeln!(out, "# {}\n", meta.name)?;
    writeln!(out, "{}\n", meta.description().unwrap_or("A GitHub repository"))?;

    writeln!(out, "## 📋 Table of Contents\n")?;
    writeln!(out, "- [About](#about)")?;
    if !p.analysis.is_empty() {
        writeln!(out, "- [AI-Generated Project Analysis](#ai-generated-project-analysis)")?;
    }
    if !p.replication.is_empty() {
        writeln!(out, "- [Code Replication Prompt](#code-replication-prompt)")?;
    }
    writeln!(out, "- [Technologies](#technologies)")?;
    if !p.folder_tree.is_empty() {
        writeln!(out, "- [Project Structure](#project-structure)")?;
    }
    for entry in ["Installation", "Usage", "Features", "Contributing", "License", "Contact"] {
        writeln!(out, "- [{}](#{})", entry, entry.to_lowercase())?;
    }

    writeln!(out, "\n## 🎯 About\n")?;
    writeln!(
        out,
        "{}\n",
        meta.description()
            .unwrap_or("This project provides various functionalities and features.")
    )?;
    writeln!(out, "**Repository Stats:**")?;
    writeln!(out, "- ⭐ Stars: {}", meta.stargazers_count)?;
    writeln!(out, "- 🍴 Forks: {}", meta.forks_count)?;
    writeln!(out, "- 👁️ Watchers: {}", meta.watchers_count)?;
    writeln!(out, "- 🐛 Open Issues: {}", meta.open_issues_count)?;

    if !p.analysis.is_empty() {
        writeln!(out, "\n{}", p.analysis.trim_end())?;
    }
    if !p.replication.is_empty() {
        writeln!(out, "\n{}", p.replication.trim_end())?;
    }

    writeln!(out, "\n## 🛠️ Technologies\n")?;
    writeln!(out, "This project is built with:\n")?;
    if p.languages.is_empty() {
        writeln!(out, "- Check repository for details")?;
    } else {
        for language in p.languages.keys() {
            writeln!(out, "- {}", language)?;
        }
    }

    if !p.folder_tree.is_empty() {
        writeln!(out, "\n## 📁 Project Structure\n")?;
        writeln!(out, "```\n{}/\n{}\n```", meta.name, p.folder_tree.trim_end())?;
    }

    writeln!(out, "\n## Installation\n")?;
    writeln!(
        out,
        "```bash\n# Clone the repository\ngit clone {}\n\n# Navigate to project directory\ncd {}{}\n```",
        meta.clone_url,
        meta.name,
        InstallKind::detect(p.root_entries).steps()
    )?;

    writeln!(out, "\n## 🚀 Usage\n")?;
    writeln!(out, "```bash\n# Add specific usage instructions here\n# Example: npm start, python main.py, etc.\n```\n")?;
    writeln!(out, "For detailed usage instructions, please refer to the project documentation or source code.")?;

    writeln!(out, "\n## ✨ Features\n")?;
    for n in 1..=3 {
        writeln!(out, "- Feature {}: [Describe key feature]", n)?;
    }
    writeln!(out, "\n*Note: Review the codebase to identify and list specific features*")?;

    writeln!(out, "\n## 🤝 Contributing\n")?;
    writeln!(out, "Contributions are welcome! Please follow these steps:\n")?;
    writeln!(out, "1. Fork the repository")?;
    writeln!(out, "2. Create a new branch (`git checkout -b feature/amazing-feature`)")?;
    writeln!(out, "3. Commit your changes (`git commit -m 'Add some amazing feature'`)")?;
    writeln!(out, "4. Push to the branch (`git push origin feature/amazing-feature`)")?;
    writeln!(out, "5. Open a Pull Request")?;

    writeln!(out, "\n## 📄 License\n")?;
    match meta.license_name() {
        Some(license) => writeln!(
            out,
            "This project is licensed under the {} - see the [LICENSE](LICENSE) file for details.",
            license
        )?,
        None => writeln!(
            out,
            "License information not available. Please check the repository for license details."
        )?,
    }

    writeln!(out, "\n## 📧 Contact\n")?;
    writeln!(out, "**Project Link:** [{0}]({0})\n", meta.html_url)?;
    writeln!(out, "**Author:** [{}]({})\n", meta.owner.login, meta.owner.html_url)?;
    writeln!(out, "---\n")?;
    writeln!(out, "*Generated with repo-docgen*")?;

    Ok(())
}
