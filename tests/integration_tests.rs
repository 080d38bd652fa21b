//! Integration tests for README generation
//!
//! These run the full pipeline against in-memory and HTTP-mocked sources

use repo_docgen::{
    build_tree, collect_files, render_tree, ClientConfig, CompletionProvider, DirectoryEntry,
    DirectoryListing, DocError, FileContent, GenerateOptions, GitHubSource, LanguageStats,
    ReadmeGenerator, RepoMetadata, RepoRef, RepositoryApi,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// Mock repository for testing without network access
struct MockRepository {
    metadata: Option<RepoMetadata>,
    files: HashMap<String, Vec<u8>>,
    dirs: HashMap<String, Vec<DirectoryEntry>>,
    languages: LanguageStats,
}

impl MockRepository {
    fn new() -> Self {
        Self {
            metadata: Some(metadata("demo")),
            files: HashMap::new(),
            dirs: HashMap::new(),
            languages: LanguageStats::new(),
        }
    }

    fn add_file(&mut self, path: &str, content: &[u8]) {
        self.files.insert(path.to_string(), content.to_vec());
    }

    fn add_directory(&mut self, path: &str, entries: Vec<DirectoryEntry>) {
        self.dirs.insert(path.to_string(), entries);
    }
}

#[async_trait::async_trait]
impl RepositoryApi for MockRepository {
    async fn fetch_repository(&self) -> repo_docgen::Result<RepoMetadata> {
        self.metadata.clone().ok_or_else(|| DocError::NotFound {
            path: "octo/demo".to_string(),
        })
    }

    async fn list_directory(&self, path: &str) -> repo_docgen::Result<DirectoryListing> {
        self.dirs
            .get(path)
            .map(|entries| DirectoryListing {
                path: path.to_string(),
                entries: entries.clone(),
            })
            .ok_or_else(|| DocError::NotFound {
                path: path.to_string(),
            })
    }

    async fn fetch_languages(&self) -> repo_docgen::Result<LanguageStats> {
        Ok(self.languages.clone())
    }

    async fn fetch_file(&self, path: &str) -> repo_docgen::Result<FileContent> {
        self.files
            .get(path)
            .map(|content| FileContent {
                content: bytes::Bytes::from(content.clone()),
                source_path: path.to_string(),
                etag: None,
            })
            .ok_or_else(|| DocError::NotFound {
                path: path.to_string(),
            })
    }

    fn identifier(&self) -> String {
        "mock".to_string()
    }
}

// Records prompts and answers with a fixed reply or error
struct MockCompletion {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, prompt: &str) -> repo_docgen::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| DocError::Llm {
            message: "boom".to_string(),
        })
    }
}

fn metadata(name: &str) -> RepoMetadata {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "description": "A demo repository",
        "clone_url": format!("https://github.com/octo/{name}.git"),
        "html_url": format!("https://github.com/octo/{name}"),
        "stargazers_count": 42,
        "forks_count": 7,
        "watchers_count": 42,
        "open_issues_count": 2,
        "owner": { "login": "octo", "html_url": "https://github.com/octo" },
        "license": { "name": "MIT License" },
        "topics": ["docs"],
        "default_branch": "main"
    }))
    .unwrap()
}

fn scenario_repository() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_directory(
        "",
        vec![
            DirectoryEntry::dir("src", "src"),
            DirectoryEntry::file("README.md", "README.md"),
            DirectoryEntry::dir("node_modules", "node_modules"),
        ],
    );
    repo.add_directory("src", vec![DirectoryEntry::file("main.rs", "src/main.rs")]);
    repo.add_directory(
        "node_modules",
        vec![DirectoryEntry::file("x.js", "node_modules/x.js")],
    );
    repo.add_file("README.md", b"# demo");
    repo.add_file("src/main.rs", b"fn main() {}");
    repo.languages.insert("Rust".to_string(), 900);
    repo
}

#[tokio::test]
async fn test_depth_one_scenario() {
    let repo = scenario_repository();

    let tree = build_tree(&repo, "", 0, 1).await;
    let text = render_tree(&tree);

    assert_eq!(text, "├── 📁 src\n└── 📄 README.md\n");
    assert!(!text.contains("node_modules"));
}

#[tokio::test]
async fn test_ignored_count_matches_listing() {
    let repo = scenario_repository();
    let tree = build_tree(&repo, "", 0, 3).await;

    // 3 entries, 1 ignored
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children().len(), 1);
}

#[tokio::test]
async fn test_collect_files_excludes_ignored() {
    let repo = scenario_repository();
    let files = collect_files(&repo, "").await;
    assert_eq!(files, vec!["src/main.rs", "README.md"]);
}

#[tokio::test]
async fn test_full_generation() {
    let generator = ReadmeGenerator::new(Arc::new(scenario_repository()), GenerateOptions::default());

    let doc = generator.generate().await.unwrap();
    let text = doc.as_str();

    assert!(text.starts_with("# demo\n"));
    assert!(text.contains("## 📁 Project Structure"));
    assert!(text.contains("demo/\n├── 📁 src\n│   └── 📄 main.rs\n└── 📄 README.md\n```"));
    assert!(text.contains("**Primary Language:** Rust"));
    assert!(text.contains("- ⭐ Stars: 42"));
    assert!(!text.contains("Code Replication Prompt"));
}

#[tokio::test]
async fn test_sections_can_be_disabled() {
    let options = GenerateOptions {
        include_tree: false,
        include_analysis: false,
        ..Default::default()
    };
    let doc = ReadmeGenerator::new(Arc::new(scenario_repository()), options)
        .generate()
        .await
        .unwrap();

    assert!(!doc.as_str().contains("Project Structure"));
    assert!(!doc.as_str().contains("Project Analysis"));
}

#[tokio::test]
async fn test_missing_repository_aborts() {
    let mut repo = scenario_repository();
    repo.metadata = None;

    let result = ReadmeGenerator::new(Arc::new(repo), GenerateOptions::default())
        .generate()
        .await;

    assert!(matches!(result, Err(DocError::NotFound { .. })));
}

#[tokio::test]
async fn test_unreadable_root_still_generates() {
    let mut repo = MockRepository::new();
    repo.metadata = Some(metadata("bare"));

    let doc = ReadmeGenerator::new(Arc::new(repo), GenerateOptions::default())
        .generate()
        .await
        .unwrap();

    assert!(doc.as_str().starts_with("# bare\n"));
    assert!(doc.as_str().contains("- Check repository for details"));
}

#[tokio::test]
async fn test_replication_prompt_included() {
    let completion = Arc::new(MockCompletion {
        reply: Some("Here is the project.".to_string()),
        prompts: Mutex::new(Vec::new()),
    });
    let options = GenerateOptions {
        include_replication: true,
        ..Default::default()
    };

    let doc = ReadmeGenerator::new(Arc::new(scenario_repository()), options)
        .with_completion(completion.clone())
        .generate()
        .await
        .unwrap();

    let prompts = completion.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("### src/main.rs\n```\nfn main() {}\n```"));
    assert!(!prompts[0].contains("node_modules"));
    assert!(doc.as_str().contains("## 🤖 AI-Generated Code Replication Prompt"));
    assert!(doc.as_str().contains("Here is the project."));
}

#[tokio::test]
async fn test_replication_failure_uses_placeholder() {
    let completion = Arc::new(MockCompletion {
        reply: None,
        prompts: Mutex::new(Vec::new()),
    });
    let options = GenerateOptions {
        include_replication: true,
        ..Default::default()
    };

    let doc = ReadmeGenerator::new(Arc::new(scenario_repository()), options)
        .with_completion(completion)
        .generate()
        .await
        .unwrap();

    assert!(doc.as_str().contains("*Failed to generate AI prompt."));
    assert!(doc.as_str().contains("## 📄 License"));
}

#[tokio::test]
async fn test_invalid_depth_rejected() {
    let options = GenerateOptions {
        max_depth: 0,
        ..Default::default()
    };
    let result = ReadmeGenerator::new(Arc::new(scenario_repository()), options)
        .generate()
        .await;
    assert!(matches!(result, Err(DocError::InvalidConfig { .. })));
}

#[test]
fn test_invalid_url_rejected() {
    assert!(matches!(
        RepoRef::parse("not a url"),
        Err(DocError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn test_generation_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _repo = server
        .mock("GET", "/repos/octo/web")
        .with_status(200)
        .with_body(serde_json::to_string(&metadata("web")).unwrap())
        .create_async()
        .await;
    let _root = server
        .mock("GET", "/repos/octo/web/contents")
        .with_status(200)
        .with_body(
            r#"[
                {"name": "package.json", "path": "package.json", "type": "file"},
                {"name": "lib", "path": "lib", "type": "dir"}
            ]"#,
        )
        .create_async()
        .await;
    let _lib = server
        .mock("GET", "/repos/octo/web/contents/lib")
        .with_status(500)
        .create_async()
        .await;
    let _languages = server
        .mock("GET", "/repos/octo/web/languages")
        .with_status(200)
        .with_body(r#"{"JavaScript": 3000, "CSS": 100}"#)
        .create_async()
        .await;

    let source = GitHubSource::new(
        RepoRef::parse("https://github.com/octo/web.git").unwrap(),
        ClientConfig::default().with_base_url(server.url()),
    );
    let doc = ReadmeGenerator::new(Arc::new(source), GenerateOptions::default())
        .generate()
        .await
        .unwrap();
    let text = doc.as_str();

    assert!(text.contains("web/\n├── 📁 lib\n└── 📄 package.json\n"));
    assert!(text.contains("**Project Type:** Node.js application"));
    assert!(text.contains("**Primary Language:** JavaScript (+ 1 other)"));
    assert!(text.contains("npm install"));
}

#[tokio::test]
async fn test_tree_over_http_with_reserved_characters() {
    let mut server = mockito::Server::new_async().await;
    let _root = server
        .mock("GET", "/repos/octo/demo/contents")
        .with_status(200)
        .with_body(r#"[{"name": "C#", "path": "C#", "type": "dir"}]"#)
        .create_async()
        .await;
    let child = server
        .mock("GET", "/repos/octo/demo/contents/C%23")
        .with_status(200)
        .with_body(r#"[{"name": "Program.cs", "path": "C#/Program.cs", "type": "file"}]"#)
        .create_async()
        .await;

    let source = GitHubSource::new(
        RepoRef::new("octo", "demo"),
        ClientConfig::default().with_base_url(server.url()),
    );
    let tree = build_tree(&source, "", 0, 3).await;

    child.assert_async().await;
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children().len(), 1);
    assert_eq!(render_tree(&tree), "└── 📁 C#\n    └── 📄 Program.cs\n");
}
