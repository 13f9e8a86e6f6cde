// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use lectura::LanguageProcessor;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// Shared processor; building one compiles every lexicon table
pub fn shared_processor() -> &'static LanguageProcessor {
    static PROCESSOR: OnceLock<LanguageProcessor> = OnceLock::new();
    PROCESSOR.get_or_init(|| LanguageProcessor::new().expect("Failed to build processor"))
}

/// Temporary directory holding text files for batch tests
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a text file with given content, creating parent directories as needed
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create a file whose bytes are not valid UTF-8
    pub fn create_invalid_utf8_file<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        fs::write(&file_path, [0x45, 0x6c, 0x20, 0x6e, 0x69, 0xf1, 0x6f, 0x2e])
            .expect("Failed to write invalid file");
        file_path
    }

    /// Glob pattern matching every `.txt` file directly under the fixture root
    pub fn txt_pattern(&self) -> String {
        format!("{}/*.txt", self.root_path.display())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
