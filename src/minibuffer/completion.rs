//! パス補完
//!
//! ファイル名プロンプトで Tab を押したとき、入力中のファイル名を共通接頭辞まで補完する

use std::path::Path;

/// 補完結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionResult {
    /// 候補（ディレクトリは末尾 `/` 付き、名前順）
    pub candidates: Vec<String>,
    /// 補完後の入力文字列
    pub completed_input: String,
}

/// パス補完エンジン
#[derive(Debug, Clone)]
pub struct PathCompletion {
    max_candidates: usize,
    show_hidden: bool,
}

impl PathCompletion {
    pub fn new() -> Self {
        Self {
            max_candidates: 50,
            show_hidden: false,
        }
    }

    /// 入力文字列を補完
    pub fn complete(&self, input: &str) -> CompletionResult {
        let (dir_part, partial) = match input.rfind('/') {
            Some(idx) => (&input[..=idx], &input[idx + 1..]),
            None => ("", input),
        };

        let directory = if dir_part.is_empty() {
            ".".to_string()
        } else {
            shellexpand::tilde(dir_part).into_owned()
        };

        let candidates = self.scan_directory(Path::new(&directory), partial);
        let completed_input = match common_prefix(&candidates) {
            Some(prefix) if prefix.len() > partial.len() => format!("{}{}", dir_part, prefix),
            _ => input.to_string(),
        };

        CompletionResult {
            candidates,
            completed_input,
        }
    }

    fn scan_directory(&self, dir: &Path, partial: &str) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut candidates: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if !self.show_hidden && name.starts_with('.') && !partial.starts_with('.') {
                    return None;
                }
                if !name.starts_with(partial) {
                    return None;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                Some(if is_dir { format!("{}/", name) } else { name })
            })
            .collect();

        candidates.sort();
        candidates.truncate(self.max_candidates);
        candidates
    }
}

impl Default for PathCompletion {
    fn default() -> Self {
        Self::new()
    }
}

fn common_prefix(candidates: &[String]) -> Option<String> {
    let first = candidates.first()?;
    let mut prefix: &str = first;

    for candidate in &candidates[1..] {
        let shared = prefix
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((idx, ch), _)| idx + ch.len_utf8())
            .unwrap_or(0);
        prefix = &prefix[..shared];
    }

    Some(prefix.to_string())
}
