use std::path::PathBuf;

use expanduser::expanduser;
use inquire::{autocompletion::Replacement, Autocomplete, CustomUserError};

const SUGGESTION_LIMIT: usize = 15;

/// Path completion for the interactive prompts. Directories are offered with
/// a trailing slash so completion can keep descending.
#[derive(Clone, Default)]
pub struct FilePathCompleter {
    input: String,
    paths: Vec<String>,
    lcp: String,
}

impl FilePathCompleter {
    fn update_input(&mut self, input: &str) -> Result<(), CustomUserError> {
        if input == self.input {
            return Ok(());
        }

        self.input = input.to_owned();
        self.paths.clear();

        let input_path = expanduser(input)?;
        let fallback_parent = input_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_owned())
            .unwrap_or_else(|| PathBuf::from("."));

        let scan_dir = if input.ends_with('/') {
            input_path.clone()
        } else {
            fallback_parent.clone()
        };

        let entries = match std::fs::read_dir(scan_dir) {
            Ok(read_dir) => Ok(read_dir),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                std::fs::read_dir(fallback_parent)
            }
            Err(err) => Err(err),
        }?
        .collect::<Result<Vec<_>, _>>()?;

        let prefix = input_path.to_string_lossy();
        for entry in entries {
            if self.paths.len() >= SUGGESTION_LIMIT {
                break;
            }
            let path = entry.path();
            if path == input_path || !path.to_string_lossy().starts_with(prefix.as_ref()) {
                continue;
            }
            if path.is_dir() {
                self.paths.push(format!("{}/", path.to_string_lossy()));
            } else {
                self.paths.push(path.to_string_lossy().to_string());
            }
        }

        self.lcp = longest_common_prefix(&self.paths);
        Ok(())
    }
}

fn longest_common_prefix(paths: &[String]) -> String {
    let (Some(first), Some(last)) = (paths.iter().min(), paths.iter().max()) else {
        return String::new();
    };
    first
        .chars()
        .zip(last.chars())
        .take_while(|(a, b)| a == b)
        .map(|(c, _)| c)
        .collect()
}

impl Autocomplete for FilePathCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        match self.update_input(input) {
            Ok(()) => Ok(self.paths.clone()),
            Err(_) => Ok(vec![]),
        }
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        if self.update_input(input).is_err() {
            return Ok(Replacement::None);
        }

        Ok(match highlighted_suggestion {
            Some(suggestion) => Replacement::Some(suggestion),
            None if self.lcp.is_empty() => Replacement::None,
            None => Replacement::Some(self.lcp.clone()),
        })
    }
}
