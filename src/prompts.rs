//! Art prompt library backing the randomize action.
//!
//! The list ships inside the binary and is parsed once. A parse failure is
//! cached the same way a success is, so a broken asset degrades to a
//! status-line message instead of being re-reported on every keypress.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;

const PROMPTS_JSON: &str = include_str!("../assets/prompts.json");

static LIBRARY: OnceLock<Result<Vec<String>, PromptError>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    Parse(String),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Parse(e) => write!(f, "prompt library is unreadable: {e}"),
        }
    }
}

impl std::error::Error for PromptError {}

/// The embedded prompt list, loaded on first use.
pub fn library() -> Result<&'static [String], PromptError> {
    let cached = LIBRARY.get_or_init(|| {
        let parsed = serde_json::from_str::<Vec<String>>(PROMPTS_JSON)
            .map_err(|e| PromptError::Parse(e.to_string()));
        match &parsed {
            Ok(list) => tracing::debug!(count = list.len(), "prompt library loaded"),
            Err(e) => tracing::warn!(error = %e, "prompt library failed to load"),
        }
        parsed
    });
    match cached {
        Ok(list) => Ok(list.as_slice()),
        Err(e) => Err(e.clone()),
    }
}

/// Pick a uniformly random prompt from the library.
pub fn random_prompt() -> Result<Option<String>, PromptError> {
    Ok(pick(library()?, &mut rand::thread_rng()))
}

/// Pick from an explicit list. An empty list yields nothing rather than
/// clearing whatever the user already typed.
pub fn pick<R: Rng>(list: &[String], rng: &mut R) -> Option<String> {
    if list.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..list.len());
    Some(list[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn embedded_library_parses_and_is_non_empty() {
        let list = library().unwrap();
        assert!(!list.is_empty());
        assert!(list.iter().all(|p| !p.trim().is_empty()));
    }

    #[test]
    fn empty_list_picks_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick(&[], &mut rng), None);
    }

    #[test]
    fn pick_stays_inside_the_list() {
        let list: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let chosen = pick(&list, &mut rng).unwrap();
            assert!(list.contains(&chosen));
        }
    }

    #[test]
    fn random_prompt_draws_from_the_library() {
        let prompt = random_prompt().unwrap().unwrap();
        assert!(library().unwrap().contains(&prompt));
    }
}
