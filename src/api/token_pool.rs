// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin pool of GitHub API tokens shared by every feed fetch in the process.
pub struct GithubTokenPool {
    tokens: Vec<String>,
    cursor: AtomicUsize,
}

impl GithubTokenPool {
    pub fn new(tokens: Vec<String>) -> Self {
        let tokens = tokens
            .into_iter()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .collect();

        Self {
            tokens,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Next token in rotation, `None` when no tokens are configured.
    pub fn next_token(&self) -> Option<&str> {
        if self.tokens.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.tokens.len();
        Some(&self.tokens[index])
    }

    /// `Authorization` header value for the next token.
    pub fn next_authorization(&self) -> Option<String> {
        self.next_token().map(|token| format!("Bearer {token}"))
    }
}

impl fmt::Debug for GithubTokenPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubTokenPool")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_round_robin_order() {
        let pool = GithubTokenPool::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

        let sequence: Vec<&str> = (0..6).filter_map(|_| pool.next_token()).collect();
        assert_eq!(sequence, vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_empty_pool() {
        let pool = GithubTokenPool::new(vec!["  ".to_string(), String::new()]);
        assert!(pool.is_empty());
        assert_eq!(pool.next_token(), None);
        assert_eq!(pool.next_authorization(), None);
    }

    #[test]
    fn test_authorization_header() {
        let pool = GithubTokenPool::new(vec![" ghp_123 ".to_string()]);
        assert_eq!(pool.next_authorization().as_deref(), Some("Bearer ghp_123"));
    }

    #[test]
    fn test_debug_does_not_leak_tokens() {
        let pool = GithubTokenPool::new(vec!["secret".to_string()]);
        let debug = format!("{pool:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("tokens: 1"));
    }

    #[test]
    fn test_concurrent_use_spreads_evenly() {
        let pool = Arc::new(GithubTokenPool::new(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    (0..100)
                        .filter_map(|_| pool.next_token().map(str::to_string))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for handle in handles {
            for token in handle.join().unwrap() {
                *counts.entry(token).or_default() += 1;
            }
        }

        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&count| count == 200));
    }
}
