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

use crate::error::IngestError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a IngestError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a IngestError) -> Self {
        let (suggestion, details) = match error {
            IngestError::VersionParse(input) => (
                Some(
                    "Release tags are expected to contain 'jdk-<version>' or \
                     '<version>-dev..._<build>'. The vendor may have changed its naming."
                        .to_string(),
                ),
                Some(format!("Unrecognized tag or filename: {input}")),
            ),
            IngestError::UnresolvedPlatform { filename, missing } => (
                Some(
                    "Add the new token to the ordered lookup tables in platform::constants."
                        .to_string(),
                ),
                Some(format!("No {missing} token matched '{filename}'")),
            ),
            IngestError::FeedUnavailable { url, .. } => (
                Some(
                    "Check network connectivity and the configured feed URL. For GitHub feeds, \
                     configure API tokens via KOPI_INGEST_GITHUB__API_TOKENS to avoid rate \
                     limiting."
                        .to_string(),
                ),
                Some(format!("Feed: {url}")),
            ),
            IngestError::InvalidConfig(_)
            | IngestError::ConfigError(_)
            | IngestError::Config(_) => (
                Some(
                    "Check kopi-ingest.toml and KOPI_INGEST_* environment variables.".to_string(),
                ),
                None,
            ),
            IngestError::InvalidCatalog { path, .. } => (
                Some(format!(
                    "The catalog file must be a file previously written by 'kopi-ingest fetch \
                     --output'. Remove or regenerate {path}."
                )),
                None,
            ),
            IngestError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => (
                Some("Check write permissions of the output directory.".to_string()),
                Some(format!("I/O error: {e}")),
            ),
            IngestError::Io(_) | IngestError::Json(_) => (None, None),
        };

        Self {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
