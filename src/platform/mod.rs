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

//! Platform attribute inference for vendor asset filenames.

pub mod constants;

use crate::error::{IngestError, Result};
use crate::models::package::ArchiveType;
use crate::models::platform::{Architecture, Bitness, OperatingSystem};
use constants::{ARCHITECTURE_TOKENS, OPERATING_SYSTEM_TOKENS};
use log::debug;

/// Platform attributes resolved for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredPlatform {
    pub architecture: Architecture,
    pub bitness: Bitness,
    pub operating_system: OperatingSystem,
}

/// Maps filename fragments to canonical platform values using ordered token tables.
#[derive(Debug, Clone)]
pub struct PlatformInferer {
    architecture_tokens: &'static [(&'static str, Architecture)],
    operating_system_tokens: &'static [(&'static str, OperatingSystem)],
}

impl Default for PlatformInferer {
    fn default() -> Self {
        Self {
            architecture_tokens: ARCHITECTURE_TOKENS,
            operating_system_tokens: OPERATING_SYSTEM_TOKENS,
        }
    }
}

impl PlatformInferer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn architecture(&self, stripped_filename: &str) -> Option<Architecture> {
        first_match(self.architecture_tokens, stripped_filename)
    }

    pub fn operating_system(&self, stripped_filename: &str) -> Option<OperatingSystem> {
        first_match(self.operating_system_tokens, stripped_filename)
    }

    /// Resolves architecture and OS, falling back to the archive type for the OS.
    pub fn infer(
        &self,
        stripped_filename: &str,
        archive_type: ArchiveType,
    ) -> Result<InferredPlatform> {
        let architecture = self.architecture(stripped_filename).ok_or_else(|| {
            IngestError::UnresolvedPlatform {
                filename: stripped_filename.to_string(),
                missing: "architecture",
            }
        })?;

        let operating_system = match self.operating_system(stripped_filename) {
            Some(os) => os,
            None => {
                let fallback = operating_system_for_archive(archive_type).ok_or_else(|| {
                    IngestError::UnresolvedPlatform {
                        filename: stripped_filename.to_string(),
                        missing: "operating system",
                    }
                })?;
                debug!(
                    "No OS token in '{stripped_filename}', using {fallback} from archive type {archive_type}"
                );
                fallback
            }
        };

        Ok(InferredPlatform {
            architecture,
            bitness: architecture.bitness(),
            operating_system,
        })
    }
}

/// OS implied by an archive format alone.
pub fn operating_system_for_archive(archive_type: ArchiveType) -> Option<OperatingSystem> {
    match archive_type {
        ArchiveType::Deb | ArchiveType::Rpm | ArchiveType::TarGz => Some(OperatingSystem::Linux),
        ArchiveType::Msi | ArchiveType::Zip => Some(OperatingSystem::Windows),
        ArchiveType::Dmg | ArchiveType::Pkg => Some(OperatingSystem::MacOS),
        _ => None,
    }
}

fn first_match<T: Copy>(table: &[(&str, T)], haystack: &str) -> Option<T> {
    let haystack = haystack.to_lowercase();
    table
        .iter()
        .find(|(token, _)| haystack.contains(token))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graalvm_platforms() {
        let inferer = PlatformInferer::new();

        let platform = inferer.infer("_linux-x64", ArchiveType::TarGz).unwrap();
        assert_eq!(platform.architecture, Architecture::X64);
        assert_eq!(platform.operating_system, OperatingSystem::Linux);
        assert_eq!(platform.bitness, Bitness::Bit64);

        let platform = inferer.infer("_macos-aarch64", ArchiveType::TarGz).unwrap();
        assert_eq!(platform.architecture, Architecture::Aarch64);
        assert_eq!(platform.operating_system, OperatingSystem::MacOS);

        let platform = inferer.infer("_windows-x64", ArchiveType::Zip).unwrap();
        assert_eq!(platform.operating_system, OperatingSystem::Windows);
    }

    #[test]
    fn test_more_specific_architecture_tokens_win() {
        let inferer = PlatformInferer::new();

        assert_eq!(inferer.architecture("linux-x86_64"), Some(Architecture::X64));
        assert_eq!(inferer.architecture("linux-x86"), Some(Architecture::X86));
        assert_eq!(
            inferer.architecture("linux-ppc64le"),
            Some(Architecture::Ppc64le)
        );
        assert_eq!(inferer.architecture("linux-ppc64"), Some(Architecture::Ppc64));
        assert_eq!(inferer.architecture("macos-arm64"), Some(Architecture::Aarch64));
        assert_eq!(inferer.architecture("linux-arm32-vfp"), Some(Architecture::Arm32));
        assert_eq!(inferer.architecture("linux-arm"), Some(Architecture::Arm32));
    }

    #[test]
    fn test_more_specific_os_tokens_win() {
        let inferer = PlatformInferer::new();

        // "darwin" contains "win"
        assert_eq!(
            inferer.operating_system("darwin-x64"),
            Some(OperatingSystem::MacOS)
        );
        // "alpine-linux" contains "linux"
        assert_eq!(
            inferer.operating_system("alpine-linux-x64"),
            Some(OperatingSystem::Alpine)
        );
        assert_eq!(
            inferer.operating_system("linux-x64"),
            Some(OperatingSystem::Linux)
        );
        assert_eq!(
            inferer.operating_system("windows-x64"),
            Some(OperatingSystem::Windows)
        );
    }

    #[test]
    fn test_token_tables_keep_substrings_after_their_superstrings() {
        fn assert_ordered<T>(table: &[(&str, T)]) {
            for (later_index, (later, _)) in table.iter().enumerate() {
                for (earlier, _) in &table[..later_index] {
                    assert!(
                        !later.contains(earlier),
                        "'{later}' would be shadowed by earlier token '{earlier}'"
                    );
                }
            }
        }

        assert_ordered(ARCHITECTURE_TOKENS);
        assert_ordered(OPERATING_SYSTEM_TOKENS);
    }

    #[test]
    fn test_os_falls_back_to_archive_type() {
        let inferer = PlatformInferer::new();

        let platform = inferer.infer("_x64", ArchiveType::TarGz).unwrap();
        assert_eq!(platform.operating_system, OperatingSystem::Linux);

        let platform = inferer.infer("_x64", ArchiveType::Msi).unwrap();
        assert_eq!(platform.operating_system, OperatingSystem::Windows);

        let platform = inferer.infer("_aarch64", ArchiveType::Pkg).unwrap();
        assert_eq!(platform.operating_system, OperatingSystem::MacOS);
    }

    #[test]
    fn test_unresolved_platform_is_rejected() {
        let inferer = PlatformInferer::new();

        assert!(matches!(
            inferer.infer("_linux-mips", ArchiveType::TarGz),
            Err(IngestError::UnresolvedPlatform {
                missing: "architecture",
                ..
            })
        ));
        assert!(matches!(
            inferer.infer("_x64", ArchiveType::Exe),
            Err(IngestError::UnresolvedPlatform {
                missing: "operating system",
                ..
            })
        ));
    }
}
