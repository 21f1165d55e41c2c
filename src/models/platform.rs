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

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    X86,
    Aarch64,
    Arm32,
    Ppc64,
    Ppc64le,
    S390x,
    Sparcv9,
    Riscv64,
}

impl Architecture {
    /// Token used by vendors in download URLs and filenames.
    pub fn api_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::X86 => "x86",
            Architecture::Aarch64 => "aarch64",
            Architecture::Arm32 => "arm32",
            Architecture::Ppc64 => "ppc64",
            Architecture::Ppc64le => "ppc64le",
            Architecture::S390x => "s390x",
            Architecture::Sparcv9 => "sparcv9",
            Architecture::Riscv64 => "riscv64",
        }
    }

    pub fn bitness(&self) -> Bitness {
        match self {
            Architecture::X86 | Architecture::Arm32 => Bitness::Bit32,
            _ => Bitness::Bit64,
        }
    }
}

impl FromStr for Architecture {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" | "x86-64" => Ok(Architecture::X64),
            "x86" | "i386" | "i586" | "i686" | "x32" => Ok(Architecture::X86),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            "arm32" | "arm" | "armv7" | "aarch32" => Ok(Architecture::Arm32),
            "ppc64" => Ok(Architecture::Ppc64),
            "ppc64le" => Ok(Architecture::Ppc64le),
            "s390x" => Ok(Architecture::S390x),
            "sparcv9" => Ok(Architecture::Sparcv9),
            "riscv64" => Ok(Architecture::Riscv64),
            _ => Err(IngestError::InvalidConfig(format!(
                "Unknown architecture: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Linux,
    Alpine,
    Windows,
    MacOS,
    Solaris,
    Aix,
}

impl OperatingSystem {
    pub fn api_str(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "linux",
            OperatingSystem::Alpine => "alpine-linux",
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOS => "macos",
            OperatingSystem::Solaris => "solaris",
            OperatingSystem::Aix => "aix",
        }
    }
}

impl FromStr for OperatingSystem {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(OperatingSystem::Linux),
            "alpine" | "alpine-linux" | "linux-musl" => Ok(OperatingSystem::Alpine),
            "windows" | "win" => Ok(OperatingSystem::Windows),
            "macos" | "macosx" | "mac" | "darwin" | "osx" => Ok(OperatingSystem::MacOS),
            "solaris" => Ok(OperatingSystem::Solaris),
            "aix" => Ok(OperatingSystem::Aix),
            _ => Err(IngestError::InvalidConfig(format!(
                "Unknown operating system: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bitness {
    #[serde(rename = "32")]
    Bit32,
    #[serde(rename = "64")]
    Bit64,
}

impl std::fmt::Display for Bitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bitness::Bit32 => write!(f, "32"),
            Bitness::Bit64 => write!(f, "64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_parsing() {
        assert_eq!(Architecture::from_str("x64").unwrap(), Architecture::X64);
        assert_eq!(Architecture::from_str("amd64").unwrap(), Architecture::X64);
        assert_eq!(Architecture::from_str("x86_64").unwrap(), Architecture::X64);
        assert_eq!(
            Architecture::from_str("AARCH64").unwrap(),
            Architecture::Aarch64
        );
        assert_eq!(
            Architecture::from_str("arm64").unwrap(),
            Architecture::Aarch64
        );
        assert!(Architecture::from_str("mips").is_err());
    }

    #[test]
    fn test_bitness_is_derived_from_architecture() {
        assert_eq!(Architecture::X64.bitness(), Bitness::Bit64);
        assert_eq!(Architecture::Aarch64.bitness(), Bitness::Bit64);
        assert_eq!(Architecture::X86.bitness(), Bitness::Bit32);
        assert_eq!(Architecture::Arm32.bitness(), Bitness::Bit32);
    }

    #[test]
    fn test_operating_system_parsing() {
        assert_eq!(
            OperatingSystem::from_str("linux").unwrap(),
            OperatingSystem::Linux
        );
        assert_eq!(
            OperatingSystem::from_str("darwin").unwrap(),
            OperatingSystem::MacOS
        );
        assert_eq!(
            OperatingSystem::from_str("Windows").unwrap(),
            OperatingSystem::Windows
        );
        assert!(OperatingSystem::from_str("plan9").is_err());
    }

    #[test]
    fn test_bitness_serialization() {
        assert_eq!(serde_json::to_string(&Bitness::Bit64).unwrap(), "\"64\"");
        assert_eq!(
            serde_json::from_str::<Bitness>("\"32\"").unwrap(),
            Bitness::Bit32
        );
    }
}
