//! Ordered token tables used to infer platform attributes from asset filenames.
//!
//! Matching is first-hit in table order. A token that is a substring of another token
//! must appear after it: `x86_64` before `x86`, `ppc64le` before `ppc64`, `arm64` before
//! `arm`, `darwin` before `win`, `alpine-linux` before `linux`.

use crate::models::platform::{Architecture, OperatingSystem};

pub const ARCHITECTURE_TOKENS: &[(&str, Architecture)] = &[
    ("aarch64", Architecture::Aarch64),
    ("arm64", Architecture::Aarch64),
    ("aarch32", Architecture::Arm32),
    ("arm32", Architecture::Arm32),
    ("armv7", Architecture::Arm32),
    ("x86_64", Architecture::X64),
    ("x86-64", Architecture::X64),
    ("amd64", Architecture::X64),
    ("x64", Architecture::X64),
    ("ppc64le", Architecture::Ppc64le),
    ("ppc64", Architecture::Ppc64),
    ("s390x", Architecture::S390x),
    ("sparcv9", Architecture::Sparcv9),
    ("riscv64", Architecture::Riscv64),
    ("i686", Architecture::X86),
    ("i586", Architecture::X86),
    ("i386", Architecture::X86),
    ("x86", Architecture::X86),
    ("x32", Architecture::X86),
    ("arm", Architecture::Arm32),
];

pub const OPERATING_SYSTEM_TOKENS: &[(&str, OperatingSystem)] = &[
    ("alpine-linux", OperatingSystem::Alpine),
    ("linux-musl", OperatingSystem::Alpine),
    ("alpine", OperatingSystem::Alpine),
    ("musl", OperatingSystem::Alpine),
    ("linux", OperatingSystem::Linux),
    ("macosx", OperatingSystem::MacOS),
    ("macos", OperatingSystem::MacOS),
    ("darwin", OperatingSystem::MacOS),
    ("osx", OperatingSystem::MacOS),
    ("mac", OperatingSystem::MacOS),
    ("windows", OperatingSystem::Windows),
    ("win", OperatingSystem::Windows),
    ("solaris", OperatingSystem::Solaris),
    ("aix", OperatingSystem::Aix),
];
