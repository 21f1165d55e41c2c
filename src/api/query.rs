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

use crate::models::package::{ArchiveType, PackageType};
use crate::models::platform::{Architecture, Bitness, OperatingSystem};
use crate::models::release::{ReleaseStatus, TermOfSupport};

/// Caller-supplied filters for package synthesis. `None` accepts any value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageQuery {
    pub operating_system: Option<OperatingSystem>,
    pub architecture: Option<Architecture>,
    pub bitness: Option<Bitness>,
    pub archive_type: Option<ArchiveType>,
    pub package_type: Option<PackageType>,
    pub javafx_bundled: Option<bool>,
    pub release_status: Option<ReleaseStatus>,
    pub term_of_support: Option<TermOfSupport>,
}

impl PackageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operating_system(mut self, operating_system: OperatingSystem) -> Self {
        self.operating_system = Some(operating_system);
        self
    }

    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = Some(architecture);
        self
    }

    pub fn bitness(mut self, bitness: Bitness) -> Self {
        self.bitness = Some(bitness);
        self
    }

    pub fn archive_type(mut self, archive_type: ArchiveType) -> Self {
        self.archive_type = Some(archive_type);
        self
    }

    pub fn package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = Some(package_type);
        self
    }

    pub fn javafx_bundled(mut self, javafx_bundled: bool) -> Self {
        self.javafx_bundled = Some(javafx_bundled);
        self
    }

    pub fn release_status(mut self, release_status: ReleaseStatus) -> Self {
        self.release_status = Some(release_status);
        self
    }

    pub fn term_of_support(mut self, term_of_support: TermOfSupport) -> Self {
        self.term_of_support = Some(term_of_support);
        self
    }

    /// Release status assigned to synthesized packages.
    pub fn effective_release_status(&self) -> ReleaseStatus {
        self.release_status.unwrap_or(ReleaseStatus::Ga)
    }

    pub fn wants_early_access(&self) -> bool {
        self.release_status == Some(ReleaseStatus::Ea)
    }
}

fn accepts<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    filter.as_ref().is_none_or(|wanted| wanted == value)
}

impl PackageQuery {
    pub fn accepts_archive_type(&self, archive_type: ArchiveType) -> bool {
        accepts(&self.archive_type, &archive_type)
    }

    pub fn accepts_operating_system(&self, operating_system: OperatingSystem) -> bool {
        accepts(&self.operating_system, &operating_system)
    }

    pub fn accepts_architecture(&self, architecture: Architecture) -> bool {
        accepts(&self.architecture, &architecture) && accepts(&self.bitness, &architecture.bitness())
    }

    pub fn accepts_package_type(&self, package_type: PackageType) -> bool {
        accepts(&self.package_type, &package_type)
    }

    pub fn accepts_javafx_bundled(&self, javafx_bundled: bool) -> bool {
        accepts(&self.javafx_bundled, &javafx_bundled)
    }

    pub fn accepts_term_of_support(&self, term_of_support: TermOfSupport) -> bool {
        accepts(&self.term_of_support, &term_of_support)
    }
}
