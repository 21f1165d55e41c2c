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

//! Read-only views of what the downstream catalog already knows.

pub mod catalog;
pub mod major_versions;

pub use catalog::{CatalogFile, CatalogSnapshot, PackageCatalog, load_catalog, save_catalog};
pub use major_versions::{FoojayMajorVersions, MajorVersionCatalog, StaticMajorVersions};
