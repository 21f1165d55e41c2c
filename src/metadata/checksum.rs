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

use crate::models::package::{HashAlgorithm, Package};
use log::{debug, trace};

/// Second pass over a release's assets attaching published checksum files.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumLinker {
    algorithm: HashAlgorithm,
}

impl Default for ChecksumLinker {
    fn default() -> Self {
        Self::new(HashAlgorithm::Sha256)
    }
}

impl ChecksumLinker {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Attaches each checksum asset to the package whose filename contains the
    /// checksum's base name. Returns how many packages were linked.
    ///
    /// Checksums without a matching package are dropped.
    pub fn link<'a, I>(&self, assets: I, packages: &mut [Package]) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let suffix = self.algorithm.file_suffix();
        let mut linked = 0;

        for (name, uri) in assets {
            let Some(base_name) = name.strip_suffix(suffix) else {
                continue;
            };
            if base_name.is_empty() {
                continue;
            }

            match packages
                .iter_mut()
                .find(|package| package.filename.contains(base_name))
            {
                Some(package) => {
                    trace!("Linking {name} to {}", package.filename);
                    package.attach_checksum(uri.to_string(), self.algorithm);
                    linked += 1;
                }
                None => debug!("No package for checksum {name}"),
            }
        }

        linked
    }
}
