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

/// Remote lookups made per candidate artifact.
///
/// Both calls are best effort: any transport failure is reported as "does not exist"
/// or "size unknown".
#[cfg_attr(test, mockall::automock)]
pub trait RemoteProbe: Send + Sync {
    /// HEAD-equivalent existence check.
    fn exists(&self, url: &str) -> bool;

    fn file_size(&self, url: &str) -> Option<u64>;
}
