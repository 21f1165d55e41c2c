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

pub mod checksum;
pub mod context;
pub mod graalvm;
pub mod pipeline;
pub mod source;
pub mod synthesizer;
pub mod url_synth;

pub use checksum::ChecksumLinker;
pub use context::IngestContext;
pub use graalvm::GraalVm;
pub use pipeline::IngestionPipeline;
pub use source::{DistributionSource, UrlParameters};
pub use synthesizer::{PackageDraft, PackageSynthesizer};
pub use url_synth::UrlSynthesizer;
