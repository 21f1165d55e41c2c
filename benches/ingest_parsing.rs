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

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kopi_ingest::metadata::graalvm::stripped_asset_name;
use kopi_ingest::models::package::ArchiveType;
use kopi_ingest::platform::PlatformInferer;
use kopi_ingest::version::VersionNumber;
use kopi_ingest::version::extractor::VersionExtractor;

const TAGS: &[&str] = &[
    "jdk-21",
    "jdk-21.0.2",
    "jdk-24.0.0-ea.21",
    "graalvm-jdk-jdk-17.0.8",
    "23.1.0-dev-20230815_2115",
];

const ASSETS: &[&str] = &[
    "graalvm-jdk-21.0.2_linux-x64_bin.tar.gz",
    "graalvm-jdk-21.0.2_macos-aarch64_bin.tar.gz",
    "graalvm-jdk-21.0.2_windows-x64_bin.zip",
    "graalvm-jdk-24-ea+20_linux-aarch64_bin.tar.gz",
];

fn bench_version_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_extraction");
    let extractor = VersionExtractor::new();

    for tag in TAGS {
        group.bench_with_input(BenchmarkId::new("from_tag", tag), tag, |b, tag| {
            b.iter(|| extractor.from_tag(black_box(tag)))
        });
    }

    group.bench_function("version_number_from_str", |b| {
        b.iter(|| black_box("21.0.2+13").parse::<VersionNumber>())
    });

    group.finish();
}

fn bench_asset_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("asset_classification");
    let inferer = PlatformInferer::new();

    group.bench_function("stripped_asset_name", |b| {
        b.iter(|| {
            for asset in ASSETS {
                black_box(stripped_asset_name(black_box(asset)));
            }
        })
    });

    group.bench_function("infer_platform", |b| {
        b.iter(|| {
            for asset in ASSETS {
                let archive_type = ArchiveType::from_filename(asset);
                if let (Some(stripped), Some(archive_type)) =
                    (stripped_asset_name(asset), archive_type)
                {
                    let _ = black_box(inferer.infer(stripped, archive_type));
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_version_extraction, bench_asset_classification);
criterion_main!(benches);
