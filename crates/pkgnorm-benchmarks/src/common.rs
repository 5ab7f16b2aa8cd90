//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use serde_json::{json, Map, Value};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

fn links(prefix: &str, count: usize) -> Value {
    let mut map = Map::new();
    for i in 0..count {
        map.insert(format!("{}/package-{}", prefix, i), json!(format!("^{}.{}.0", i % 7, i % 13)));
    }
    Value::Object(map)
}

/// A composer.json with `dep_count` runtime and development links
pub fn composer_manifest(dep_count: usize) -> String {
    json!({
        "name": "acme/widget",
        "description": "A widget for benchmarking",
        "keywords": ["widget", "acme", "bench"],
        "version": "1.2.3",
        "homepage": "https://acme.example.com",
        "license": ["MIT", "Apache-2.0"],
        "authors": [
            {"name": "Ada Lovelace", "email": "ada@example.com", "homepage": "https://ada.example.com"},
            "Charles Babbage <charles@example.com> (https://charles.example.com)"
        ],
        "require": links("acme", dep_count),
        "require-dev": links("dev", dep_count / 2),
        "repositories": [{"type": "vcs", "url": "https://github.com/acme/widget"}],
        "support": {"issues": "https://github.com/acme/widget/issues"},
        "time": "2024-03-01 12:00:00"
    })
    .to_string()
}

/// A package.json with `dep_count` runtime and development dependencies
pub fn npm_manifest(dep_count: usize) -> String {
    json!({
        "name": "@acme/widget",
        "version": "1.2.3",
        "description": "A widget for benchmarking",
        "author": "Ada Lovelace <ada@example.com> (https://ada.example.com)",
        "contributors": ["Charles Babbage <charles@example.com>"],
        "license": "MIT",
        "repository": {"type": "git", "url": "git+https://github.com/acme/widget.git"},
        "dependencies": links("acme", dep_count),
        "devDependencies": links("dev", dep_count / 2)
    })
    .to_string()
}

/// File names covering metafiles, archives and unrecognized files
pub fn sample_file_names() -> Vec<&'static str> {
    vec![
        "composer.json",
        "package.json",
        "widget.gemspec",
        "META.json",
        "bower.json",
        "ivy.xml",
        "widget.nuspec",
        "widget-1.0-1.x86_64.rpm",
        "widget_1.0_amd64.deb",
        "widget.war",
        "widget.jar",
        "widget.apk",
        "widget.whl",
        "widget.msi",
        "widget.dmg",
        "widget.iso",
        "widget.rar",
        "widget-1.0.tar.gz",
        "widget-1.0.zip",
        "README.md",
        "main.rs",
    ]
}
